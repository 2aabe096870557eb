// src/transcript.rs
use crate::markdown::format_markdown;
use crate::message::{Message, Sender};

const TYPING_INDICATOR: &str = concat!(
    r#"<div class="message bot-message typing-wrapper">"#,
    r#"<div class="typing-indicator"><span></span><span></span><span></span></div>"#,
    "</div>"
);

/// Ordered list of displayed messages. Only ever appended to.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Renders every message in order. With `pending` set, a typing indicator
    /// follows the last message.
    pub fn render_html(&self, pending: bool) -> String {
        let mut html: String = self.messages.iter().map(render_message).collect();
        if pending {
            html.push_str(TYPING_INDICATOR);
        }
        html
    }
}

/// User text is escaped; bot text is trusted and goes through the markdown
/// formatter.
pub fn render_message(message: &Message) -> String {
    let (class, content) = match message.sender {
        Sender::User => ("user-message", html_escape::encode_text(&message.text).into_owned()),
        Sender::Bot => ("bot-message", format_markdown(&message.text)),
    };
    format!(r#"<div class="message {class}"><div class="message-content">{content}</div></div>"#)
}
