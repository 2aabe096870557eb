//! Page shell for a widget. Element ids match the ones the widget script
//! used to look up (`chat-messages`, `chat-form`, `chat-input`, `send-btn`).

use crate::session::SessionId;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6f8; }
.chat-container { max-width: 720px; margin: 2rem auto; background: #fff; border-radius: 12px; box-shadow: 0 2px 12px rgba(0,0,0,.08); display: flex; flex-direction: column; height: 80vh; }
#chat-messages { flex: 1; overflow-y: auto; padding: 1rem; }
.message { display: flex; margin: .5rem 0; }
.user-message { justify-content: flex-end; }
.message-content { padding: .6rem .9rem; border-radius: 14px; max-width: 75%; line-height: 1.4; }
.user-message .message-content { background: #0084ff; color: #fff; }
.bot-message .message-content { background: #eef1f4; color: #222; }
.typing-indicator span { display: inline-block; width: 6px; height: 6px; margin: 0 2px; border-radius: 50%; background: #999; }
#chat-form { display: flex; gap: .5rem; padding: 1rem; border-top: 1px solid #e3e6ea; }
#chat-input { flex: 1; padding: .6rem; border: 1px solid #ccd1d6; border-radius: 8px; }
#send-btn { padding: .6rem 1.2rem; border: 0; border-radius: 8px; background: #0084ff; color: #fff; }
#send-btn:disabled, #chat-input:disabled { opacity: .5; }
"#;

/// Full HTML page around an already rendered transcript. While `busy`, the
/// input and the submit button are disabled and the page refreshes itself so
/// the reply shows up once it lands.
pub fn render_page(session_id: &SessionId, transcript_html: &str, busy: bool) -> String {
    let disabled = if busy { " disabled" } else { "" };
    let refresh = if busy {
        r#"<meta http-equiv="refresh" content="1">"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="pt">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>Chat</title>
<style>{STYLE}</style>
</head>
<body>
<div class="chat-container" data-session-id="{session_id}">
<div id="chat-messages">{transcript_html}</div>
<form id="chat-form" method="post" action="/chat/{session_id}">
<input id="chat-input" name="message" type="text" autocomplete="off" autofocus{disabled}>
<button id="send-btn" type="submit"{disabled}>Enviar</button>
</form>
</div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_page_has_enabled_form() {
        let id = SessionId::parse("session-abc12345").unwrap();
        let page = render_page(&id, "<p>x</p>", false);
        assert!(page.contains(r#"action="/chat/session-abc12345""#));
        assert!(page.contains(r#"<div id="chat-messages"><p>x</p></div>"#));
        assert!(!page.contains("disabled>"));
        assert!(!page.contains("http-equiv"));
    }

    #[test]
    fn busy_page_disables_input_and_button() {
        let id = SessionId::parse("s1").unwrap();
        let page = render_page(&id, "", true);
        assert!(page.contains(r#"autofocus disabled>"#));
        assert!(page.contains(r#"type="submit" disabled>"#));
        assert!(page.contains(r#"http-equiv="refresh""#));
    }
}
