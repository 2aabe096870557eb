// src/widget.rs
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::error::{ChatError, SubmitError};
use crate::message::{ChatRequest, Message};
use crate::services::chat_client::ChatTransport;
use crate::session::SessionId;
use crate::transcript::Transcript;

/// Shown when the backend could not be reached or its reply could not be read.
pub const APOLOGY_MESSAGE: &str = "Peço desculpa, ocorreu um erro ao processar o seu pedido. \
Por favor, tente novamente ou contacte a Linha de Avarias: 800 506 506.";

/// One chat widget: a session id, a transcript and the transport that carries
/// its turns. At most one request is in flight at a time; while it is, the
/// input counts as disabled and further submissions are refused.
pub struct ChatWidget<T> {
    session_id: SessionId,
    transport: T,
    transcript: RwLock<Transcript>,
    busy: AtomicBool,
}

// Re-enables input when dropped, whichever way the turn ends. Set up on
// the turn's task so it lives exactly as long as the turn.
struct InputLock<'a>(&'a AtomicBool);

impl Drop for InputLock<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T: ChatTransport + 'static> ChatWidget<T> {
    pub fn new(transport: T) -> Self {
        Self::with_session(transport, SessionId::generate())
    }

    pub fn with_session(transport: T, session_id: SessionId) -> Self {
        Self {
            session_id,
            transport,
            transcript: RwLock::new(Transcript::new()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// True while a request is in flight, i.e. while input is disabled.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Snapshot of the transcript.
    pub async fn transcript(&self) -> Transcript {
        self.transcript.read().await.clone()
    }

    pub async fn render_html(&self) -> String {
        let transcript = self.transcript.read().await;
        transcript.render_html(self.is_busy())
    }

    /// Runs one turn and returns the bot message it appended.
    ///
    /// Blank input and input arriving mid-turn are refused without touching
    /// the transcript or the network. Otherwise the trimmed text is appended
    /// as a user message and sent; the reply, the server's error detail, or
    /// the fixed apology is appended as the bot message.
    ///
    /// The turn runs on its own task, so dropping the returned future does not
    /// cancel the call: the bot message still lands once the backend answers.
    pub async fn submit(self: &Arc<Self>, input: &str) -> Result<Message, SubmitError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(SubmitError::EmptyMessage);
        }
        self.disable_input()?;

        let widget = Arc::clone(self);
        let text = text.to_string();
        let turn = tokio::spawn(async move {
            let _input_lock = InputLock(&widget.busy);
            widget.run_turn(text).await
        });

        turn.await.map_err(|err| {
            error!(session_id = %self.session_id, error = %err, "chat turn aborted");
            SubmitError::Interrupted
        })
    }

    async fn run_turn(&self, text: String) -> Message {
        self.transcript.write().await.push(Message::user(text.as_str()));

        let request = ChatRequest {
            session_id: self.session_id.to_string(),
            message: text,
        };

        let reply = match self.transport.send(&request).await {
            Ok(response) => {
                info!(session_id = %self.session_id, "reply received");
                response.reply
            }
            Err(ChatError::Server { status, detail }) => {
                warn!(session_id = %self.session_id, status, %detail, "backend rejected message");
                detail
            }
            Err(err @ ChatError::Transport(_)) => {
                warn!(session_id = %self.session_id, error = %err, "chat request failed");
                APOLOGY_MESSAGE.to_string()
            }
        };

        let message = Message::bot(reply);
        self.transcript.write().await.push(message.clone());
        message
    }

    fn disable_input(&self) -> Result<(), SubmitError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| SubmitError::Busy)
    }
}
