#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chat_widget::error::ChatError;
use chat_widget::message::{ChatRequest, ChatResponse};
use chat_widget::services::chat_client::ChatTransport;
use tokio::sync::Notify;

#[derive(Clone, Debug)]
pub enum Outcome {
    Reply(String),
    Server(u16, String),
    Transport,
}

/// Answers every request with the same outcome and records what it was sent.
/// With a gate, each call waits for `release()` before answering.
#[derive(Clone)]
pub struct ScriptedTransport {
    outcome: Outcome,
    calls: Arc<Mutex<Vec<ChatRequest>>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    pub fn new(outcome: Outcome) -> Self {
        Self { outcome, calls: Arc::new(Mutex::new(Vec::new())), gate: None }
    }

    pub fn replying(reply: &str) -> Self {
        Self::new(Outcome::Reply(reply.to_string()))
    }

    pub fn gated(outcome: Outcome) -> Self {
        Self { gate: Some(Arc::new(Notify::new())), ..Self::new(outcome) }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.outcome {
            Outcome::Reply(reply) => Ok(ChatResponse { reply: reply.clone(), session_id: None }),
            Outcome::Server(status, detail) => {
                Err(ChatError::Server { status: *status, detail: detail.clone() })
            }
            Outcome::Transport => Err(ChatError::transport("connection refused")),
        }
    }
}
