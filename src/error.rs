// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failure of a single call to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The backend answered with a non-2xx status. `detail` is what the user sees.
    #[error("backend returned {status}: {detail}")]
    Server { status: u16, detail: String },
    /// The request never got a usable answer: network failure or a body that
    /// could not be decoded.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ChatError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Why a submission did not produce a bot message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a message is already being sent")]
    Busy,
    /// The task running the turn panicked or was shut down.
    #[error("the message could not be processed")]
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionIdError {
    #[error("session id must be 1 to 100 characters, got {0}")]
    Length(usize),
    #[error("session id contains invalid character {0:?}")]
    InvalidChar(char),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Errors surfaced by the widget host routes, rendered as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::EmptyMessage => AppError::BadRequest(err.to_string()),
            SubmitError::Busy => AppError::Conflict(err.to_string()),
            SubmitError::Interrupted => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
