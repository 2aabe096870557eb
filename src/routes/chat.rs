use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::{
    error::AppError,
    services::chat_client::ChatTransport,
    session::SessionId,
    state::{AppState, SharedState},
    templates::render_page,
    widget::ChatWidget,
};

#[derive(Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub message: String,
}

// One widget per page load.
pub async fn new_widget_handler<T>(State(state): State<SharedState<T>>) -> Redirect
where
    T: ChatTransport + Clone + 'static,
{
    let widget = state.widgets.create_widget().await;
    info!(session_id = %widget.session_id(), "widget created");
    Redirect::to(&page_path(widget.session_id().as_str()))
}

pub async fn page_handler<T>(
    State(state): State<SharedState<T>>,
    Path(session_id): Path<String>,
) -> Result<Html<String>, AppError>
where
    T: ChatTransport + Clone + 'static,
{
    let widget = find_widget(&state, &session_id).await?;

    let transcript = widget.render_html().await;
    Ok(Html(render_page(widget.session_id(), &transcript, widget.is_busy())))
}

pub async fn submit_handler<T>(
    State(state): State<SharedState<T>>,
    Path(session_id): Path<String>,
    Form(payload): Form<SubmitForm>,
) -> Result<Redirect, AppError>
where
    T: ChatTransport + Clone + 'static,
{
    let widget = find_widget(&state, &session_id).await?;

    widget.submit(&payload.message).await?;
    Ok(Redirect::to(&page_path(widget.session_id().as_str())))
}

// Ids the backend would reject can never name a widget, so they are not
// echoed back.
async fn find_widget<T>(state: &AppState<T>, raw: &str) -> Result<Arc<ChatWidget<T>>, AppError>
where
    T: ChatTransport + Clone + 'static,
{
    let session_id = SessionId::parse(raw)
        .map_err(|_| AppError::NotFound("unknown session".to_string()))?;
    state
        .widgets
        .get(&session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("unknown session {session_id}")))
}

fn page_path(session_id: &str) -> String {
    format!("/chat/{session_id}")
}
