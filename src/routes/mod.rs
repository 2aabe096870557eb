// src/routes/mod.rs
pub mod chat;

use crate::services::chat_client::ChatTransport;
use crate::state::SharedState;
use axum::{Router, routing::get};
use chat::{new_widget_handler, page_handler, submit_handler};
use tower_http::trace::TraceLayer;

pub fn create_router<T>() -> Router<SharedState<T>>
where
    T: ChatTransport + Clone + 'static,
{
    Router::new()
        .route("/", get(new_widget_handler::<T>))
        .route(
            "/chat/{session_id}",
            get(page_handler::<T>).post(submit_handler::<T>),
        )
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}
