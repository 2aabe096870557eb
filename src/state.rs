// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::services::chat_client::{ChatTransport, HttpChatClient};
use crate::services::widget_registry::WidgetRegistry;

pub type SharedState<T = HttpChatClient> = Arc<AppState<T>>;

pub struct AppState<T = HttpChatClient> {
    pub widgets: WidgetRegistry<T>,
}

impl<T> AppState<T>
where
    T: ChatTransport + Clone + 'static,
{
    pub fn new(transport: T, widget_ttl: Duration) -> Self {
        Self {
            widgets: WidgetRegistry::new(transport, widget_ttl),
        }
    }
}
