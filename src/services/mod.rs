pub mod chat_client;
pub mod widget_registry;
