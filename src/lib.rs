pub mod config;
pub mod error;
pub mod markdown;
pub mod message;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod templates;
pub mod transcript;
pub mod widget;

pub use markdown::format_markdown;
pub use widget::ChatWidget;
