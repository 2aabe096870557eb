use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chat_widget::{
    config::Config,
    routes,
    services::chat_client::HttpChatClient,
    state::AppState,
};

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_widget=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let client = HttpChatClient::new(&config.backend_url, &config.endpoint_path);
    tracing::info!(endpoint = client.endpoint(), "chat backend configured");

    let state = Arc::new(AppState::new(client, config.widget_ttl));
    state.widgets.spawn_purger(PURGE_INTERVAL);

    let app = routes::create_router().with_state(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("chat widget running at http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
