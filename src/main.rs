use std::sync::Arc;

use linkpage::{
    config::AppConfig,
    db::{self, SqliteStore},
    kv::{KeyValueStore, MemoryStore},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present; env vars may already be set
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkpage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env()?;
    tracing::info!("Starting linkpage on {}:{}", config.host, config.port);
    tracing::info!("Base URL: {}", config.base_url);

    let backend: Arc<dyn KeyValueStore> = if config.uses_memory_backend() {
        tracing::warn!("Using in-memory storage; records are lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SqliteStore::new(db::connect(&config.database_url).await?))
    };

    let bind_addr = config.bind_addr();
    let state = Arc::new(AppState::new(backend, config));

    // Seed every record up front
    let profile = state.stores.profile.get().await;
    state.stores.admin.get().await;
    state.stores.analytics.get().await;
    tracing::info!("Serving profile '{}'", profile.page_url);

    let app = linkpage::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
