use std::sync::Arc;
use std::time::Duration;

use tower_sessions::ExpiredDeletion;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tattr_common::blobs::FsBlobStore;
use tattr_server::config::AppConfig;
use tattr_server::database;
use tattr_server::session::SeaOrmSessionStore;
use tattr_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    info!("Connected to database");

    let blobs = FsBlobStore::new(
        config.storage.root.clone().into(),
        config.storage.max_blob_size,
    )
    .await?;

    // Expired session rows are filtered at load time but still take up
    // space; purge them on an interval.
    let cleanup_store = SeaOrmSessionStore::new(db.clone());
    let cleanup_interval = Duration::from_secs(config.session.cleanup_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            if let Err(e) = cleanup_store.delete_expired().await {
                warn!("Session cleanup failed: {}", e);
            }
        }
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        db,
        blobs: Arc::new(blobs),
        config,
    };
    let app = tattr_server::build_router(state)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Tattr listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
