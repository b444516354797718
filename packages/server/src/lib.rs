pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod utils;

use crate::state::AppState;

/// Build the application router with the session layer attached.
pub fn build_router(state: AppState) -> anyhow::Result<axum::Router> {
    let session_layer = session::layer(state.db.clone(), &state.config.session)?;

    Ok(axum::Router::new()
        .nest("/api", routes::api_routes())
        .layer(session_layer)
        .with_state(state))
}
