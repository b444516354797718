use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/instance", instance_routes())
        .nest("/auth", auth_routes())
        .nest("/guestbook", guestbook_routes())
        .nest("/assets", asset_routes())
}

fn instance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::instance::status))
        .route("/bootstrap", post(handlers::instance::bootstrap))
        .route("/reset", post(handlers::instance::reset))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::me))
}

fn guestbook_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::guestbook::list).post(handlers::guestbook::sign),
    )
}

fn asset_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::assets::list).post(handlers::assets::upload),
        )
        .route("/{id}/download", get(handlers::assets::download))
        .layer(handlers::assets::upload_body_limit())
}
