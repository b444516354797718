//! Cookie-session plumbing.
//!
//! The session itself lives server-side in the `session` table; the
//! client holds a signed `__session` cookie carrying only the session id.
//! The only meaningful session key is [`USER_ID_KEY`].

mod store;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};

pub use store::SeaOrmSessionStore;

/// Session key holding the authenticated user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Build the session middleware from configuration.
pub fn layer(
    db: DatabaseConnection,
    config: &crate::config::SessionConfig,
) -> anyhow::Result<SessionManagerLayer<SeaOrmSessionStore, SignedCookie>> {
    let key = Key::try_from(config.secret.as_bytes())
        .context("session.secret is too short to derive a signing key")?;

    Ok(SessionManagerLayer::new(SeaOrmSessionStore::new(db))
        .with_name("__session")
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(config.secure)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            config.max_age_secs as i64,
        )))
        .with_signed(key))
}
