use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;
use crate::session::USER_ID_KEY;

/// Authenticated user resolved from the session cookie.
///
/// Add this as a handler parameter to require a logged-in caller.
pub struct AuthUser {
    pub user_id: i32,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(format!("session layer missing: {msg}")))?;

        let user_id: Option<i32> = session
            .get(USER_ID_KEY)
            .await
            .map_err(|e| AppError::Internal(format!("session load error: {e}")))?;

        match user_id {
            Some(user_id) => Ok(AuthUser { user_id }),
            None => Err(AppError::AuthRequired),
        }
    }
}
