use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Json,
};
use sea_orm::EntityTrait;
use tower_sessions::Session;
use tracing::instrument;

use crate::entity::user;
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::extractors::form::AppForm;
use crate::models::auth::{validate_login_request, LoginRequest, MeResponse};
use crate::services::auth::AuthService;
use crate::session::USER_ID_KEY;
use crate::state::AppState;

/// Handle a login form submission.
///
/// On success the session id is cycled, the user id stored, and the
/// client redirected home; the cookie rides along on the redirect.
#[instrument(skip(state, session, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    AppForm(payload): AppForm<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_login_request(&payload)?;

    let username = payload.username.trim();
    let user_id = AuthService::new(&state.db)
        .verify_credentials(username, &payload.password)
        .await?;

    // New session id on privilege change.
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session cycle error: {e}")))?;
    session
        .insert(USER_ID_KEY, user_id)
        .await
        .map_err(|e| AppError::Internal(format!("session write error: {e}")))?;

    Ok(Redirect::to("/"))
}

/// Destroy the session and send the client home.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session flush error: {e}")))?;

    Ok(Redirect::to("/"))
}

/// Return the current authenticated user's profile.
///
/// A session that outlives its user (e.g. after an instance reset) is
/// treated as not logged in.
#[instrument(skip(auth_user, state), fields(user_id = auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AppError> {
    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::AuthRequired)?;

    Ok(Json(MeResponse::from(user)))
}
