use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::extractors::form::AppForm;
use crate::models::instance::{
    validate_bootstrap_request, BootstrapRequest, BootstrapResponse, InstanceStatusResponse,
};
use crate::services::auth::AuthService;
use crate::services::instance::InstanceService;
use crate::state::AppState;

/// First-run check, used by the front page to decide whether to show the
/// bootstrap form.
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Result<Json<InstanceStatusResponse>, AppError> {
    let is_new = InstanceService::new(&state.db).is_new().await?;
    Ok(Json(InstanceStatusResponse { is_new }))
}

/// Claim a fresh instance: create the first user and hand back the
/// generated password, exactly once.
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn bootstrap(
    State(state): State<AppState>,
    AppForm(payload): AppForm<BootstrapRequest>,
) -> Result<impl IntoResponse, AppError> {
    let request = validate_bootstrap_request(&payload)?;

    let created = AuthService::new(&state.db)
        .create_user(
            &request.email,
            &request.username,
            request.display_name.as_deref(),
        )
        .await?;

    tracing::info!(user_id = created.user.id, "Instance bootstrapped");

    Ok((
        StatusCode::CREATED,
        Json(BootstrapResponse {
            user_id: created.user.id,
            username: created.user.username,
            password: created.password,
        }),
    ))
}

/// Wipe the instance back to its first-run state. Destroys the caller's
/// session along with everything else.
#[instrument(skip(auth_user, state, session), fields(user_id = auth_user.user_id))]
pub async fn reset(
    auth_user: AuthUser,
    State(state): State<AppState>,
    session: Session,
) -> Result<StatusCode, AppError> {
    InstanceService::new(&state.db).reset().await?;

    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session flush error: {e}")))?;

    tracing::info!("Instance reset");
    Ok(StatusCode::NO_CONTENT)
}
