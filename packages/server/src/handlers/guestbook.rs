use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::instrument;

use crate::entity::guest;
use crate::error::AppError;
use crate::models::guestbook::{parse_sign_request, GuestbookEntry, GuestbookListResponse};
use crate::state::AppState;
use crate::utils::honeypot::Honeypot;

/// Handle a guestbook signature.
///
/// Raw form pairs are inspected for the honeypot before normal parsing.
/// Bot submissions are stored flagged and answered exactly like human
/// ones, so automated signers learn nothing from the response.
#[instrument(skip(state, fields))]
pub async fn sign(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let honeypot = Honeypot::new(state.config.guestbook.honeypot_field.clone());
    let is_bot = honeypot.is_bot(&fields);
    if is_bot {
        tracing::debug!("Honeypot tripped; recording entry as bot");
    }

    let request = parse_sign_request(&fields)?;

    guest::ActiveModel {
        name: Set(request.name),
        email: Set(request.email),
        is_bot: Set(is_bot),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(Redirect::to("/"))
}

/// List guestbook entries, oldest first. Bot-flagged rows are kept in the
/// table but never shown.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<GuestbookListResponse>, AppError> {
    let rows = guest::Entity::find()
        .filter(guest::Column::IsBot.eq(false))
        .order_by_asc(guest::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let total = rows.len() as u64;
    let entries = rows.into_iter().map(GuestbookEntry::from).collect();

    Ok(Json(GuestbookListResponse { entries, total }))
}
