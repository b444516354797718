use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::models::assets::{AssetListResponse, AssetResponse};
use crate::services::assets::AssetService;
use crate::state::AppState;

pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(64 * 1024 * 1024) // 64 MB
}

/// Handle an asset upload (`multipart/form-data`: `name` text field,
/// `contents` file field).
#[instrument(skip(auth_user, state, multipart), fields(user_id = auth_user.user_id))]
pub async fn upload(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut name: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut contents: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read name: {e}")))?;
                name = Some(text);
            }
            Some("contents") => {
                file_name = field.file_name().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?;
                contents = Some(bytes.to_vec());
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let contents =
        contents.ok_or_else(|| AppError::Validation("Missing 'contents' field".into()))?;

    // Fall back to the upload filename if no label was given.
    let name = name
        .filter(|n| !n.trim().is_empty())
        .or(file_name)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Asset name is required".into()))?;

    let asset = AssetService::new(&state.db, &*state.blobs)
        .create_asset(&name, &contents, auth_user.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(AssetResponse::from(asset))))
}

/// List the caller's assets.
#[instrument(skip(auth_user, state), fields(user_id = auth_user.user_id))]
pub async fn list(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<AssetListResponse>, AppError> {
    let rows = AssetService::new(&state.db, &*state.blobs)
        .list_for_user(auth_user.user_id)
        .await?;

    let total = rows.len() as u64;
    let assets = rows.into_iter().map(AssetResponse::from).collect();

    Ok(Json(AssetListResponse { assets, total }))
}

/// Stream an owned asset back to the client.
#[instrument(skip(auth_user, state, headers), fields(user_id = auth_user.user_id, asset_id))]
pub async fn download(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(asset_id): Path<i32>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (asset, reader) = AssetService::new(&state.db, &*state.blobs)
        .open(auth_user.user_id, asset_id)
        .await?;

    // The content hash is a perfect validator: same hash, same bytes.
    let etag = format!("\"{}\"", asset.content_hash);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH) {
        if let Ok(value) = if_none_match.to_str() {
            if if_none_match_covers(value, &etag) {
                return Ok(StatusCode::NOT_MODIFIED.into_response());
            }
        }
    }

    let mime = mime_guess::from_path(&asset.name).first_or_octet_stream();
    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&asset.name),
        )
        .header(header::ETAG, etag)
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Check an `If-None-Match` header value against our entity tag.
///
/// The header may carry a comma-separated list, `W/`-prefixed weak
/// validators, or `*`. A weak match is fine here: the tag is a content
/// hash, so any match means the same bytes.
fn if_none_match_covers(header_value: &str, etag: &str) -> bool {
    header_value.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}

/// Build a safe `Content-Disposition` value from a user-supplied label.
fn content_disposition_value(name: &str) -> String {
    let safe: String = name
        .chars()
        .filter(|c| (c.is_ascii_graphic() || *c == ' ') && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let safe = if safe.trim().is_empty() {
        "download".to_string()
    } else {
        safe
    };
    format!("inline; filename=\"{safe}\"")
}
