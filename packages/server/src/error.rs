use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use tattr_common::blobs::BlobError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `AUTH_REQUIRED`, `INVALID_CREDENTIALS`, `INSTANCE_EXISTS`,
    /// `USERNAME_TAKEN`, `NOT_FOUND`, `INTERNAL_ERROR`.
    pub code: &'static str,
    /// Human-readable error description.
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    AuthRequired,
    /// Uniform message for unknown username and bad password alike, so the
    /// response never reveals which check failed.
    InvalidCredentials,
    InstanceExists,
    UsernameTaken,
    NotFound(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::AuthRequired => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "AUTH_REQUIRED",
                    message: "Authentication required".into(),
                },
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "INVALID_CREDENTIALS",
                    message: "Invalid username or password.".into(),
                },
            ),
            AppError::InstanceExists => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "INSTANCE_EXISTS",
                    message: "A user already exists in this instance.".into(),
                },
            ),
            AppError::UsernameTaken => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "USERNAME_TAKEN",
                    message: "Username or email is already taken".into(),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred.".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<crate::services::auth::AuthError> for AppError {
    fn from(err: crate::services::auth::AuthError) -> Self {
        use crate::services::auth::AuthError;
        match err {
            AuthError::InstanceExists => AppError::InstanceExists,
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::Taken => AppError::UsernameTaken,
            AuthError::PasswordHash(detail) => AppError::Internal(detail),
            AuthError::Db(e) => AppError::from(e),
        }
    }
}

impl From<crate::services::assets::AssetError> for AppError {
    fn from(err: crate::services::assets::AssetError) -> Self {
        use crate::services::assets::AssetError;
        match err {
            AssetError::NotFound => AppError::NotFound("Asset not found".into()),
            AssetError::Blob(e) => AppError::from(e),
            AssetError::Db(e) => AppError::from(e),
        }
    }
}

impl From<BlobError> for AppError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::NotFound(digest) => {
                AppError::NotFound(format!("Blob {digest} not found"))
            }
            BlobError::TooLarge { actual, limit } => AppError::Validation(format!(
                "File exceeds maximum size of {limit} bytes (got {actual})"
            )),
            other => AppError::Internal(other.to_string()),
        }
    }
}
