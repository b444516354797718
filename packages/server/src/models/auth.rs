use serde::{Deserialize, Serialize};

use crate::entity::user;
use crate::error::AppError;

/// Form body for logging in.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(
            "Please provide a username and password.".into(),
        ));
    }
    Ok(())
}

/// Current authenticated user's profile.
#[derive(Serialize)]
pub struct MeResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl From<user::Model> for MeResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
        }
    }
}
