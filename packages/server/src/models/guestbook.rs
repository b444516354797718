use serde::Serialize;

use crate::entity::guest;
use crate::error::AppError;
use crate::models::instance::validate_email;

/// A validated guestbook submission.
pub struct SignRequest {
    pub name: String,
    pub email: String,
}

/// Pull `name` and `email` out of raw form fields.
///
/// The form is read as raw pairs rather than a typed struct because the
/// honeypot field's name is configurable and must stay invisible here.
pub fn parse_sign_request(fields: &[(String, String)]) -> Result<SignRequest, AppError> {
    let value_of = |key: &str| {
        fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.trim())
            .unwrap_or_default()
    };

    let name = value_of("name");
    let email = value_of("email");
    if name.is_empty() || email.is_empty() {
        return Err(AppError::Validation("Name and email are required".into()));
    }
    validate_email(email)?;

    Ok(SignRequest {
        name: name.to_string(),
        email: email.to_string(),
    })
}

/// Public listing entry. Emails are collected but never listed.
#[derive(Serialize)]
pub struct GuestbookEntry {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize)]
pub struct GuestbookListResponse {
    pub entries: Vec<GuestbookEntry>,
    pub total: u64,
}

impl From<guest::Model> for GuestbookEntry {
    fn from(model: guest::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
