use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Characters allowed in usernames besides letters and digits.
const USERNAME_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~.";

/// Loader-style payload for the first-run check.
#[derive(Serialize)]
pub struct InstanceStatusResponse {
    pub is_new: bool,
}

/// Form body for claiming a fresh instance.
#[derive(Deserialize)]
pub struct BootstrapRequest {
    pub email: String,
    pub username: String,
    /// Optional; the username stands in when absent.
    pub display_name: Option<String>,
}

/// Successful bootstrap. `password` is the generated plaintext, shown
/// here and nowhere else.
#[derive(Serialize)]
pub struct BootstrapResponse {
    pub user_id: i32,
    pub username: String,
    pub password: String,
}

/// A bootstrap submission after trimming and validation.
pub struct ValidatedBootstrap {
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
}

pub fn validate_bootstrap_request(
    payload: &BootstrapRequest,
) -> Result<ValidatedBootstrap, AppError> {
    let email = payload.email.trim();
    let username = payload.username.trim();
    if email.is_empty() || username.is_empty() {
        return Err(AppError::Validation("Email and username are required".into()));
    }
    validate_email(email)?;
    validate_username(username)?;

    // A blank display name means "use the username".
    let display_name = payload
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    if let Some(name) = &display_name {
        if name.chars().count() > 64 {
            return Err(AppError::Validation(
                "Display name must be at most 64 characters".into(),
            ));
        }
    }

    Ok(ValidatedBootstrap {
        email: email.to_string(),
        username: username.to_string(),
        display_name,
    })
}

pub fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(3..=64).contains(&len) {
        return Err(AppError::Validation(
            "Username must be 3-64 characters".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || USERNAME_SPECIALS.contains(c))
    {
        return Err(AppError::Validation(format!(
            "Usernames can only contain letters, numbers, and printable characters ({USERNAME_SPECIALS})"
        )));
    }
    if username.starts_with('.') || username.ends_with('.') || username.contains("..") {
        return Err(AppError::Validation(
            "Dots cannot be the first or last character of a username, and cannot appear consecutively".into(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    let invalid = || AppError::Validation("Please provide a valid email address".into());
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(())
}
