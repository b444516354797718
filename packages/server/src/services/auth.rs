use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr, TransactionError, TransactionTrait,
};
use thiserror::Error;

use crate::entity::user;
use crate::services::instance;
use crate::utils::{hash, password};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("a user already exists in this instance")]
    InstanceExists,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("username or email is already taken")]
    Taken,
    #[error("password hash error: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// A freshly bootstrapped user together with the generated plaintext
/// password. The password exists only in this value; it is shown to the
/// caller once and cannot be recovered afterwards.
pub struct CreatedUser {
    pub user: user::Model,
    pub password: String,
}

/// Account creation and credential verification.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// True iff no user has been registered yet.
    pub async fn is_new_instance(&self) -> Result<bool, AuthError> {
        Ok(instance::is_fresh(self.db).await?)
    }

    /// Create the first (and only) user of this instance with a generated
    /// passphrase.
    ///
    /// The emptiness check and the insert run in one transaction, so two
    /// racing bootstrap submissions cannot both succeed.
    pub async fn create_user(
        &self,
        email: &str,
        username: &str,
        display_name: Option<&str>,
    ) -> Result<CreatedUser, AuthError> {
        let plaintext = password::generate();
        let password_hash =
            hash::hash_password(&plaintext).map_err(|e| AuthError::PasswordHash(e.to_string()))?;

        let email = email.to_owned();
        let username = username.to_owned();
        let display_name = display_name.map(str::to_owned);

        let user = self
            .db
            .transaction::<_, user::Model, AuthError>(|txn| {
                Box::pin(async move {
                    if !instance::is_fresh(txn).await? {
                        return Err(AuthError::InstanceExists);
                    }

                    user::ActiveModel {
                        email: Set(email),
                        username: Set(username),
                        display_name: Set(display_name),
                        password_hash: Set(password_hash),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(|e| match e.sql_err() {
                        Some(SqlErr::UniqueConstraintViolation(_)) => AuthError::Taken,
                        _ => AuthError::from(e),
                    })
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) => AuthError::Db(e),
                TransactionError::Transaction(e) => e,
            })?;

        Ok(CreatedUser {
            user,
            password: plaintext,
        })
    }

    /// Check a username/password pair and return the user's id.
    ///
    /// Unknown usernames and wrong passwords fail identically so the
    /// caller cannot enumerate accounts.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<i32, AuthError> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = hash::verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.id)
    }
}
