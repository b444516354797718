use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, TransactionError, TransactionTrait,
};

use crate::entity::{asset, session, user};

/// True iff the user table is empty.
///
/// Shared by [`AuthService`](crate::services::auth::AuthService) and
/// [`InstanceService`] so the "is this a new instance?" check exists
/// exactly once.
pub async fn is_fresh<C: ConnectionTrait>(db: &C) -> Result<bool, DbErr> {
    Ok(user::Entity::find().one(db).await?.is_none())
}

/// Instance-level lifecycle operations.
pub struct InstanceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InstanceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn is_new(&self) -> Result<bool, DbErr> {
        is_fresh(self.db).await
    }

    /// Delete all assets, sessions, and users, returning the instance to
    /// its first-run state.
    ///
    /// Runs in a single transaction so a partial failure cannot leave
    /// assets pointing at deleted users. Blobs stay on disk; they are
    /// content-keyed and harmless without metadata rows.
    pub async fn reset(&self) -> Result<(), DbErr> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    asset::Entity::delete_many().exec(txn).await?;
                    session::Entity::delete_many().exec(txn).await?;
                    user::Entity::delete_many().exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) => e,
                TransactionError::Transaction(e) => e,
            })
    }
}
