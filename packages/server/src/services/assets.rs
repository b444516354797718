use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tattr_common::blobs::{BlobError, BlobStore, BoxReader, ContentDigest};
use thiserror::Error;

use crate::entity::asset;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found")]
    NotFound,
    #[error(transparent)]
    Blob(#[from] BlobError),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Content-addressed asset persistence: blob first, metadata row second.
pub struct AssetService<'a> {
    db: &'a DatabaseConnection,
    blobs: &'a dyn BlobStore,
}

impl<'a> AssetService<'a> {
    pub fn new(db: &'a DatabaseConnection, blobs: &'a dyn BlobStore) -> Self {
        Self { db, blobs }
    }

    /// Store `contents` under its digest and record a metadata row.
    ///
    /// The blob write is idempotent, so if the row insert fails the worst
    /// outcome is an unreferenced blob. No rollback is attempted.
    pub async fn create_asset(
        &self,
        name: &str,
        contents: &[u8],
        user_id: i32,
    ) -> Result<asset::Model, AssetError> {
        let digest = self.blobs.put(contents).await?;

        let row = asset::ActiveModel {
            name: Set(name.to_owned()),
            content_hash: Set(digest.to_hex()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(row)
    }

    /// All assets owned by `user_id`, oldest first.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<asset::Model>, AssetError> {
        Ok(asset::Entity::find()
            .filter(asset::Column::UserId.eq(user_id))
            .order_by_asc(asset::Column::CreatedAt)
            .all(self.db)
            .await?)
    }

    /// Open an owned asset for streaming. Assets belonging to other users
    /// are reported as not found, never as forbidden.
    pub async fn open(
        &self,
        user_id: i32,
        asset_id: i32,
    ) -> Result<(asset::Model, BoxReader), AssetError> {
        let row = asset::Entity::find_by_id(asset_id)
            .one(self.db)
            .await?
            .ok_or(AssetError::NotFound)?;
        if row.user_id != user_id {
            return Err(AssetError::NotFound);
        }

        let digest = ContentDigest::from_hex(&row.content_hash)?;
        let reader = self.blobs.get_stream(&digest).await?;
        Ok((row, reader))
    }
}
