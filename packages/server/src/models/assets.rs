use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::asset;

/// Response DTO for a single asset.
#[derive(Serialize)]
pub struct AssetResponse {
    pub id: i32,
    pub name: String,
    /// SHA-256 content hash, 64-char lowercase hex.
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct AssetListResponse {
    pub assets: Vec<AssetResponse>,
    pub total: u64,
}

impl From<asset::Model> for AssetResponse {
    fn from(model: asset::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            content_hash: model.content_hash,
            created_at: model.created_at,
        }
    }
}
