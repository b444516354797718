use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tattr_common::blobs::BlobStore;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub blobs: Arc<dyn BlobStore>,
    pub config: AppConfig,
}
