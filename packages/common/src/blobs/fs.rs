use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::BufReader;

use super::digest::ContentDigest;
use super::error::BlobError;
use super::{BlobStore, BoxReader};

/// Filesystem-backed content-addressed blob store.
///
/// Layout is git-style: `{root}/{first 2 hex chars}/{remaining 62 hex chars}`.
/// Writes go to a temp file under `{root}/.tmp` and are renamed into place,
/// so a blob path either holds complete content or nothing.
pub struct FsBlobStore {
    root: PathBuf,
    max_size: u64,
}

impl FsBlobStore {
    pub async fn new(root: PathBuf, max_size: u64) -> Result<Self, BlobError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self { root, max_size })
    }

    fn blob_path(&self, digest: &ContentDigest) -> PathBuf {
        self.root.join(digest.shard()).join(digest.rest())
    }

    fn temp_path(&self) -> PathBuf {
        self.root.join(".tmp").join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, data: &[u8]) -> Result<ContentDigest, BlobError> {
        if data.len() as u64 > self.max_size {
            return Err(BlobError::TooLarge {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let digest = ContentDigest::compute(data);
        let path = self.blob_path(&digest);
        if path.exists() {
            // Identical content already stored.
            return Ok(digest);
        }

        let temp = self.temp_path();
        if let Err(e) = fs::write(&temp, data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        if let Err(e) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }

        Ok(digest)
    }

    async fn get_stream(&self, digest: &ContentDigest) -> Result<BoxReader, BlobError> {
        match fs::File::open(self.blob_path(digest)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BlobError::NotFound(digest.to_hex()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, digest: &ContentDigest) -> Result<bool, BlobError> {
        Ok(fs::try_exists(self.blob_path(digest)).await?)
    }

    async fn delete(&self, digest: &ContentDigest) -> Result<bool, BlobError> {
        match fs::remove_file(self.blob_path(digest)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
