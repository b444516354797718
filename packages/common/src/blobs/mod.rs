//! Content-addressed blob storage.
//!
//! Blobs are keyed by the SHA-256 digest of their content, so storing the
//! same bytes twice is a no-op and identical uploads deduplicate naturally.

mod digest;
mod error;
mod fs;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

pub use digest::ContentDigest;
pub use error::BlobError;
pub use fs::FsBlobStore;

/// A boxed async reader returned by streaming reads.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Content-addressed blob storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under its content digest and return the digest.
    ///
    /// Storing bytes that are already present is a no-op.
    async fn put(&self, data: &[u8]) -> Result<ContentDigest, BlobError>;

    /// Read the full contents of a blob.
    async fn get(&self, digest: &ContentDigest) -> Result<Vec<u8>, BlobError> {
        let mut reader = self.get_stream(digest).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await.map_err(BlobError::Io)?;
        Ok(buf)
    }

    /// Open a blob as a streaming async reader.
    async fn get_stream(&self, digest: &ContentDigest) -> Result<BoxReader, BlobError>;

    /// Check whether a blob exists.
    async fn exists(&self, digest: &ContentDigest) -> Result<bool, BlobError>;

    /// Delete a blob. Returns `false` if it did not exist.
    async fn delete(&self, digest: &ContentDigest) -> Result<bool, BlobError>;
}
