use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::BlobError;

/// SHA-256 digest identifying a blob's contents.
///
/// Everything outside this module sees digests as lowercase hex: API
/// responses, asset rows, ETags, and the on-disk layout all use the same
/// 64-character rendering.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Digest the given bytes.
    pub fn compute(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse the hex rendering back into a digest. Anything that is not
    /// exactly 64 hex characters is rejected.
    pub fn from_hex(s: &str) -> Result<Self, BlobError> {
        if s.len() != 64 {
            return Err(BlobError::InvalidDigest(format!(
                "digest must be 64 hex characters, not {}",
                s.len()
            )));
        }
        let bytes = hex::decode(s)
            .map_err(|e| BlobError::InvalidDigest(format!("bad hex: {e}")))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| BlobError::InvalidDigest("not a 32-byte digest".into()))?;
        Ok(Self(arr))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Leading two hex characters; the filesystem store fans blobs out
    /// into one directory per prefix.
    pub(crate) fn shard(&self) -> String {
        hex::encode(&self.0[..1])
    }

    /// Everything after the shard prefix, used as the blob's filename.
    pub(crate) fn rest(&self) -> String {
        hex::encode(&self.0[1..])
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.to_hex())
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
