use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{ClusterError, Result};

/// Longest file id a node accepts as a namespace.
const MAX_FILE_ID_LEN: usize = 128;

/// Key→bytes contract every node-side backend honours.
///
/// Keys are `(file_id, index)`. `put` overwrites, so storing the same chunk twice
/// is observably the same as storing it once. There is no delete.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    async fn put(&self, file_id: &str, index: u32, payload: Bytes) -> Result<()>;

    /// Fails with [`ClusterError::NotFound`] when the chunk was never stored.
    async fn get(&self, file_id: &str, index: u32) -> Result<Bytes>;
}

/// File ids double as directory names on disk-backed nodes, so only a
/// conservative alphabet is accepted.
pub fn validate_file_id(file_id: &str) -> Result<()> {
    if file_id.is_empty() || file_id.len() > MAX_FILE_ID_LEN {
        return Err(ClusterError::Validation(format!(
            "file id must be 1..={} characters",
            MAX_FILE_ID_LEN
        )));
    }
    if !file_id
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(ClusterError::Validation(format!(
            "file id {:?} contains unsupported characters",
            file_id
        )));
    }
    Ok(())
}

pub(crate) fn chunk_not_found(file_id: &str, index: u32) -> ClusterError {
    ClusterError::NotFound(format!("chunk {} of file {}", index, file_id))
}
