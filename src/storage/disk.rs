use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::store::{ChunkStore, chunk_not_found, validate_file_id};
use crate::error::Result;

/// Chunk store persisting every chunk as `<root>/<file id>/chunk_<index>`.
#[derive(Debug, Clone)]
pub struct DiskChunkStore {
    root: PathBuf,
}

impl DiskChunkStore {
    /// Opens (and creates if needed) the chunk directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::info!("Chunk directory: {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn chunk_path(&self, file_id: &str, index: u32) -> PathBuf {
        self.root.join(file_id).join(format!("chunk_{}", index))
    }
}

#[async_trait]
impl ChunkStore for DiskChunkStore {
    async fn put(&self, file_id: &str, index: u32, payload: Bytes) -> Result<()> {
        validate_file_id(file_id)?;

        let file_dir = self.root.join(file_id);
        tokio::fs::create_dir_all(&file_dir).await?;

        // Write next to the target and rename so a concurrent reader never sees a torn chunk.
        let path = self.chunk_path(file_id, index);
        let tmp = file_dir.join(format!(".chunk_{}.tmp-{:016x}", index, rand::random::<u64>()));
        tokio::fs::write(&tmp, &payload).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn get(&self, file_id: &str, index: u32) -> Result<Bytes> {
        validate_file_id(file_id)?;

        match tokio::fs::read(self.chunk_path(file_id, index)).await {
            Ok(payload) => Ok(Bytes::from(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(chunk_not_found(file_id, index)),
            Err(e) => Err(e.into()),
        }
    }
}
