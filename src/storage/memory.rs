use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;

use super::store::{ChunkStore, chunk_not_found};
use crate::error::Result;

/// Chunk store kept entirely in process memory.
///
/// Layout mirrors the on-disk one: `file id -> chunk index -> payload`.
#[derive(Debug, Default, Clone)]
pub struct MemoryChunkStore {
    files: Arc<DashMap<String, DashMap<u32, Bytes>>>,
}

impl MemoryChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, file_id: &str, index: u32) -> bool {
        self.files
            .get(file_id)
            .map(|chunks| chunks.contains_key(&index))
            .unwrap_or(false)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn chunk_count(&self) -> usize {
        self.files.iter().map(|entry| entry.value().len()).sum()
    }

    /// Indices stored for `file_id`, ascending.
    pub fn indices(&self, file_id: &str) -> Vec<u32> {
        let mut indices: Vec<u32> = self
            .files
            .get(file_id)
            .map(|chunks| chunks.iter().map(|entry| *entry.key()).collect())
            .unwrap_or_default();
        indices.sort_unstable();
        indices
    }
}

#[async_trait]
impl ChunkStore for MemoryChunkStore {
    async fn put(&self, file_id: &str, index: u32, payload: Bytes) -> Result<()> {
        self.files
            .entry(file_id.to_string())
            .or_insert_with(DashMap::new)
            .insert(index, payload);
        Ok(())
    }

    async fn get(&self, file_id: &str, index: u32) -> Result<Bytes> {
        if let Some(chunks) = self.files.get(file_id)
            && let Some(payload) = chunks.get(&index)
        {
            return Ok(payload.value().clone());
        }

        Err(chunk_not_found(file_id, index))
    }
}
