use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::types::{FileId, FileRecord};
use crate::error::{ClusterError, Result};

/// In-memory index of published files. Nothing survives a coordinator restart.
#[derive(Debug, Default)]
pub struct FileMetadataStore {
    records: DashMap<FileId, FileRecord>,
}

impl FileMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `record` visible to retrieval. Records are write-once.
    pub fn publish(&self, record: FileRecord) -> Result<()> {
        match self.records.entry(record.file_id.clone()) {
            Entry::Occupied(_) => Err(ClusterError::Validation(format!(
                "file {} is already published",
                record.file_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    pub fn get(&self, file_id: &FileId) -> Option<FileRecord> {
        self.records.get(file_id).map(|entry| entry.value().clone())
    }

    pub fn list(&self) -> Vec<FileRecord> {
        let mut records: Vec<FileRecord> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
