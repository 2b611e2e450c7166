use bytes::Bytes;
use std::sync::Arc;

use super::client::{HttpNodeClient, NodeClient};
use super::metadata::FileMetadataStore;
use super::reconstruction::reconstruct;
use super::replication::distribute_all;
use super::splitter::split;
use super::types::{FileId, FileRecord};
use crate::config::CoordinatorSettings;
use crate::error::{ClusterError, Result};
use crate::registry::service::NodeRegistry;

/// The coordinator: owns the file index and drives uploads and retrievals against
/// the nodes currently in the registry.
pub struct Coordinator {
    registry: Arc<NodeRegistry>,
    metadata: FileMetadataStore,
    client: Arc<dyn NodeClient>,
    settings: CoordinatorSettings,
}

impl Coordinator {
    pub fn new(
        registry: Arc<NodeRegistry>,
        client: Arc<dyn NodeClient>,
        settings: CoordinatorSettings,
    ) -> Arc<Self> {
        Arc::new(Self {
            registry,
            metadata: FileMetadataStore::new(),
            client,
            settings,
        })
    }

    /// Coordinator talking to nodes over HTTP.
    pub fn with_http(registry: Arc<NodeRegistry>, settings: CoordinatorSettings) -> Arc<Self> {
        let client = Arc::new(HttpNodeClient::new(settings.request_timeout));
        Self::new(registry, client, settings)
    }

    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    pub fn metadata(&self) -> &FileMetadataStore {
        &self.metadata
    }

    pub fn settings(&self) -> &CoordinatorSettings {
        &self.settings
    }

    /// Splits `data`, distributes every chunk and publishes the file record.
    ///
    /// The record only becomes visible once every chunk has been stored on its primary
    /// and on every other node. On failure nothing is published and nothing is rolled
    /// back on the nodes.
    pub async fn upload(&self, file_name: &str, data: Bytes) -> Result<FileRecord> {
        let snapshot = self.registry.snapshot();
        if snapshot.is_empty() {
            return Err(ClusterError::NoNodesAvailable);
        }

        let file_id = FileId::generate();
        let chunks = split(&file_id, &data, self.settings.chunk_size)?;

        tracing::info!(
            "Uploading {} as {} ({} bytes, {} chunks, {} nodes)",
            file_name,
            file_id,
            data.len(),
            chunks.len(),
            snapshot.len()
        );

        let placements = distribute_all(self.client.as_ref(), &chunks, &snapshot)
            .await
            .map_err(|e| ClusterError::PartialUpload(Box::new(e)))?;

        let record = FileRecord {
            file_id,
            file_name: file_name.to_string(),
            chunk_count: chunks.len() as u32,
            size: data.len() as u64,
            placements,
        };
        self.metadata.publish(record.clone())?;

        tracing::info!("Upload of {} complete", record.file_id);
        Ok(record)
    }

    /// Reassembles a previously uploaded file.
    pub async fn retrieve(&self, file_id: &FileId) -> Result<(FileRecord, Bytes)> {
        let record = self
            .metadata
            .get(file_id)
            .ok_or_else(|| ClusterError::NotFound(format!("file {}", file_id)))?;

        let data = reconstruct(self.client.as_ref(), &self.registry, &record)
            .await
            .map_err(|e| ClusterError::Reconstruction(Box::new(e)))?;

        Ok((record, data))
    }
}
