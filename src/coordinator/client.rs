use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::time::Duration;

use super::types::{Chunk, FileId};
use crate::error::{ClusterError, Result};
use crate::storage::protocol::{
    ENDPOINT_SHARE_CHUNK, ENDPOINT_STORE_CHUNK, GetChunkResponse, ShareChunkRequest,
    StoreChunkRequest, decode_chunk, encode_chunk, get_chunk_path,
};

/// Transport the coordinator uses to talk to storage nodes.
///
/// `address` is always the node's base URL as announced to the registry.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Pushes the primary copy of `chunk`.
    async fn store_chunk(&self, address: &str, chunk: &Chunk) -> Result<()>;

    /// Pushes a redundant copy of `chunk`; `origin` is the primary's address.
    async fn share_chunk(&self, address: &str, chunk: &Chunk, origin: &str) -> Result<()>;

    /// Fails with [`ClusterError::NotFound`] when the node does not hold the chunk.
    async fn fetch_chunk(&self, address: &str, file_id: &FileId, index: u32) -> Result<Bytes>;
}

/// [`NodeClient`] over the nodes' JSON/HTTP API.
///
/// Every request is bounded by `timeout`; nothing is retried.
#[derive(Debug, Clone)]
pub struct HttpNodeClient {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl HttpNodeClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            timeout,
        }
    }

    async fn post_json<T: Serialize + Sync>(
        &self,
        address: &str,
        endpoint: &str,
        payload: &T,
    ) -> Result<()> {
        let url = format!("{}{}", address.trim_end_matches('/'), endpoint);
        let response = self
            .http_client
            .post(url)
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| ClusterError::Transport {
                address: address.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ClusterError::NodeRejected {
                address: address.to_string(),
                status: response.status(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl NodeClient for HttpNodeClient {
    async fn store_chunk(&self, address: &str, chunk: &Chunk) -> Result<()> {
        let payload = StoreChunkRequest {
            chunk: encode_chunk(&chunk.payload),
            index: chunk.index,
            file_id: chunk.file_id.to_string(),
        };
        self.post_json(address, ENDPOINT_STORE_CHUNK, &payload).await
    }

    async fn share_chunk(&self, address: &str, chunk: &Chunk, origin: &str) -> Result<()> {
        let payload = ShareChunkRequest {
            chunk: encode_chunk(&chunk.payload),
            index: chunk.index,
            file_id: chunk.file_id.to_string(),
            origin_node: origin.to_string(),
        };
        self.post_json(address, ENDPOINT_SHARE_CHUNK, &payload).await
    }

    async fn fetch_chunk(&self, address: &str, file_id: &FileId, index: u32) -> Result<Bytes> {
        let url = format!(
            "{}{}",
            address.trim_end_matches('/'),
            get_chunk_path(file_id.as_str(), index)
        );
        let transport = |source| ClusterError::Transport {
            address: address.to_string(),
            source,
        };

        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClusterError::NotFound(format!(
                "chunk {} of file {} on {}",
                index, file_id, address
            )));
        }
        if !response.status().is_success() {
            return Err(ClusterError::NodeRejected {
                address: address.to_string(),
                status: response.status(),
            });
        }

        let body: GetChunkResponse = response.json().await.map_err(transport)?;
        decode_chunk(&body.chunk)
    }
}
