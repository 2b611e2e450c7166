use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
};
use std::sync::Arc;

use super::protocol::{
    GetChunkResponse, ShareChunkRequest, StoreChunkRequest, decode_chunk, encode_chunk,
};
use super::store::{ChunkStore, validate_file_id};
use crate::error::{ClusterError, Result};

async fn store_encoded(
    store: &dyn ChunkStore,
    file_id: &str,
    index: u32,
    encoded: &str,
) -> Result<usize> {
    validate_file_id(file_id)?;
    let payload = decode_chunk(encoded)?;
    let len = payload.len();
    store.put(file_id, index, payload).await?;
    Ok(len)
}

pub async fn handle_store_chunk(
    Extension(store): Extension<Arc<dyn ChunkStore>>,
    Json(req): Json<StoreChunkRequest>,
) -> (StatusCode, String) {
    match store_encoded(store.as_ref(), &req.file_id, req.index, &req.chunk).await {
        Ok(len) => {
            tracing::info!(
                "Stored chunk {} for file {} ({} bytes)",
                req.index,
                req.file_id,
                len
            );
            (StatusCode::OK, "Chunk stored successfully".to_string())
        }
        Err(e) => {
            tracing::error!("Error storing chunk {} of {}: {}", req.index, req.file_id, e);
            (e.status_code(), format!("Error storing chunk: {}", e))
        }
    }
}

pub async fn handle_share_chunk(
    Extension(store): Extension<Arc<dyn ChunkStore>>,
    Json(req): Json<ShareChunkRequest>,
) -> (StatusCode, String) {
    match store_encoded(store.as_ref(), &req.file_id, req.index, &req.chunk).await {
        Ok(_) => {
            tracing::info!(
                "Shared chunk {} for file {} from {}",
                req.index,
                req.file_id,
                req.origin_node
            );
            (StatusCode::OK, "Chunk shared successfully".to_string())
        }
        Err(e) => {
            tracing::error!("Error sharing chunk {} of {}: {}", req.index, req.file_id, e);
            (e.status_code(), format!("Error sharing chunk: {}", e))
        }
    }
}

pub async fn handle_get_chunk(
    Extension(store): Extension<Arc<dyn ChunkStore>>,
    Path((file_id, index)): Path<(String, u32)>,
) -> std::result::Result<Json<GetChunkResponse>, ClusterError> {
    validate_file_id(&file_id)?;

    match store.get(&file_id, index).await {
        Ok(payload) => {
            tracing::debug!("Retrieved chunk {} for file {}", index, file_id);
            Ok(Json(GetChunkResponse {
                chunk: encode_chunk(&payload),
            }))
        }
        Err(e) => {
            if matches!(e, ClusterError::NotFound(_)) {
                tracing::info!("Chunk {} for file {} not found", index, file_id);
            } else {
                tracing::error!("Error reading chunk {} of {}: {}", index, file_id, e);
            }
            Err(e)
        }
    }
}

pub async fn handle_health() -> &'static str {
    "ok"
}
