//! Storage Node Module
//!
//! The node side of the cluster: a key→bytes chunk store addressed by
//! `(file id, chunk index)` and the HTTP endpoints the coordinator uses to push and
//! pull chunks.
//!
//! ## Core Concepts
//! - **Namespaces**: every file id gets its own namespace, created on the first write.
//! - **Idempotent writes**: storing a chunk again overwrites it; primary copies
//!   (`/store-chunk`) and redundant copies (`/share-chunk`) have the same effect.
//! - **Backends**: `MemoryChunkStore` for ephemeral nodes and tests,
//!   `DiskChunkStore` for nodes started with a data directory.

pub mod disk;
pub mod handlers;
pub mod memory;
pub mod protocol;
pub mod store;


use axum::extract::DefaultBodyLimit;
use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::sync::Arc;

use handlers::{handle_get_chunk, handle_health, handle_share_chunk, handle_store_chunk};
use protocol::{ENDPOINT_HEALTH, ENDPOINT_SHARE_CHUNK, ENDPOINT_STORE_CHUNK};
use store::ChunkStore;

/// Largest JSON body a node accepts; a base64 chunk is a third larger than its payload.
pub const MAX_CHUNK_BODY_BYTES: usize = 32 * 1024 * 1024;

/// HTTP surface of a storage node.
pub fn router(store: Arc<dyn ChunkStore>) -> Router {
    Router::new()
        .route(ENDPOINT_STORE_CHUNK, post(handle_store_chunk))
        .route(ENDPOINT_SHARE_CHUNK, post(handle_share_chunk))
        .route("/get-chunk/:file_id/:index", get(handle_get_chunk))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(DefaultBodyLimit::max(MAX_CHUNK_BODY_BYTES))
        .layer(Extension(store))
}
