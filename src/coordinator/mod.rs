//! Coordinator Module
//!
//! Accepts uploads, scatters their chunks over the registered storage nodes and puts
//! files back together on request.
//!
//! ## Workflow
//! 1. **Split**: the upload is cut into fixed-size chunks (`splitter`).
//! 2. **Place**: chunk `i` gets node `i mod n` of a registry snapshot (`placement`).
//! 3. **Replicate**: the primary copy is stored first, then a redundant copy goes to
//!    every other node (`replication`). Any failure aborts the upload.
//! 4. **Publish**: only a fully distributed upload gets a `FileRecord` (`metadata`).
//! 5. **Reconstruct**: chunks are fetched in parallel from the primaries recorded at
//!    upload time and joined in index order (`reconstruction`).
//!
//! ## Submodules
//! - **`client`**: transport to storage nodes (`NodeClient`, HTTP implementation).
//! - **`service`**: the `Coordinator` tying registry, metadata and client together.
//! - **`handlers`** / **`protocol`**: the client-facing HTTP API.

pub mod client;
pub mod handlers;
pub mod metadata;
pub mod mime;
pub mod placement;
pub mod protocol;
pub mod reconstruction;
pub mod replication;
pub mod service;
pub mod splitter;
pub mod types;


use axum::extract::DefaultBodyLimit;
use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::registry::handlers::{
    handle_node_list, handle_register_node, handle_update_server_url,
};
use crate::registry::protocol::{
    ENDPOINT_NODE_LIST, ENDPOINT_REGISTER_NODE, ENDPOINT_UPDATE_SERVER_URL,
};
use crate::storage::handlers::handle_health;
use crate::storage::protocol::ENDPOINT_HEALTH;
use handlers::{handle_list_files, handle_retrieve, handle_upload};
use protocol::{ENDPOINT_FILES, ENDPOINT_RETRIEVE, ENDPOINT_UPLOAD};
use service::Coordinator;

/// HTTP surface of the coordinator: registry, upload and retrieval.
pub fn router(coordinator: Arc<Coordinator>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route(ENDPOINT_REGISTER_NODE, post(handle_register_node))
        .route(ENDPOINT_UPDATE_SERVER_URL, post(handle_update_server_url))
        .route(ENDPOINT_NODE_LIST, get(handle_node_list))
        .route(ENDPOINT_UPLOAD, post(handle_upload))
        .route(&format!("{}/:file_id", ENDPOINT_RETRIEVE), get(handle_retrieve))
        .route(ENDPOINT_FILES, get(handle_list_files))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(Extension(coordinator.registry().clone()))
        .layer(Extension(coordinator))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
