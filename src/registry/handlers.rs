use axum::{Extension, Json, http::StatusCode};
use std::sync::Arc;

use super::protocol::{RegisterNodeRequest, UpdateServerUrlRequest};
use super::service::NodeRegistry;
use super::types::{AnnounceOutcome, NodeIdentity};

pub async fn handle_register_node(
    Extension(registry): Extension<Arc<NodeRegistry>>,
    Json(req): Json<RegisterNodeRequest>,
) -> (StatusCode, String) {
    match registry.announce(&req.name, &req.address) {
        Ok(outcome) => {
            match outcome {
                AnnounceOutcome::Registered => {
                    tracing::info!("Node {} registered at {}", req.name, req.address);
                }
                AnnounceOutcome::AddressChanged { previous } => {
                    tracing::info!(
                        "Node {} moved from {} to {}",
                        req.name,
                        previous,
                        req.address
                    );
                }
                AnnounceOutcome::Refreshed => {
                    tracing::debug!("Heartbeat from {} at {}", req.name, req.address);
                }
            }
            (StatusCode::OK, format!("Node {} registered", req.name))
        }
        Err(e) => {
            tracing::warn!("Rejected node announcement: {}", e);
            (e.status_code(), e.to_string())
        }
    }
}

pub async fn handle_update_server_url(
    registry: Extension<Arc<NodeRegistry>>,
    Json(req): Json<UpdateServerUrlRequest>,
) -> (StatusCode, String) {
    handle_register_node(registry, Json(req.into())).await
}

pub async fn handle_node_list(
    Extension(registry): Extension<Arc<NodeRegistry>>,
) -> Json<Vec<NodeIdentity>> {
    Json(registry.list())
}
