//! Registry Network Protocol
//!
//! Endpoints and DTOs used by storage nodes to announce themselves and by operators
//! to inspect the registry.

use serde::{Deserialize, Serialize};

/// Endpoint receiving node announcements (heartbeats).
pub const ENDPOINT_REGISTER_NODE: &str = "/register-node";
/// Announcement endpoint under the name older nodes still post to.
pub const ENDPOINT_UPDATE_SERVER_URL: &str = "/update-server-url";
/// Read-only view of the registry.
pub const ENDPOINT_NODE_LIST: &str = "/node-list";

/// Body of a heartbeat.
///
/// Fields default to empty so that a missing field is reported as a validation
/// failure (400) instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterNodeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Heartbeat body in the `{serverName, serverUrl}` shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServerUrlRequest {
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub server_url: String,
}

impl From<UpdateServerUrlRequest> for RegisterNodeRequest {
    fn from(req: UpdateServerUrlRequest) -> Self {
        Self {
            name: req.server_name,
            address: req.server_url,
        }
    }
}
