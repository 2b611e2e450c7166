//! Storage Node Network Protocol
//!
//! Defines the endpoints every storage node exposes and the DTOs the coordinator sends
//! to them. Chunk payloads travel base64-encoded inside JSON bodies.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// --- API Endpoints ---

/// Stores the primary copy of a chunk.
pub const ENDPOINT_STORE_CHUNK: &str = "/store-chunk";
/// Stores a redundant copy of a chunk; same storage effect as `/store-chunk`.
pub const ENDPOINT_SHARE_CHUNK: &str = "/share-chunk";
/// Prefix of `GET /get-chunk/{fileId}/{index}`.
pub const ENDPOINT_GET_CHUNK: &str = "/get-chunk";
/// Liveness probe, shared by coordinator and nodes.
pub const ENDPOINT_HEALTH: &str = "/health";

// --- Data Transfer Objects ---

/// Primary copy of a chunk, sent by the coordinator to the chunk's assigned node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreChunkRequest {
    /// Base64-encoded payload.
    pub chunk: String,
    pub index: u32,
    pub file_id: String,
}

/// Redundant copy of a chunk, sent to every node other than the primary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareChunkRequest {
    pub chunk: String,
    pub index: u32,
    pub file_id: String,
    /// Address of the primary; informational only.
    #[serde(default, alias = "originServer")]
    pub origin_node: String,
}

/// Response of `GET /get-chunk/{fileId}/{index}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetChunkResponse {
    pub chunk: String,
}

pub fn encode_chunk(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}

pub fn decode_chunk(encoded: &str) -> Result<Bytes> {
    Ok(Bytes::from(STANDARD.decode(encoded)?))
}

pub fn get_chunk_path(file_id: &str, index: u32) -> String {
    format!("{}/{}/{}", ENDPOINT_GET_CHUNK, file_id, index)
}
