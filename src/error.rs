//! Error taxonomy shared by the coordinator and the storage nodes.
//!
//! Nothing in the cluster retries automatically: every variant bubbles up to the
//! request that caused it and is turned into an HTTP status by [`ClusterError::status_code`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClusterError>;

#[derive(Debug, Error)]
pub enum ClusterError {
    /// Malformed registration or missing request fields.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Placement was attempted while the registry was empty.
    #[error("no storage nodes registered")]
    NoNodesAvailable,

    /// Unknown file id on the coordinator, or unknown chunk on a node.
    #[error("not found: {0}")]
    NotFound(String),

    /// The node could not be reached at all (connect error, timeout, broken body).
    #[error("failed to reach node at {address}: {source}")]
    Transport {
        address: String,
        #[source]
        source: reqwest::Error,
    },

    /// The node answered, but not with a success status.
    #[error("node at {address} answered {status}")]
    NodeRejected {
        address: String,
        status: reqwest::StatusCode,
    },

    /// A chunk distribution failed; the file record was never published.
    #[error("upload aborted: {0}")]
    PartialUpload(#[source] Box<ClusterError>),

    /// A chunk could not be fetched back; no partial output is produced.
    #[error("reconstruction failed: {0}")]
    Reconstruction(#[source] Box<ClusterError>),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid chunk encoding: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl ClusterError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClusterError::Validation(_) => StatusCode::BAD_REQUEST,
            ClusterError::Decode(_) => StatusCode::BAD_REQUEST,
            ClusterError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ClusterError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
