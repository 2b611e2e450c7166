//! Coordinator Client API
//!
//! Endpoints exposed to clients uploading and retrieving files. Registry endpoints
//! live in [`crate::registry::protocol`].

use serde::{Deserialize, Serialize};

use super::types::FileId;

/// Multipart upload; the file travels in the `file` field.
pub const ENDPOINT_UPLOAD: &str = "/upload";
/// Prefix of `GET /retrieve/{fileId}`.
pub const ENDPOINT_RETRIEVE: &str = "/retrieve";
/// Published file records.
pub const ENDPOINT_FILES: &str = "/files";

/// Name of the multipart field holding the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: FileId,
    pub file_name: String,
}
