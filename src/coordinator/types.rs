use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of random bytes behind a file id (rendered as twice as many hex chars).
const FILE_ID_BYTES: usize = 16;

/// Opaque identifier of an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct FileId(pub String);

impl FileId {
    /// Fresh id from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let raw: [u8; FILE_ID_BYTES] = rand::random();
        Self(hex::encode(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FileId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One contiguous slice of an uploaded file.
///
/// `payload` shares the upload buffer; chunks are never modified after splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub file_id: FileId,
    pub index: u32,
    pub payload: Bytes,
}

/// Everything needed to put a file back together.
///
/// Published once every chunk of the upload has been acknowledged, never mutated
/// afterwards. `placements[i]` names the node that was primary for chunk `i`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub file_id: FileId,
    pub file_name: String,
    pub chunk_count: u32,
    pub size: u64,
    pub placements: Vec<String>,
}
