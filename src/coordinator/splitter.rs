use bytes::Bytes;

use super::types::{Chunk, FileId};
use crate::error::{ClusterError, Result};

/// Cuts `data` into `ceil(len / chunk_size)` chunks.
///
/// Every chunk but the last is exactly `chunk_size` bytes long. Empty input gives
/// no chunks. Payloads are slices of `data`, nothing is copied.
pub fn split(file_id: &FileId, data: &Bytes, chunk_size: usize) -> Result<Vec<Chunk>> {
    if chunk_size == 0 {
        return Err(ClusterError::Validation(
            "chunk size must be greater than zero".to_string(),
        ));
    }

    (0..data.len())
        .step_by(chunk_size)
        .enumerate()
        .map(|(i, start)| {
            let index = u32::try_from(i).map_err(|_| {
                ClusterError::Validation(format!(
                    "file needs more than {} chunks of {} bytes",
                    u32::MAX,
                    chunk_size
                ))
            })?;
            let end = (start + chunk_size).min(data.len());
            Ok(Chunk {
                file_id: file_id.clone(),
                index,
                payload: data.slice(start..end),
            })
        })
        .collect()
}

