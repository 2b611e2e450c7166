use bytes::{Bytes, BytesMut};
use futures::future::try_join_all;

use super::client::NodeClient;
use super::types::FileRecord;
use crate::error::{ClusterError, Result};
use crate::registry::service::NodeRegistry;

/// Fetches every chunk of `record` concurrently and concatenates them by index.
///
/// Each chunk is read from the node that was its primary at upload time, at the
/// address that node currently announces. Replicas are not consulted; one failed
/// fetch fails the whole file.
pub async fn reconstruct<C>(
    client: &C,
    registry: &NodeRegistry,
    record: &FileRecord,
) -> Result<Bytes>
where
    C: NodeClient + ?Sized,
{
    let fetches = record
        .placements
        .iter()
        .enumerate()
        .map(|(index, node_name)| async move {
            let address = registry.resolve(node_name).ok_or_else(|| {
                ClusterError::NotFound(format!("node {} is not registered", node_name))
            })?;

            tracing::info!(
                "Requesting chunk {} of {} from {} ({})",
                index,
                record.file_id,
                node_name,
                address
            );
            client
                .fetch_chunk(&address, &record.file_id, index as u32)
                .await
        });

    // try_join_all yields results in input order, whatever order the nodes answer in.
    let payloads = try_join_all(fetches).await?;

    let mut data = BytesMut::with_capacity(record.size as usize);
    for payload in payloads {
        data.extend_from_slice(&payload);
    }
    Ok(data.freeze())
}
