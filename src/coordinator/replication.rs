use futures::future::try_join_all;

use super::client::NodeClient;
use super::placement::{assign, replicas};
use super::types::Chunk;
use crate::error::Result;
use crate::registry::types::NodeIdentity;

/// Stores `chunk` on its primary, then on every other node of `snapshot`.
///
/// The redundant copies are only sent once the primary acknowledged, all of them at
/// once. Any failed copy, primary or redundant, fails the chunk. Returns the primary.
pub async fn distribute<'a, C>(
    client: &C,
    chunk: &Chunk,
    snapshot: &'a [NodeIdentity],
) -> Result<&'a NodeIdentity>
where
    C: NodeClient + ?Sized,
{
    let primary = assign(chunk.index, snapshot)?;

    tracing::info!(
        "Sending chunk {} of {} to {} ({})",
        chunk.index,
        chunk.file_id,
        primary.name,
        primary.address
    );
    client.store_chunk(&primary.address, chunk).await?;

    let copies = replicas(primary, snapshot).map(|node| async move {
        tracing::debug!(
            "Sharing chunk {} of {} with {} ({})",
            chunk.index,
            chunk.file_id,
            node.name,
            node.address
        );
        client
            .share_chunk(&node.address, chunk, &primary.address)
            .await
    });
    try_join_all(copies).await?;

    Ok(primary)
}

/// Runs [`distribute`] for every chunk concurrently against one snapshot.
///
/// The first failure aborts the batch; chunks that already landed stay where they
/// are. On success the primary names are returned in chunk index order.
pub async fn distribute_all<C>(
    client: &C,
    chunks: &[Chunk],
    snapshot: &[NodeIdentity],
) -> Result<Vec<String>>
where
    C: NodeClient + ?Sized,
{
    let primaries =
        try_join_all(chunks.iter().map(|chunk| distribute(client, chunk, snapshot))).await?;

    Ok(primaries.into_iter().map(|node| node.name.clone()).collect())
}
