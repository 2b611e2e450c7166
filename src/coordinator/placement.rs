use crate::error::{ClusterError, Result};
use crate::registry::types::NodeIdentity;

/// Round-robin placement: chunk `index` belongs to `snapshot[index % len]`.
pub fn assign(index: u32, snapshot: &[NodeIdentity]) -> Result<&NodeIdentity> {
    if snapshot.is_empty() {
        return Err(ClusterError::NoNodesAvailable);
    }
    Ok(&snapshot[index as usize % snapshot.len()])
}

/// Nodes that receive a redundant copy when `primary` holds the primary one.
///
/// Nodes sharing the primary's address are skipped, they would only receive the
/// same chunk twice.
pub fn replicas<'a>(
    primary: &'a NodeIdentity,
    snapshot: &'a [NodeIdentity],
) -> impl Iterator<Item = &'a NodeIdentity> + 'a {
    snapshot
        .iter()
        .filter(move |node| node.address != primary.address)
}
