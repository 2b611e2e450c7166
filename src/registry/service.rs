use parking_lot::RwLock;
use std::sync::Arc;

use super::types::{AnnounceOutcome, NodeIdentity};
use crate::error::{ClusterError, Result};

/// Process-wide set of storage nodes, keyed by name, in insertion order.
///
/// Writes take the lock exclusively, so a snapshot never observes half of an
/// announcement. Entries are never removed.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: RwLock<Vec<NodeIdentity>>,
}

impl NodeRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Inserts `name` or overwrites the address it is known under.
    ///
    /// Both values are kept verbatim; blank ones are rejected.
    pub fn announce(&self, name: &str, address: &str) -> Result<AnnounceOutcome> {
        if name.trim().is_empty() || address.trim().is_empty() {
            return Err(ClusterError::Validation(
                "node name and address are both required".to_string(),
            ));
        }

        let mut nodes = self.nodes.write();
        match nodes.iter_mut().find(|node| node.name == name) {
            Some(existing) if existing.address == address => Ok(AnnounceOutcome::Refreshed),
            Some(existing) => {
                let previous = std::mem::replace(&mut existing.address, address.to_string());
                Ok(AnnounceOutcome::AddressChanged { previous })
            }
            None => {
                nodes.push(NodeIdentity::new(name, address));
                Ok(AnnounceOutcome::Registered)
            }
        }
    }

    /// Point-in-time copy of the registry in insertion order.
    pub fn snapshot(&self) -> Vec<NodeIdentity> {
        self.nodes.read().clone()
    }

    /// Same view as [`snapshot`](Self::snapshot); exposed through `GET /node-list`.
    pub fn list(&self) -> Vec<NodeIdentity> {
        self.snapshot()
    }

    /// Current address of the node registered under `name`.
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.nodes
            .read()
            .iter()
            .find(|node| node.name == name)
            .map(|node| node.address.clone())
    }

    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}
