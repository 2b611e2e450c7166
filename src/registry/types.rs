use serde::{Deserialize, Serialize};

/// A storage node as seen by the coordinator.
///
/// `name` is the registry key and never changes for the lifetime of a node;
/// `address` is the base URL the node is currently reachable at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NodeIdentity {
    pub name: String,
    pub address: String,
}

impl NodeIdentity {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// What an announcement did to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnounceOutcome {
    /// First announcement under this name.
    Registered,
    /// Known name, new address.
    AddressChanged { previous: String },
    /// Known name, same address.
    Refreshed,
}
