//! Node Registry & Heartbeat Module
//!
//! Tracks which storage nodes the coordinator currently knows about.
//!
//! ## Core Mechanisms
//! - **Announcements**: Nodes identify themselves by a stable logical name; the address
//!   attached to a name is last-write-wins, so a node that moves keeps its identity.
//! - **Heartbeats**: Every node re-announces itself on a fixed interval. Announcements are
//!   the only liveness signal; entries are never evicted, and an unreachable node only
//!   shows up as a failed chunk transfer.
//! - **Snapshots**: Readers get an insertion-ordered, point-in-time copy of the registry,
//!   which is what placement is computed against.

pub mod handlers;
pub mod heartbeat;
pub mod protocol;
pub mod service;
pub mod types;
