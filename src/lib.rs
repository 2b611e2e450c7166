//! Distributed Chunk Storage Library
//!
//! Files are cut into fixed-size chunks, scattered round-robin over a dynamic set of
//! storage nodes, copied to every other node for redundancy, and put back together
//! on demand. The binary (`main.rs`) runs either side of the cluster.
//!
//! ## Architecture Modules
//! - **`registry`**: The coordinator's view of the cluster. Nodes announce themselves
//!   by name through periodic heartbeats; addresses are last-write-wins.
//! - **`coordinator`**: Upload and retrieval. Splitting, placement, replication
//!   fan-out, the file index and reconstruction live here.
//! - **`storage`**: The node side. A key→bytes chunk store (memory or disk) behind the
//!   endpoints the coordinator pushes chunks to and pulls them from.
//! - **`config`**: CLI and environment configuration for both roles.
//! - **`error`**: The error taxonomy shared by all of the above.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod registry;
pub mod storage;
