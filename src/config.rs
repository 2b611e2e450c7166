//! Command line and environment configuration.
//!
//! One binary plays both roles of the cluster: `coordinator` (registry, upload and
//! retrieval API) and `node` (chunk store plus heartbeat).

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::storage::MAX_CHUNK_BODY_BYTES;

/// Chunk size used by the original deployment (1 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024;
/// Largest chunk whose base64 request still fits under a node's body limit.
pub const MAX_CHUNK_SIZE: usize = MAX_CHUNK_BODY_BYTES / 2;
pub const DEFAULT_HEARTBEAT_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Parser)]
#[command(name = "chunk-cluster", version, about = "Chunked, replicated file storage cluster")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the coordinator: node registry, upload and retrieval API.
    Coordinator(CoordinatorArgs),
    /// Run a storage node that announces itself to a coordinator.
    Node(NodeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CoordinatorArgs {
    #[arg(long, env = "COORDINATOR_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Size of every chunk except possibly the last one, in bytes.
    #[arg(
        long,
        env = "CHUNK_SIZE",
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = parse_chunk_size
    )]
    pub chunk_size: usize,

    /// Upper bound for every single chunk send or fetch.
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value_t = DEFAULT_REQUEST_TIMEOUT_MS)]
    pub request_timeout_ms: u64,

    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Args)]
pub struct NodeArgs {
    #[arg(long, env = "NODE_BIND", default_value = "127.0.0.1:4000")]
    pub bind: SocketAddr,

    /// Logical name of this node, stable across address changes.
    #[arg(long, env = "NODE_NAME", value_parser = parse_non_empty)]
    pub name: String,

    /// Base URL under which the coordinator reaches this node.
    #[arg(long, env = "NODE_ADDRESS", value_parser = parse_non_empty)]
    pub address: String,

    /// Base URL of the coordinator the heartbeat is sent to.
    #[arg(long, env = "COORDINATOR_URL", default_value = "http://127.0.0.1:3000")]
    pub coordinator: String,

    /// Directory for chunk files; chunks are kept in memory when omitted.
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, env = "HEARTBEAT_SECS", default_value_t = DEFAULT_HEARTBEAT_SECS)]
    pub heartbeat_secs: u64,

    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value_t = DEFAULT_REQUEST_TIMEOUT_MS)]
    pub request_timeout_ms: u64,
}

impl CoordinatorArgs {
    pub fn settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            chunk_size: self.chunk_size,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}

impl NodeArgs {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Runtime knobs of the coordinator's upload and retrieval paths.
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorSettings {
    pub chunk_size: usize,
    pub request_timeout: Duration,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

fn parse_chunk_size(raw: &str) -> Result<usize, String> {
    let size: usize = raw
        .parse()
        .map_err(|e| format!("invalid chunk size {raw:?}: {e}"))?;
    if size == 0 {
        return Err("chunk size must be greater than zero".to_string());
    }
    if size > MAX_CHUNK_SIZE {
        return Err(format!(
            "chunk size must not exceed {MAX_CHUNK_SIZE} bytes, nodes reject larger chunk requests"
        ));
    }
    Ok(size)
}

fn parse_non_empty(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("value must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinator_defaults() {
        let cli = Cli::try_parse_from(["chunk-cluster", "coordinator"]).unwrap();
        let Command::Coordinator(args) = cli.command else {
            panic!("expected coordinator subcommand");
        };
        assert_eq!(args.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(
            args.settings().request_timeout,
            Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS)
        );
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let result = Cli::try_parse_from(["chunk-cluster", "coordinator", "--chunk-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_chunk_size_capped_by_node_body_limit() {
        let at_cap = MAX_CHUNK_SIZE.to_string();
        let cli = Cli::try_parse_from(["chunk-cluster", "coordinator", "--chunk-size", &at_cap])
            .unwrap();
        let Command::Coordinator(args) = cli.command else {
            panic!("expected coordinator subcommand");
        };
        assert_eq!(args.chunk_size, MAX_CHUNK_SIZE);

        let over_cap = (MAX_CHUNK_SIZE + 1).to_string();
        let result =
            Cli::try_parse_from(["chunk-cluster", "coordinator", "--chunk-size", &over_cap]);
        assert!(result.is_err());

        // base64 payload plus the JSON envelope of a store-chunk request.
        let encoded = MAX_CHUNK_SIZE.div_ceil(3) * 4;
        assert!(encoded + 4096 < MAX_CHUNK_BODY_BYTES);
    }

    #[test]
    fn test_node_requires_identity() {
        let result = Cli::try_parse_from(["chunk-cluster", "node", "--name", "debian-server"]);
        assert!(result.is_err(), "--address is mandatory");

        let cli = Cli::try_parse_from([
            "chunk-cluster",
            "node",
            "--name",
            "debian-server",
            "--address",
            "http://10.0.0.7:4000",
        ])
        .unwrap();
        let Command::Node(args) = cli.command else {
            panic!("expected node subcommand");
        };
        assert_eq!(args.heartbeat_interval(), Duration::from_secs(30));
        assert!(args.data_dir.is_none());
    }

    #[test]
    fn test_blank_node_name_rejected() {
        let result = Cli::try_parse_from([
            "chunk-cluster",
            "node",
            "--name",
            "   ",
            "--address",
            "http://10.0.0.7:4000",
        ]);
        assert!(result.is_err());
    }
}
