use anyhow::Context;
use chunk_cluster::config::{Cli, Command, CoordinatorArgs, NodeArgs};
use chunk_cluster::coordinator::{self, service::Coordinator};
use chunk_cluster::registry::heartbeat::HeartbeatEmitter;
use chunk_cluster::registry::service::NodeRegistry;
use chunk_cluster::registry::types::NodeIdentity;
use chunk_cluster::storage::{
    self, disk::DiskChunkStore, memory::MemoryChunkStore, store::ChunkStore,
};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Coordinator(args) => run_coordinator(args).await,
        Command::Node(args) => run_node(args).await,
    }
}

async fn run_coordinator(args: CoordinatorArgs) -> anyhow::Result<()> {
    let settings = args.settings();
    tracing::info!(
        "Starting coordinator on {} (chunk size {} bytes, request timeout {:?})",
        args.bind,
        settings.chunk_size,
        settings.request_timeout
    );

    // 1. Registry, filled by node heartbeats:
    let registry = NodeRegistry::new();

    // 2. Coordinator owning the file index:
    let coordinator = Coordinator::with_http(registry, settings);

    // 3. HTTP Router:
    let app = coordinator::router(coordinator, args.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tracing::info!("Coordinator listening on http://{}", args.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn run_node(args: NodeArgs) -> anyhow::Result<()> {
    tracing::info!("Starting node {} on {}", args.name, args.bind);

    // 1. Chunk store:
    let store: Arc<dyn ChunkStore> = match &args.data_dir {
        Some(dir) => Arc::new(
            DiskChunkStore::open(dir)
                .await
                .with_context(|| format!("failed to open chunk directory {}", dir.display()))?,
        ),
        None => {
            tracing::warn!("No --data-dir given, chunks are kept in memory only");
            Arc::new(MemoryChunkStore::new())
        }
    };

    // 2. Heartbeat towards the coordinator:
    let heartbeat = HeartbeatEmitter::new(
        NodeIdentity::new(args.name.clone(), args.address.clone()),
        &args.coordinator,
        args.heartbeat_interval(),
        args.request_timeout(),
    );
    tracing::info!(
        "Announcing {} at {} to {} every {:?}",
        args.name,
        args.address,
        args.coordinator,
        args.heartbeat_interval()
    );
    let _heartbeat_handle = heartbeat.spawn();

    // 3. HTTP server:
    let app = storage::router(store);
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tracing::info!("Node listening on http://{}", args.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
