//! End-to-end tests: a coordinator and several storage nodes on ephemeral ports,
//! driven over real HTTP.

use bytes::Bytes;
use chunk_cluster::config::CoordinatorSettings;
use chunk_cluster::coordinator::protocol::{ENDPOINT_RETRIEVE, UploadResponse};
use chunk_cluster::coordinator::types::FileRecord;
use chunk_cluster::coordinator::{self, service::Coordinator};
use chunk_cluster::registry::heartbeat::HeartbeatEmitter;
use chunk_cluster::registry::service::NodeRegistry;
use chunk_cluster::registry::types::NodeIdentity;
use chunk_cluster::storage::{self, memory::MemoryChunkStore, store::ChunkStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const CHUNK_SIZE: usize = 16;

struct Cluster {
    coordinator_url: String,
    coordinator: Arc<Coordinator>,
    nodes: Vec<(String, MemoryChunkStore)>,
    client: reqwest::Client,
}

async fn serve(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn start_cluster(node_count: usize) -> Cluster {
    let registry = NodeRegistry::new();
    let settings = CoordinatorSettings {
        chunk_size: CHUNK_SIZE,
        request_timeout: Duration::from_secs(5),
    };
    let coordinator = Coordinator::with_http(registry, settings);
    let coordinator_addr = serve(coordinator::router(coordinator.clone(), 8 * 1024 * 1024)).await;
    let coordinator_url = format!("http://{}", coordinator_addr);

    let mut nodes = Vec::new();
    for i in 0..node_count {
        let memory = MemoryChunkStore::new();
        let store: Arc<dyn ChunkStore> = Arc::new(memory.clone());
        let addr = serve(storage::router(store)).await;
        let name = format!("node-{}", i);

        HeartbeatEmitter::new(
            NodeIdentity::new(name.clone(), format!("http://{}", addr)),
            &coordinator_url,
            Duration::from_secs(30),
            Duration::from_secs(5),
        )
        .beat()
        .await
        .unwrap();

        nodes.push((name, memory));
    }

    Cluster {
        coordinator_url,
        coordinator,
        nodes,
        client: reqwest::Client::new(),
    }
}

impl Cluster {
    async fn upload(&self, file_name: &str, data: &[u8]) -> reqwest::Response {
        let part = reqwest::multipart::Part::bytes(data.to_vec()).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        self.client
            .post(format!("{}/upload", self.coordinator_url))
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    async fn retrieve(&self, file_id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}/{}", self.coordinator_url, ENDPOINT_RETRIEVE, file_id))
            .send()
            .await
            .unwrap()
    }
}

fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 256) as u8).collect()
}

#[tokio::test]
async fn test_upload_and_retrieve_over_http() {
    let cluster = start_cluster(2).await;
    let data = sample_bytes(CHUNK_SIZE * 4);

    let response = cluster.upload("report.pdf", &data).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let uploaded: UploadResponse = response.json().await.unwrap();
    assert_eq!(uploaded.file_name, "report.pdf");

    // Every node holds every chunk: primaries round-robin, replicas everywhere else.
    for (name, store) in &cluster.nodes {
        assert_eq!(
            store.indices(uploaded.file_id.as_str()),
            vec![0, 1, 2, 3],
            "{} is missing chunks",
            name
        );
    }

    let response = cluster.retrieve(uploaded.file_id.as_str()).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers()["content-disposition"].to_str().unwrap(),
        "attachment; filename=\"report.pdf\""
    );
    let body = response.bytes().await.unwrap();
    assert_eq!(body, Bytes::from(data));
}

#[tokio::test]
async fn test_round_trip_various_sizes() {
    let cluster = start_cluster(3).await;

    for len in [0, 1, CHUNK_SIZE - 1, CHUNK_SIZE, CHUNK_SIZE + 1, CHUNK_SIZE * 5 + 3] {
        let data = sample_bytes(len);
        let uploaded: UploadResponse = cluster.upload("blob", &data).await.json().await.unwrap();

        let response = cluster.retrieve(uploaded.file_id.as_str()).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "application/octet-stream"
        );
        assert_eq!(response.bytes().await.unwrap().len(), len);
    }
}

#[tokio::test]
async fn test_upload_without_nodes_is_500() {
    let cluster = start_cluster(0).await;

    let response = cluster.upload("nowhere.txt", b"nobody home").await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(cluster.coordinator.metadata().is_empty());
}

#[tokio::test]
async fn test_upload_without_file_field_is_400() {
    let cluster = start_cluster(1).await;

    let form = reqwest::multipart::Form::new().text("comment", "no file here");
    let response = cluster
        .client
        .post(format!("{}/upload", cluster.coordinator_url))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_retrieve_unknown_file_is_404() {
    let cluster = start_cluster(1).await;

    let response = cluster.retrieve("ffffffffffffffffffffffffffffffff").await;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unreachable_node_aborts_upload() {
    let cluster = start_cluster(1).await;

    // A registered node whose address accepts no connections.
    let dead = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    cluster
        .coordinator
        .registry()
        .announce("dead-node", &format!("http://{}", dead))
        .unwrap();

    let response = cluster.upload("doomed.bin", &sample_bytes(CHUNK_SIZE * 2)).await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(cluster.coordinator.metadata().is_empty());
}

#[tokio::test]
async fn test_node_list_and_files_endpoints() {
    let cluster = start_cluster(2).await;

    let nodes: Vec<NodeIdentity> = cluster
        .client
        .get(format!("{}/node-list", cluster.coordinator_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = nodes.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(names, vec!["node-0", "node-1"]);

    let uploaded: UploadResponse = cluster
        .upload("notes.txt", b"some notes")
        .await
        .json()
        .await
        .unwrap();

    let files: Vec<FileRecord> = cluster
        .client
        .get(format!("{}/files", cluster.coordinator_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_id, uploaded.file_id);
    assert_eq!(files[0].chunk_count, 1);
    assert_eq!(files[0].placements, vec!["node-0"]);
}
