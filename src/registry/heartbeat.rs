use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::protocol::{ENDPOINT_REGISTER_NODE, RegisterNodeRequest};
use super::types::NodeIdentity;
use crate::error::{ClusterError, Result};

/// Periodically announces a storage node to the coordinator.
///
/// The identity is fixed for the whole lifetime of the emitter. A failed
/// announcement is logged and the next tick tries again; there is no backoff.
pub struct HeartbeatEmitter {
    identity: NodeIdentity,
    endpoint: String,
    interval: Duration,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HeartbeatEmitter {
    pub fn new(
        identity: NodeIdentity,
        coordinator_url: &str,
        interval: Duration,
        timeout: Duration,
    ) -> Self {
        let endpoint = format!(
            "{}{}",
            coordinator_url.trim_end_matches('/'),
            ENDPOINT_REGISTER_NODE
        );

        Self {
            identity,
            endpoint,
            interval,
            timeout,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    /// Sends a single announcement and waits for the coordinator to accept it.
    pub async fn beat(&self) -> Result<()> {
        let payload = RegisterNodeRequest {
            name: self.identity.name.clone(),
            address: self.identity.address.clone(),
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| ClusterError::Transport {
                address: self.endpoint.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ClusterError::NodeRejected {
                address: self.endpoint.clone(),
                status: response.status(),
            });
        }

        Ok(())
    }

    /// Announces immediately, then once per interval, forever.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match self.beat().await {
                Ok(()) => tracing::info!(
                    "Heartbeat sent: {} - {}",
                    self.identity.name,
                    self.identity.address
                ),
                Err(e) => tracing::warn!("Error sending heartbeat: {}", e),
            }
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
