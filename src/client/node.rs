//! Computation environment backed by a local development node.
//!
//! `init()` resolves as soon as the node answers `net_version` and
//! `eth_accounts`. The returned handle only reports completion once the node
//! says it is no longer syncing, which a background task keeps checking.

use std::time::Duration;

use serde_json::{Value, json};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::Environment;
use super::rpc::RpcClient;
use crate::domain::{Connection, DashboardError, SetupHandle};

// ============================================================================
// Constants
// ============================================================================

/// Default interval between `eth_syncing` checks.
pub const DEFAULT_SYNC_POLL: Duration = Duration::from_secs(2);

// ============================================================================
// Local Node Environment
// ============================================================================

/// Environment setup against a JSON-RPC node.
#[derive(Debug)]
pub struct LocalNodeEnvironment {
    rpc: RpcClient,
    sync_poll: Duration,
    initialized: bool,
    sync_watcher: Option<JoinHandle<()>>,
}

impl LocalNodeEnvironment {
    /// Create an environment for the node at `rpc_url`.
    #[must_use]
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self::with_client(RpcClient::new(rpc_url))
    }

    /// Create an environment reusing an existing RPC client.
    #[must_use]
    pub fn with_client(rpc: RpcClient) -> Self {
        Self {
            rpc,
            sync_poll: DEFAULT_SYNC_POLL,
            initialized: false,
            sync_watcher: None,
        }
    }

    /// Override how often sync status is checked.
    #[must_use]
    pub fn sync_poll(mut self, interval: Duration) -> Self {
        self.sync_poll = interval;
        self
    }

    async fn is_syncing(rpc: &RpcClient) -> Result<bool, DashboardError> {
        rpc.call("eth_syncing", json!([])).await.map(syncing_from)
    }
}

impl Environment for LocalNodeEnvironment {
    async fn init(&mut self) -> Result<SetupHandle, DashboardError> {
        if self.initialized {
            return Err(DashboardError::setup("environment already initialized"));
        }
        self.initialized = true;

        let network_id = self
            .rpc
            .call_str("net_version", json!([]))
            .await
            .map_err(|e| DashboardError::setup(e.to_string()))?;
        let accounts: Vec<String> = serde_json::from_value(
            self.rpc
                .call("eth_accounts", json!([]))
                .await
                .map_err(|e| DashboardError::setup(e.to_string()))?,
        )?;
        tracing::info!(
            %network_id,
            accounts = accounts.len(),
            url = self.rpc.url(),
            "node reachable"
        );

        let connection = Connection::new(self.rpc.url(), network_id);
        if !Self::is_syncing(&self.rpc).await.unwrap_or(true) {
            return Ok(SetupHandle::completed(connection, accounts));
        }

        let (complete_tx, complete_rx) = watch::channel(false);
        let rpc = self.rpc.clone();
        let interval = self.sync_poll;
        self.sync_watcher = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                match Self::is_syncing(&rpc).await {
                    Ok(false) => {
                        tracing::info!("node finished syncing");
                        let _ = complete_tx.send(true);
                        break;
                    }
                    Ok(true) => tracing::debug!("node still syncing"),
                    Err(e) => tracing::warn!(error = %e, "sync status check failed"),
                }
            }
        }));

        Ok(SetupHandle::new(connection, accounts, complete_rx))
    }
}

impl Drop for LocalNodeEnvironment {
    fn drop(&mut self) {
        if let Some(watcher) = self.sync_watcher.take() {
            watcher.abort();
        }
    }
}

/// `eth_syncing` answers `false` when idle and a progress object otherwise.
fn syncing_from(result: Value) -> bool {
    !matches!(result, Value::Bool(false))
}
