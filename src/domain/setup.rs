//! Setup handle produced by the computation environment.
//!
//! A [`SetupHandle`] exists as soon as the environment's `init()` resolves, but
//! the environment may keep working afterwards. Its completion flag is a
//! `watch` channel so the bootstrap sequence can await it instead of polling.

use tokio::sync::watch;

use super::account::AccountIndex;
use super::error::DashboardError;

// ============================================================================
// Connection
// ============================================================================

/// Chain connection descriptor handed to the contract factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// JSON-RPC endpoint of the node.
    pub rpc_url: String,
    /// Network id reported by `net_version`.
    pub network_id: String,
}

impl Connection {
    /// Creates a new connection descriptor.
    #[must_use]
    pub fn new(rpc_url: impl Into<String>, network_id: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            network_id: network_id.into(),
        }
    }
}

// ============================================================================
// Setup Handle
// ============================================================================

/// Opaque result of environment initialization.
#[derive(Debug)]
pub struct SetupHandle {
    connection: Connection,
    accounts: Vec<String>,
    completion: watch::Receiver<bool>,
}

impl SetupHandle {
    /// Creates a handle whose completion is driven by `completion`.
    #[must_use]
    pub fn new(
        connection: Connection,
        accounts: Vec<String>,
        completion: watch::Receiver<bool>,
    ) -> Self {
        Self {
            connection,
            accounts,
            completion,
        }
    }

    /// Creates a handle that is already complete.
    #[must_use]
    pub fn completed(connection: Connection, accounts: Vec<String>) -> Self {
        let (_tx, rx) = watch::channel(true);
        Self::new(connection, accounts, rx)
    }

    /// The chain connection.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Address behind a selector slot, if the node exposes that many accounts.
    #[must_use]
    pub fn account(&self, index: AccountIndex) -> Option<&str> {
        self.accounts.get(index.as_usize()).map(String::as_str)
    }

    /// Current value of the completion flag.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        *self.completion.borrow()
    }

    /// Waits until the completion flag becomes `true`.
    ///
    /// # Errors
    ///
    /// Returns a setup error if the environment dropped its side of the flag
    /// without ever completing.
    pub async fn wait_complete(&self) -> Result<(), DashboardError> {
        let mut rx = self.completion.clone();
        rx.wait_for(|complete| *complete)
            .await
            .map(|_| ())
            .map_err(|_| DashboardError::setup("environment stopped before completing"))
    }
}

// ============================================================================
// Tests
// ============================================================================
