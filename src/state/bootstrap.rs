//! The one-shot bootstrap sequence behind the readiness gate.
//!
//! An attempt runs two suspension points strictly in order: environment
//! initialization (including waiting for the handle to complete) and then
//! contract acquisition. Progress is reported to the main loop over the app
//! message channel, tagged with the attempt's generation.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout_at};

use super::AppMessage;
use super::readiness::{BootstrapEvent, SetupFailure};
use crate::client::{ArtifactContractFactory, ContractFactory, Environment, LocalNodeEnvironment};
use crate::domain::{ContractDefinition, ContractHandle, DashboardError, SetupHandle, SetupStage};

// ============================================================================
// Bootstrap Sequence
// ============================================================================

/// Runs one bootstrap attempt and reports every step on `tx`.
///
/// The whole attempt must finish within `deadline`; a stalled stage is
/// reported as a [`DashboardError::Timeout`] for that stage.
pub async fn bootstrap<E, F>(
    mut env: E,
    factory: F,
    definition: Arc<ContractDefinition>,
    deadline: Duration,
    generation: u64,
    tx: mpsc::UnboundedSender<AppMessage>,
) where
    E: Environment,
    F: ContractFactory,
{
    // Receiver may be dropped during shutdown - safe to ignore
    let report = |event: BootstrapEvent| {
        let _ = tx.send(AppMessage::Bootstrap { generation, event });
    };

    tracing::info!(generation, contract = %definition.contract_name, "bootstrap started");
    let event = match sequence(&mut env, &factory, &definition, deadline, &report).await {
        Ok((setup, contract)) => {
            tracing::info!(generation, "bootstrap complete");
            BootstrapEvent::Ready { setup, contract }
        }
        Err(failure) => {
            tracing::error!(
                generation,
                stage = %failure.stage,
                error = %failure.message,
                "bootstrap failed"
            );
            BootstrapEvent::Failed(failure)
        }
    };
    report(event);
}

async fn sequence<E, F>(
    env: &mut E,
    factory: &F,
    definition: &ContractDefinition,
    deadline: Duration,
    report: &impl Fn(BootstrapEvent),
) -> Result<(Arc<SetupHandle>, Arc<ContractHandle>), SetupFailure>
where
    E: Environment,
    F: ContractFactory,
{
    let deadline_at = deadline_from_now(deadline);

    let setup = within(deadline_at, deadline, SetupStage::Environment, env.init()).await?;
    let setup = Arc::new(setup);
    report(BootstrapEvent::Initialized(Arc::clone(&setup)));

    if !setup.is_complete() {
        tracing::info!("waiting for environment to complete");
    }
    within(
        deadline_at,
        deadline,
        SetupStage::Environment,
        setup.wait_complete(),
    )
    .await?;

    let contract = within(
        deadline_at,
        deadline,
        SetupStage::Contract,
        factory.instantiate(setup.connection(), definition),
    )
    .await?;

    Ok((setup, Arc::new(contract)))
}

/// Deadlines too far out to represent are treated as thirty years away.
fn deadline_from_now(deadline: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(deadline).unwrap_or_else(|| now + Duration::from_secs(86_400 * 365 * 30))
}

/// Awaits `fut` until `deadline_at`, mapping errors and timeouts to `stage`.
async fn within<T>(
    deadline_at: Instant,
    deadline: Duration,
    stage: SetupStage,
    fut: impl Future<Output = Result<T, DashboardError>>,
) -> Result<T, SetupFailure> {
    match timeout_at(deadline_at, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(SetupFailure::new(stage, &e)),
        Err(_) => Err(SetupFailure::new(
            stage,
            &DashboardError::Timeout {
                stage,
                secs: deadline.as_secs(),
            },
        )),
    }
}

// ============================================================================
// Bootstrap Task
// ============================================================================

/// A spawned bootstrap attempt. Dropping it cancels the attempt.
#[derive(Debug)]
pub struct BootstrapTask {
    generation: u64,
    handle: JoinHandle<()>,
}

impl BootstrapTask {
    /// Spawns [`bootstrap`] on the current runtime.
    pub fn spawn<E, F>(
        env: E,
        factory: F,
        definition: Arc<ContractDefinition>,
        deadline: Duration,
        generation: u64,
        tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Self
    where
        E: Environment,
        F: ContractFactory,
    {
        let handle = tokio::spawn(bootstrap(env, factory, definition, deadline, generation, tx));
        Self { generation, handle }
    }

    /// The generation this attempt reports with.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` once the attempt has run to completion or was cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for BootstrapTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            tracing::debug!(generation = self.generation, "cancelling bootstrap");
            self.handle.abort();
        }
    }
}

// ============================================================================
// Launchers
// ============================================================================

/// Starts bootstrap attempts for the app.
pub trait SetupLauncher: Send + Sync + fmt::Debug {
    /// Starts an attempt that reports with `generation`.
    fn launch(&self, generation: u64, tx: mpsc::UnboundedSender<AppMessage>) -> BootstrapTask;
}

/// Launches attempts against a local JSON-RPC node.
#[derive(Debug, Clone)]
pub struct NodeLauncher {
    rpc_url: String,
    definition: Arc<ContractDefinition>,
    deadline: Duration,
    sync_poll: Duration,
}

impl NodeLauncher {
    /// Creates a launcher for `rpc_url` and the given contract artifact.
    #[must_use]
    pub fn new(
        rpc_url: impl Into<String>,
        definition: ContractDefinition,
        deadline: Duration,
    ) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            definition: Arc::new(definition),
            deadline,
            sync_poll: crate::client::node::DEFAULT_SYNC_POLL,
        }
    }

    /// Override how often the environment checks node sync status.
    #[must_use]
    pub fn sync_poll(mut self, interval: Duration) -> Self {
        self.sync_poll = interval;
        self
    }
}

impl SetupLauncher for NodeLauncher {
    fn launch(&self, generation: u64, tx: mpsc::UnboundedSender<AppMessage>) -> BootstrapTask {
        BootstrapTask::spawn(
            LocalNodeEnvironment::new(&self.rpc_url).sync_poll(self.sync_poll),
            ArtifactContractFactory::new(),
            Arc::clone(&self.definition),
            self.deadline,
            generation,
            tx,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
