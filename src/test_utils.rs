//! Shared test fixtures: contract artifacts, handle factories, fake
//! collaborators and terminal fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::{Terminal, backend::TestBackend};
use rstest::fixture;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep};

use crate::client::{ContractFactory, Environment};
use crate::domain::{
    Connection, ContractDefinition, ContractHandle, DashboardError, SetupHandle,
};
use crate::state::AppMessage;
use crate::state::bootstrap::{BootstrapTask, SetupLauncher};

// ============================================================================
// Contract Artifacts
// ============================================================================

/// A trimmed voting contract artifact deployed on network 5777.
pub const VOTING_ARTIFACT: &str = r#"{
  "contractName": "Voting",
  "abi": [
    { "type": "constructor", "inputs": [], "stateMutability": "nonpayable" },
    { "type": "function", "name": "createPoll", "inputs": [], "stateMutability": "nonpayable" },
    { "type": "function", "name": "castVote", "inputs": [], "stateMutability": "nonpayable" },
    { "type": "function", "name": "getPollStatus", "inputs": [], "stateMutability": "view" },
    { "type": "event", "name": "PollCreated", "inputs": [] },
    { "type": "function", "name": "getStake", "inputs": [], "constant": true }
  ],
  "networks": {
    "5777": { "address": "0x345ca3e014aaf5dca488057592ee47305d9b3e10" }
  }
}"#;

/// Parsed [`VOTING_ARTIFACT`].
#[must_use]
pub fn voting_definition() -> ContractDefinition {
    ContractDefinition::from_json(VOTING_ARTIFACT).expect("test artifact should parse")
}

// ============================================================================
// Handle Factories
// ============================================================================

/// Factory for setup handles.
pub struct SetupMother;

impl SetupMother {
    /// Deterministic account address for slot `i`.
    #[must_use]
    pub fn address(i: usize) -> String {
        format!("0x{:040x}", i + 1)
    }

    /// A complete handle exposing `count` accounts.
    #[must_use]
    pub fn complete_with_accounts(count: usize) -> SetupHandle {
        SetupHandle::completed(
            Connection::new("http://127.0.0.1:7545", "5777"),
            (0..count).map(Self::address).collect(),
        )
    }

    /// An incomplete handle and the sender that completes it.
    #[must_use]
    pub fn pending() -> (Arc<SetupHandle>, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        let handle = SetupHandle::new(
            Connection::new("http://127.0.0.1:7545", "5777"),
            (0..3).map(Self::address).collect(),
            rx,
        );
        (Arc::new(handle), tx)
    }
}

/// Factory for contract handles.
pub struct ContractMother;

impl ContractMother {
    /// The voting contract bound to its 5777 deployment.
    #[must_use]
    pub fn voting() -> ContractHandle {
        ContractHandle::bind(
            &voting_definition(),
            "5777",
            "0x345ca3e014aaf5dca488057592ee47305d9b3e10",
        )
    }
}

// ============================================================================
// Step Log
// ============================================================================

/// Records named steps with the (tokio) time they happened.
#[derive(Debug, Clone, Default)]
pub struct StepLog(Arc<Mutex<Vec<(&'static str, Instant)>>>);

impl StepLog {
    /// Records `step` at the current time.
    pub fn record(&self, step: &'static str) {
        self.0
            .lock()
            .expect("step log poisoned")
            .push((step, Instant::now()));
    }

    /// Recorded step names, in order.
    #[must_use]
    pub fn steps(&self) -> Vec<&'static str> {
        self.0
            .lock()
            .expect("step log poisoned")
            .iter()
            .map(|(step, _)| *step)
            .collect()
    }

    /// How many times `step` was recorded.
    #[must_use]
    pub fn count(&self, step: &str) -> usize {
        self.steps().iter().filter(|s| **s == step).count()
    }

    /// When `step` was first recorded.
    #[must_use]
    pub fn at(&self, step: &str) -> Option<Instant> {
        self.0
            .lock()
            .expect("step log poisoned")
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, at)| *at)
    }
}

// ============================================================================
// Fake Collaborators
// ============================================================================

/// How a [`FakeEnvironment`]'s handle completes.
#[derive(Debug)]
pub enum Completion {
    /// Complete as soon as `init()` resolves.
    Immediate,
    /// Complete this long after `init()` resolves.
    After(Duration),
    /// Complete when the test sends `true`.
    Manual(watch::Receiver<bool>),
    /// Never complete.
    Never,
}

/// Scriptable environment.
#[derive(Debug)]
pub struct FakeEnvironment {
    log: StepLog,
    init_delay: Duration,
    completion: Completion,
    failure: Option<String>,
    accounts: usize,
    hold: Option<watch::Sender<bool>>,
}

impl FakeEnvironment {
    #[must_use]
    pub fn new(log: StepLog) -> Self {
        Self {
            log,
            init_delay: Duration::ZERO,
            completion: Completion::Immediate,
            failure: None,
            accounts: 3,
            hold: None,
        }
    }

    #[must_use]
    pub fn init_delay(mut self, delay: Duration) -> Self {
        self.init_delay = delay;
        self
    }

    #[must_use]
    pub fn completion(mut self, completion: Completion) -> Self {
        self.completion = completion;
        self
    }

    #[must_use]
    pub fn fail_with(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }
}

impl Environment for FakeEnvironment {
    async fn init(&mut self) -> Result<SetupHandle, DashboardError> {
        self.log.record("env.init.start");
        if !self.init_delay.is_zero() {
            sleep(self.init_delay).await;
        }
        if let Some(message) = self.failure.clone() {
            return Err(DashboardError::setup(message));
        }
        self.log.record("env.init.done");

        let rx = match std::mem::replace(&mut self.completion, Completion::Immediate) {
            Completion::Immediate => {
                self.log.record("env.complete");
                let (tx, rx) = watch::channel(true);
                self.hold = Some(tx);
                rx
            }
            Completion::After(delay) => {
                let (tx, rx) = watch::channel(false);
                let log = self.log.clone();
                tokio::spawn(async move {
                    sleep(delay).await;
                    log.record("env.complete");
                    let _ = tx.send(true);
                });
                rx
            }
            Completion::Manual(rx) => rx,
            Completion::Never => {
                let (tx, rx) = watch::channel(false);
                self.hold = Some(tx);
                rx
            }
        };

        Ok(SetupHandle::new(
            Connection::new("http://fake-node", "5777"),
            (0..self.accounts).map(SetupMother::address).collect(),
            rx,
        ))
    }
}

/// Scriptable contract factory.
#[derive(Debug)]
pub struct FakeFactory {
    log: StepLog,
    delay: Duration,
    failure: Option<String>,
}

impl FakeFactory {
    #[must_use]
    pub fn new(log: StepLog) -> Self {
        Self {
            log,
            delay: Duration::ZERO,
            failure: None,
        }
    }

    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn fail_with(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }
}

impl ContractFactory for FakeFactory {
    async fn instantiate(
        &self,
        connection: &Connection,
        definition: &ContractDefinition,
    ) -> Result<ContractHandle, DashboardError> {
        self.log.record("contract.start");
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(DashboardError::contract(message.clone()));
        }
        self.log.record("contract.done");
        let address = definition
            .deployment(&connection.network_id)
            .unwrap_or("0x0000000000000000000000000000000000000000");
        Ok(ContractHandle::bind(
            definition,
            &connection.network_id,
            address,
        ))
    }
}

/// Launcher running fake collaborators; the first `failures` attempts fail.
#[derive(Debug, Default)]
pub struct FakeLauncher {
    pub log: StepLog,
    failures: usize,
    launches: AtomicUsize,
    manual: Mutex<Option<watch::Receiver<bool>>>,
}

impl FakeLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing_first(failures: usize) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    /// The first attempt completes only when the returned sender sends `true`.
    #[must_use]
    pub fn manual() -> (Self, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        let launcher = Self {
            manual: Mutex::new(Some(rx)),
            ..Self::default()
        };
        (launcher, tx)
    }

    #[must_use]
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

impl SetupLauncher for FakeLauncher {
    fn launch(&self, generation: u64, tx: mpsc::UnboundedSender<AppMessage>) -> BootstrapTask {
        let attempt = self.launches.fetch_add(1, Ordering::SeqCst);
        let mut env = FakeEnvironment::new(self.log.clone());
        if attempt < self.failures {
            env = env.fail_with("node unreachable");
        }
        if let Some(rx) = self.manual.lock().expect("manual lock poisoned").take() {
            env = env.completion(Completion::Manual(rx));
        }
        BootstrapTask::spawn(
            env,
            FakeFactory::new(self.log.clone()),
            Arc::new(voting_definition()),
            Duration::from_secs(30),
            generation,
            tx,
        )
    }
}

// ============================================================================
// Local JSON-RPC Node
// ============================================================================

/// Serves JSON-RPC on a local port, answering each call with
/// `reply(method)` as its `result`. Returns the endpoint URL.
pub async fn serve_rpc<F>(reply: F) -> String
where
    F: Fn(&str) -> Value + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("listener should bind");
    let url = format!("http://{}", listener.local_addr().expect("bound address"));
    let reply = Arc::new(reply);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let reply = Arc::clone(&reply);
            tokio::spawn(async move {
                let _ = answer_rpc(stream, &*reply).await;
            });
        }
    });
    url
}

/// Answers one HTTP request and closes the connection.
async fn answer_rpc<F>(stream: TcpStream, reply: &F) -> std::io::Result<()>
where
    F: Fn(&str) -> Value,
{
    let mut reader = BufReader::new(stream);
    let mut content_length = 0;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).await?;
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let method = request["method"].as_str().unwrap_or_default();

    let payload = json!({
        "jsonrpc": "2.0",
        "id": request["id"],
        "result": reply(method),
    })
    .to_string();
    let response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{payload}",
        payload.len()
    );

    let mut stream = reader.into_inner();
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

// ============================================================================
// Rendering Helpers
// ============================================================================

/// Flattens a buffer into newline-separated rows.
#[must_use]
pub fn buffer_text(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// rstest Fixtures
// ============================================================================

#[fixture]
pub fn test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(100, 30)).expect("terminal creation should succeed")
}

#[fixture]
pub fn test_terminal_80x24() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).expect("terminal creation should succeed")
}
