//! State management for the lazyvote TUI.
//!
//! The state is split along the two owners of the original page:
//!
//! - [`ReadinessGate`] - owns the bootstrap phase and, once ready, the setup
//!   and contract handles
//! - [`UiSelectionState`] - owns the selected account and cached balances; it
//!   only exists while the dashboard is shown
//!
//! plus [`UiState`] for popups and toasts and [`AppConfig`] for persistence.
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                        App                         │
//! ├──────────────────┬───────────────────┬─────────────┤
//! │  ReadinessGate   │ UiSelectionState  │   UiState   │
//! │  - phase         │ - account slot    │  - popup    │
//! │  - setup handle  │ - token balance   │  - toast    │
//! │  - contract      │ - staked balance  │             │
//! └──────────────────┴───────────────────┴─────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;

use crate::domain::{AccountIndex, ContractHandle, SetupHandle};
use crate::theme::Theme;

// ============================================================================
// Module Declarations
// ============================================================================

mod app_commands;
mod app_lifecycle;
mod app_messages;

pub mod bootstrap;
pub mod config;
pub mod readiness;
pub mod selection;
pub mod ui_state;


// ============================================================================
// Re-exports
// ============================================================================

pub use bootstrap::{NodeLauncher, SetupLauncher};
pub use config::{AppConfig, ConfigOverrides};
pub use readiness::{BootstrapEvent, Readiness, ReadinessGate, SetupFailure};
pub use selection::UiSelectionState;
pub use ui_state::{BalanceField, PopupState, UiState};

// ============================================================================
// App Message Types
// ============================================================================

/// Messages sent from background tasks to the main app loop.
#[derive(Debug)]
pub enum AppMessage {
    /// Progress of a bootstrap attempt.
    Bootstrap {
        /// Attempt the event belongs to.
        generation: u64,
        /// What happened.
        event: BootstrapEvent,
    },
}

// ============================================================================
// Dashboard View
// ============================================================================

/// Read-only inputs of the dashboard render functions.
///
/// Handles are the gate's own `Arc`s, forwarded unchanged.
#[derive(Debug, Clone, Copy)]
pub struct DashboardView<'a> {
    /// The complete setup handle.
    pub setup: &'a Arc<SetupHandle>,
    /// The acquired contract.
    pub contract: &'a Arc<ContractHandle>,
    /// Selected account and balances.
    pub selection: &'a UiSelectionState,
    /// When the gate opened.
    pub ready_at: DateTime<Local>,
}

impl DashboardView<'_> {
    /// The selected slot.
    #[must_use]
    pub fn current_account(&self) -> AccountIndex {
        self.selection.current_account()
    }

    /// Address behind the selected slot, if the node exposes it.
    #[must_use]
    pub fn selected_address(&self) -> Option<&str> {
        self.setup.account(self.selection.current_account())
    }
}

// ============================================================================
// Main App State
// ============================================================================

/// The main application state container.
#[derive(Debug)]
pub struct App {
    /// Bootstrap phase and handles.
    pub gate: ReadinessGate,

    /// Selection state; `Some` only while the gate is ready.
    pub selection: Option<UiSelectionState>,

    /// Popups and toasts.
    pub ui: UiState,

    /// Effective configuration.
    pub config: AppConfig,

    /// Resolved colors, passed to every render function.
    pub theme: Theme,

    /// Whether the application should exit.
    pub exit: bool,

    /// Frame counter driving the loading spinner.
    pub animation_tick: u64,

    /// Account to select when the dashboard first opens.
    initial_account: AccountIndex,

    /// Whether config changes are written to disk.
    persist_config: bool,

    message_tx: mpsc::UnboundedSender<AppMessage>,
    message_rx: mpsc::UnboundedReceiver<AppMessage>,
    launcher: Arc<dyn SetupLauncher>,
    bootstrap: Option<bootstrap::BootstrapTask>,
}

impl App {
    /// Read-only dashboard inputs, only once the gate is ready.
    #[must_use]
    pub fn dashboard_view(&self) -> Option<DashboardView<'_>> {
        let (setup, contract) = self.gate.handles()?;
        let ready_at = self.gate.ready_at()?;
        let selection = self.selection.as_ref()?;
        Some(DashboardView {
            setup,
            contract,
            selection,
            ready_at,
        })
    }
}
