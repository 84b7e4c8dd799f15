//! Readiness gate for the dashboard.
//!
//! The gate tracks how far the one-shot bootstrap sequence has progressed and
//! decides what the root view shows. Only [`Readiness::Ready`] carries both
//! handles, so the dashboard cannot be reached with a missing or incomplete
//! setup handle.
//!
//! ```text
//!  Uninitialized ──Initialized(h)──▶ Initializing(h) ──Ready(h, c)──▶ Ready
//!        │                                 │
//!        └──────────── Failed(e) ──────────┴──────▶ Failed ──retry──▶ Uninitialized
//! ```

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::domain::{ContractHandle, DashboardError, SetupHandle, SetupStage};

// ============================================================================
// Bootstrap Events
// ============================================================================

/// Progress reported by the bootstrap task.
#[derive(Debug)]
pub enum BootstrapEvent {
    /// `init()` resolved; the handle may not be complete yet.
    Initialized(Arc<SetupHandle>),
    /// The handle completed and the contract was acquired.
    Ready {
        /// The complete setup handle.
        setup: Arc<SetupHandle>,
        /// The acquired contract.
        contract: Arc<ContractHandle>,
    },
    /// A stage failed or timed out.
    Failed(SetupFailure),
}

/// Why the bootstrap sequence stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFailure {
    /// Stage that failed.
    pub stage: SetupStage,
    /// Rendered error message.
    pub message: String,
}

impl SetupFailure {
    /// Builds a failure from a stage and the error it produced.
    #[must_use]
    pub fn new(stage: SetupStage, error: &DashboardError) -> Self {
        Self {
            stage,
            message: error.to_string(),
        }
    }
}

// ============================================================================
// Readiness
// ============================================================================

/// Phase of the readiness gate.
#[derive(Debug, Clone, Default)]
pub enum Readiness {
    /// No setup handle yet.
    #[default]
    Uninitialized,
    /// Setup handle exists but has not completed.
    Initializing(Arc<SetupHandle>),
    /// Environment complete and contract acquired.
    Ready {
        /// The complete setup handle.
        setup: Arc<SetupHandle>,
        /// The acquired contract.
        contract: Arc<ContractHandle>,
        /// When the gate opened.
        ready_at: DateTime<Local>,
    },
    /// Bootstrap failed; waiting for a retry.
    Failed(SetupFailure),
}

impl Readiness {
    /// Short name of the phase, used in logs and the header.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing(_) => "initializing",
            Self::Ready { .. } => "ready",
            Self::Failed(_) => "failed",
        }
    }

    /// Returns `true` while the loading placeholder should be shown.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Initializing(_))
    }
}

// ============================================================================
// Readiness Gate
// ============================================================================

/// Owns the current [`Readiness`] and the bootstrap attempt counter.
#[derive(Debug, Default)]
pub struct ReadinessGate {
    phase: Readiness,
    generation: u64,
}

impl ReadinessGate {
    /// Creates a gate in the `Uninitialized` phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> &Readiness {
        &self.phase
    }

    /// The attempt events must be tagged with to be applied.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` once the dashboard may be rendered.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Readiness::Ready { .. })
    }

    /// Both handles, only when ready.
    #[must_use]
    pub fn handles(&self) -> Option<(&Arc<SetupHandle>, &Arc<ContractHandle>)> {
        match &self.phase {
            Readiness::Ready {
                setup, contract, ..
            } => Some((setup, contract)),
            _ => None,
        }
    }

    /// When the gate opened, only when ready.
    #[must_use]
    pub fn ready_at(&self) -> Option<DateTime<Local>> {
        match &self.phase {
            Readiness::Ready { ready_at, .. } => Some(*ready_at),
            _ => None,
        }
    }

    /// Applies a bootstrap event.
    ///
    /// Events from another generation, and events that do not follow from the
    /// current phase, are ignored. Returns `true` if the phase changed.
    pub fn apply(&mut self, generation: u64, event: BootstrapEvent) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "ignoring stale bootstrap event"
            );
            return false;
        }

        let next = match (&self.phase, event) {
            (Readiness::Uninitialized, BootstrapEvent::Initialized(setup)) => {
                Readiness::Initializing(setup)
            }
            (
                Readiness::Uninitialized | Readiness::Initializing(_),
                BootstrapEvent::Ready { setup, contract },
            ) => {
                if !setup.is_complete() {
                    tracing::warn!("ready event with incomplete setup handle ignored");
                    return false;
                }
                Readiness::Ready {
                    setup,
                    contract,
                    ready_at: Local::now(),
                }
            }
            (
                Readiness::Uninitialized | Readiness::Initializing(_),
                BootstrapEvent::Failed(failure),
            ) => Readiness::Failed(failure),
            (phase, event) => {
                tracing::debug!(phase = phase.name(), ?event, "bootstrap event ignored");
                return false;
            }
        };

        tracing::info!(from = self.phase.name(), to = next.name(), "readiness changed");
        self.phase = next;
        true
    }

    /// Leaves the `Failed` phase for a new attempt.
    ///
    /// Returns the generation the new attempt must report with, or `None` if
    /// the gate is not in the `Failed` phase.
    pub fn begin_retry(&mut self) -> Option<u64> {
        if !matches!(self.phase, Readiness::Failed(_)) {
            return None;
        }
        self.generation += 1;
        self.phase = Readiness::Uninitialized;
        tracing::info!(generation = self.generation, "retrying bootstrap");
        Some(self.generation)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ContractMother, SetupMother};

    fn failure() -> SetupFailure {
        SetupFailure::new(
            SetupStage::Environment,
            &DashboardError::setup("node unreachable"),
        )
    }

    #[test]
    fn test_new_gate_is_uninitialized() {
        let gate = ReadinessGate::new();
        assert!(matches!(gate.phase(), Readiness::Uninitialized));
        assert!(gate.phase().is_loading());
        assert!(gate.handles().is_none());
        assert!(gate.ready_at().is_none());
    }

    #[test]
    fn test_incomplete_setup_stays_loading() {
        let mut gate = ReadinessGate::new();
        let (setup, _complete) = SetupMother::pending();

        assert!(gate.apply(0, BootstrapEvent::Initialized(Arc::clone(&setup))));
        assert!(matches!(gate.phase(), Readiness::Initializing(_)));
        assert!(gate.phase().is_loading());
        assert!(!gate.is_ready());
        assert!(gate.handles().is_none());
        assert!(matches!(gate.phase(), Readiness::Initializing(s) if Arc::ptr_eq(s, &setup)));
    }

    #[test]
    fn test_ready_requires_complete_handle() {
        let mut gate = ReadinessGate::new();
        let (setup, _complete) = SetupMother::pending();
        let contract = Arc::new(ContractMother::voting());

        let changed = gate.apply(0, BootstrapEvent::Ready { setup, contract });

        assert!(!changed);
        assert!(!gate.is_ready());
    }

    #[test]
    fn test_ready_exposes_both_handles_unchanged() {
        let mut gate = ReadinessGate::new();
        let setup = Arc::new(SetupMother::complete_with_accounts(2));
        let contract = Arc::new(ContractMother::voting());

        gate.apply(0, BootstrapEvent::Initialized(Arc::clone(&setup)));
        gate.apply(
            0,
            BootstrapEvent::Ready {
                setup: Arc::clone(&setup),
                contract: Arc::clone(&contract),
            },
        );

        let (s, c) = gate.handles().expect("gate should be ready");
        assert!(gate.ready_at().is_some());
        assert!(Arc::ptr_eq(s, &setup));
        assert!(Arc::ptr_eq(c, &contract));
    }

    #[test]
    fn test_failure_is_distinct_from_loading() {
        let mut gate = ReadinessGate::new();
        assert!(gate.apply(0, BootstrapEvent::Failed(failure())));

        assert!(!gate.phase().is_loading());
        assert!(!gate.is_ready());
        match gate.phase() {
            Readiness::Failed(f) => {
                assert_eq!(f.stage, SetupStage::Environment);
                assert_eq!(f.message, "Environment setup failed: node unreachable");
            }
            other => panic!("Expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_retry_only_from_failed() {
        let mut gate = ReadinessGate::new();
        assert_eq!(gate.begin_retry(), None);

        gate.apply(0, BootstrapEvent::Failed(failure()));
        assert_eq!(gate.begin_retry(), Some(1));
        assert!(matches!(gate.phase(), Readiness::Uninitialized));
        assert_eq!(gate.begin_retry(), None);
    }

    #[test]
    fn test_stale_generation_ignored() {
        let mut gate = ReadinessGate::new();
        gate.apply(0, BootstrapEvent::Failed(failure()));
        gate.begin_retry();

        let setup = Arc::new(SetupMother::complete_with_accounts(1));
        let changed = gate.apply(
            0,
            BootstrapEvent::Ready {
                setup,
                contract: Arc::new(ContractMother::voting()),
            },
        );

        assert!(!changed);
        assert!(matches!(gate.phase(), Readiness::Uninitialized));
    }

    #[test]
    fn test_events_after_ready_are_ignored() {
        let mut gate = ReadinessGate::new();
        let setup = Arc::new(SetupMother::complete_with_accounts(1));
        gate.apply(
            0,
            BootstrapEvent::Ready {
                setup,
                contract: Arc::new(ContractMother::voting()),
            },
        );

        assert!(!gate.apply(0, BootstrapEvent::Failed(failure())));
        assert!(gate.is_ready());
    }
}
