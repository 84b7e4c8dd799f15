//! Error types for the voting dashboard.
//!
//! This module defines the structured errors produced while bootstrapping the
//! computation environment, acquiring the contract, and validating user input.

use std::fmt;

use thiserror::Error;

// ============================================================================
// Bootstrap Stage
// ============================================================================

/// The step of the bootstrap sequence an error or timeout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStage {
    /// Environment initialization (`init()` and waiting for completion).
    Environment,
    /// Contract-instance acquisition.
    Contract,
}

impl SetupStage {
    /// Human readable label used in the failure panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Environment => "environment setup",
            Self::Contract => "contract acquisition",
        }
    }
}

impl fmt::Display for SetupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Custom error type for dashboard operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The computation environment failed to initialize.
    #[error("Environment setup failed: {message}")]
    Setup {
        /// Description of what went wrong.
        message: String,
    },

    /// The contract instance could not be acquired.
    #[error("Contract acquisition failed: {message}")]
    Contract {
        /// Description of what went wrong.
        message: String,
    },

    /// A bootstrap stage did not finish in time.
    #[error("{stage} timed out after {secs}s")]
    Timeout {
        /// Which stage stalled.
        stage: SetupStage,
        /// The configured deadline.
        secs: u64,
    },

    /// Account index outside the selector domain.
    #[error("Account {0} is not selectable (choose 0-8)")]
    InvalidAccount(i64),

    /// Balance input that is not a valid token amount.
    #[error("Invalid balance '{input}': {reason}")]
    InvalidBalance {
        /// The rejected input, verbatim.
        input: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Transport errors from HTTP requests.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error payload.
    #[error("RPC {method} failed: {message}")]
    Rpc {
        /// The JSON-RPC method that failed.
        method: String,
        /// The error payload or HTTP status.
        message: String,
    },

    /// JSON parsing or data structure errors.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse.
        message: String,
    },

    /// Filesystem errors (contract artifact, config).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Create a new environment setup error.
    #[must_use]
    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup {
            message: message.into(),
        }
    }

    /// Create a new contract acquisition error.
    #[must_use]
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract {
            message: message.into(),
        }
    }

    /// Create a new parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new RPC error for `method`.
    #[must_use]
    pub fn rpc(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rpc {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid balance error.
    #[must_use]
    pub fn invalid_balance(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidBalance {
            input: input.into(),
            reason,
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_error_display() {
        let setup_err = DashboardError::setup("node unreachable");
        assert_eq!(
            setup_err.to_string(),
            "Environment setup failed: node unreachable"
        );

        let timeout_err = DashboardError::Timeout {
            stage: SetupStage::Contract,
            secs: 30,
        };
        assert_eq!(
            timeout_err.to_string(),
            "contract acquisition timed out after 30s"
        );

        let account_err = DashboardError::InvalidAccount(9);
        assert_eq!(
            account_err.to_string(),
            "Account 9 is not selectable (choose 0-8)"
        );

        let rpc_err = DashboardError::rpc("eth_accounts", "HTTP 500");
        assert_eq!(rpc_err.to_string(), "RPC eth_accounts failed: HTTP 500");
    }

    #[test]
    fn test_serde_error_becomes_parse_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        match DashboardError::from(err) {
            DashboardError::Parse { message } => assert!(!message.is_empty()),
            other => panic!("Expected Parse variant, got {other:?}"),
        }
    }
}
