//! Domain types for the lazyvote dashboard.
//!
//! # Module Organization
//!
//! - [`error`] - Error types for bootstrap and input validation
//! - [`account`] - Account selector index and token amounts
//! - [`setup`] - Setup handle and chain connection
//! - [`contract`] - Contract definition artifact and contract handle

// ============================================================================
// Module Declarations
// ============================================================================

pub mod account;
pub mod contract;
pub mod error;
pub mod setup;

// ============================================================================
// Re-exports
// ============================================================================

pub use account::{AccountIndex, TokenAmount};
pub use contract::{ContractDefinition, ContractHandle};
pub use error::{DashboardError, SetupStage};
pub use setup::{Connection, SetupHandle};
