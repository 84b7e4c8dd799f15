//! External collaborators: the computation environment and the contract factory.
//!
//! The dashboard treats both as opaque. The traits here are the seams the
//! bootstrap sequence is written against; the shipped implementations talk
//! JSON-RPC to a local development node.
//!
//! # Example
//!
//! ```ignore
//! use crate::client::{Environment, LocalNodeEnvironment};
//!
//! let mut env = LocalNodeEnvironment::new("http://127.0.0.1:7545");
//! let setup = env.init().await?;
//! ```

use std::future::Future;

use crate::domain::{Connection, ContractDefinition, ContractHandle, DashboardError, SetupHandle};

pub mod artifact;
pub mod http;
pub mod node;
pub mod rpc;

// ============================================================================
// Re-exports
// ============================================================================

pub use artifact::ArtifactContractFactory;
pub use node::LocalNodeEnvironment;

// ============================================================================
// Traits
// ============================================================================

/// The privacy-computation environment.
///
/// `init` must be called at most once per instance. The handle it returns may
/// still be incomplete; completion is observed through the handle.
pub trait Environment: Send + 'static {
    /// Initializes the environment.
    fn init(&mut self) -> impl Future<Output = Result<SetupHandle, DashboardError>> + Send;
}

/// Produces a contract handle from a connection and a static definition.
///
/// Must not be called before the environment reports completion.
pub trait ContractFactory: Send + Sync + 'static {
    /// Acquires the contract instance.
    fn instantiate(
        &self,
        connection: &Connection,
        definition: &ContractDefinition,
    ) -> impl Future<Output = Result<ContractHandle, DashboardError>> + Send;
}
