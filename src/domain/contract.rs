//! Contract definition artifacts and acquired contract handles.
//!
//! The definition is the static build artifact of the voting contract
//! (`contractName`, `abi`, `networks`). A [`ContractHandle`] is what the
//! contract factory returns once the definition has been bound to a live
//! deployment on the connected network.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::error::DashboardError;

// ============================================================================
// Contract Definition
// ============================================================================

/// One entry of a contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiEntry {
    /// Entry kind: `function`, `event`, `constructor`, ...
    #[serde(rename = "type", default = "default_abi_kind")]
    pub kind: String,
    /// Entry name. Constructors and fallbacks have none.
    #[serde(default)]
    pub name: Option<String>,
    /// `view`, `pure`, `nonpayable` or `payable` in newer artifacts.
    #[serde(default)]
    pub state_mutability: Option<String>,
    /// Pre-0.5 Solidity read-only marker.
    #[serde(default)]
    pub constant: Option<bool>,
}

fn default_abi_kind() -> String {
    "function".to_string()
}

impl AbiEntry {
    /// Returns `true` if calling this entry cannot change contract state.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self.state_mutability.as_deref(), Some("view" | "pure"))
            || self.constant == Some(true)
    }
}

/// Address of a deployment on one network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkDeployment {
    /// Deployed contract address.
    pub address: String,
}

/// Static contract build artifact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDefinition {
    /// Contract name as compiled.
    pub contract_name: String,
    /// Contract ABI.
    #[serde(default)]
    pub abi: Vec<AbiEntry>,
    /// Deployments keyed by network id.
    #[serde(default)]
    pub networks: HashMap<String, NetworkDeployment>,
}

impl ContractDefinition {
    /// Parses an artifact from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the JSON is malformed or lacks `contractName`.
    pub fn from_json(json: &str) -> Result<Self, DashboardError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses an artifact file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a parse error.
    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Deployed address on `network_id`, if the artifact records one.
    #[must_use]
    pub fn deployment(&self, network_id: &str) -> Option<&str> {
        self.networks
            .get(network_id)
            .map(|deployment| deployment.address.as_str())
    }

    /// Callable functions declared by the ABI, in declaration order.
    #[must_use]
    pub fn methods(&self) -> Vec<ContractMethod> {
        self.abi
            .iter()
            .filter(|entry| entry.kind == "function")
            .filter_map(|entry| {
                entry.name.as_ref().map(|name| ContractMethod {
                    name: name.clone(),
                    read_only: entry.is_read_only(),
                })
            })
            .collect()
    }
}

// ============================================================================
// Contract Handle
// ============================================================================

/// A callable function of the deployed contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractMethod {
    /// Function name.
    pub name: String,
    /// Whether the function is a read-only call.
    pub read_only: bool,
}

/// Handle to a deployed contract's callable interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractHandle {
    /// Contract name.
    pub name: String,
    /// Deployed address.
    pub address: String,
    /// Network the deployment lives on.
    pub network_id: String,
    /// Callable functions.
    pub methods: Vec<ContractMethod>,
}

impl ContractHandle {
    /// Binds `definition` to the deployment at `address` on `network_id`.
    #[must_use]
    pub fn bind(definition: &ContractDefinition, network_id: &str, address: &str) -> Self {
        Self {
            name: definition.contract_name.clone(),
            address: address.to_string(),
            network_id: network_id.to_string(),
            methods: definition.methods(),
        }
    }

    /// Number of read-only and state-changing functions.
    #[must_use]
    pub fn method_counts(&self) -> (usize, usize) {
        let reads = self.methods.iter().filter(|m| m.read_only).count();
        (reads, self.methods.len() - reads)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::VOTING_ARTIFACT;

    #[test]
    fn test_artifact_parses() {
        let definition = ContractDefinition::from_json(VOTING_ARTIFACT).unwrap();
        assert_eq!(definition.contract_name, "Voting");
        assert_eq!(
            definition.deployment("5777"),
            Some("0x345ca3e014aaf5dca488057592ee47305d9b3e10")
        );
        assert_eq!(definition.deployment("1"), None);
    }

    #[test]
    fn test_methods_skip_events_and_constructor() {
        let definition = ContractDefinition::from_json(VOTING_ARTIFACT).unwrap();
        let names: Vec<_> = definition.methods().into_iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec!["createPoll", "castVote", "getPollStatus", "getStake"]
        );
    }

    #[test]
    fn test_read_only_detection() {
        let definition = ContractDefinition::from_json(VOTING_ARTIFACT).unwrap();
        let handle = ContractHandle::bind(&definition, "5777", "0xabc");
        assert_eq!(handle.method_counts(), (2, 2));
        assert!(
            handle
                .methods
                .iter()
                .any(|m| m.name == "getStake" && m.read_only)
        );
    }

    #[test]
    fn test_missing_contract_name_is_parse_error() {
        let err = ContractDefinition::from_json(r#"{"abi": []}"#).unwrap_err();
        assert!(matches!(err, DashboardError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = ContractDefinition::load(Path::new("/nonexistent/Voting.json")).unwrap_err();
        assert!(matches!(err, DashboardError::Io(_)));
    }
}
