//! Contract factory that binds a build artifact to its live deployment.

use serde_json::{Value, json};

use super::ContractFactory;
use super::http::HttpClient;
use super::rpc::RpcClient;
use crate::domain::{Connection, ContractDefinition, ContractHandle, DashboardError};

/// Resolves the deployed address from the artifact and checks code exists there.
#[derive(Debug, Clone, Default)]
pub struct ArtifactContractFactory {
    http: HttpClient,
}

impl ArtifactContractFactory {
    /// Create a factory with default HTTP settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContractFactory for ArtifactContractFactory {
    async fn instantiate(
        &self,
        connection: &Connection,
        definition: &ContractDefinition,
    ) -> Result<ContractHandle, DashboardError> {
        let address = definition.deployment(&connection.network_id).ok_or_else(|| {
            DashboardError::contract(format!(
                "{} is not deployed on network {}",
                definition.contract_name, connection.network_id
            ))
        })?;

        let rpc = RpcClient::with_http(self.http.clone(), &connection.rpc_url);
        let code = rpc
            .call("eth_getCode", json!([address, "latest"]))
            .await
            .map_err(|e| DashboardError::contract(e.to_string()))?;
        if !has_code(&code) {
            return Err(DashboardError::contract(format!(
                "no contract code at {address}"
            )));
        }

        tracing::info!(
            contract = %definition.contract_name,
            address,
            "contract instance acquired"
        );
        Ok(ContractHandle::bind(
            definition,
            &connection.network_id,
            address,
        ))
    }
}

fn has_code(code: &Value) -> bool {
    code.as_str()
        .map(|hex| !matches!(hex, "" | "0x" | "0x0"))
        .unwrap_or(false)
}
