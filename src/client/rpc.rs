//! Minimal JSON-RPC 2.0 client for a local development node.

use serde_json::{Value, json};

use super::http::HttpClient;
use crate::domain::DashboardError;

/// JSON-RPC client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: HttpClient,
    url: String,
}

impl RpcClient {
    /// Create a client for `url` with default HTTP settings.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_http(HttpClient::new(), url)
    }

    /// Create a client reusing an existing HTTP client.
    #[must_use]
    pub fn with_http(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// The endpoint this client talks to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs a call and returns its `result` value.
    ///
    /// # Errors
    ///
    /// Returns a network error if the request fails, or an RPC error if the
    /// node answers with a non-success status or an `error` payload.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, DashboardError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, url = %self.url, "rpc call");
        let response = self.http.post_json(&self.url, &request).send().await?;
        let status = if response.status().is_success() {
            Ok(())
        } else {
            Err(response.status())
        };
        let body: Value = response.json().await?;

        extract_result(method, status, body)
    }

    /// Convenience wrapper for calls whose result is a string.
    ///
    /// # Errors
    ///
    /// Same as [`RpcClient::call`], plus a parse error if the result is not a string.
    pub async fn call_str(&self, method: &str, params: Value) -> Result<String, DashboardError> {
        match self.call(method, params).await? {
            Value::String(s) => Ok(s),
            other => Err(DashboardError::parse(format!(
                "{method} returned non-string result: {other}"
            ))),
        }
    }
}

/// Pulls `result` out of a JSON-RPC response body.
fn extract_result(
    method: &str,
    status: Result<(), reqwest::StatusCode>,
    body: Value,
) -> Result<Value, DashboardError> {
    if let Err(status) = status {
        return Err(DashboardError::rpc(method, format!("HTTP {status}: {body}")));
    }
    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(DashboardError::rpc(method, message));
    }
    body.get("result")
        .cloned()
        .ok_or_else(|| DashboardError::parse(format!("{method} response missing `result`")))
}
