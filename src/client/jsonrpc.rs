use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// JSON-RPC version
const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    pub id: u64,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request
    pub fn new(method: String, params: Value, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method,
            params,
            id,
        }
    }
}

/// JSON-RPC response
///
/// A missing `result` and an explicit `null` both decode to `Value::Null`;
/// callers decide whether that means "not found" or a protocol error.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    pub id: u64,
}

/// JSON-RPC error
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// JSON-RPC HTTP transport
#[derive(Clone)]
pub struct JsonRpcHttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: Arc<AtomicU64>,
}

impl JsonRpcHttpTransport {
    /// Create a new JSON-RPC HTTP transport
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url,
            request_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Send a JSON-RPC request
    pub async fn send_request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest::new(method.to_string(), params, id);

        tracing::trace!(method, id, "sending JSON-RPC request");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SdkError::Network(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let json_response: JsonRpcResponse = response.json().await?;

        if let Some(error) = json_response.error {
            return Err(SdkError::JsonRpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(json_response.result)
    }

    /// Get the URL
    pub fn url(&self) -> &str {
        &self.url
    }
}
