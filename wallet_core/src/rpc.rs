//! JSON-RPC connector for an external signer bridge.
//!
//! The bridge is a local process in front of the user's wallet. It owns all
//! key material; this connector only forwards requests:
//!
//! | action                   | params                                   | result                    |
//! |--------------------------|------------------------------------------|---------------------------|
//! | `wallet_available`       | –                                        | `{"available": bool}`     |
//! | `wallet_connect`         | `purpose`, `content`                     | `{"address": "0x…"}`      |
//! | `wallet_current_address` | –                                        | `{"address": null}` or an address |
//! | `wallet_submit_transfer` | `to`, `value`, `data`, `signer`, `comment` | `{"txid": "0x…"}`       |
//!
//! Errors come back as `{"error": "message"}` and are passed through verbatim.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use aidchain_types::{TransactionId, WalletAddress};

use crate::connector::WalletConnector;
use crate::error::WalletError;
use crate::transaction_builder::ValueTransfer;

/// Default timeout for a bridge call. Signing prompts wait on the user.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Text the wallet shows when asked to identify the user.
const CONNECT_CONTENT: &str = "Connect to AIDchain";

/// HTTP client for a signer bridge.
#[derive(Clone)]
pub struct RpcWalletConnector {
    http: reqwest::Client,
    bridge_url: String,
}

#[derive(Debug, Deserialize)]
struct AvailableResult {
    available: bool,
}

#[derive(Debug, Deserialize)]
struct AddressResult {
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitResult {
    #[serde(default)]
    txid: Option<String>,
}

impl RpcWalletConnector {
    /// Create a connector targeting the bridge base URL (e.g. `http://127.0.0.1:8669`).
    pub fn new(bridge_url: impl Into<String>) -> Result<Self, WalletError> {
        Self::with_timeout(bridge_url, DEFAULT_TIMEOUT)
    }

    /// Create a connector with a custom request timeout.
    pub fn with_timeout(
        bridge_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| WalletError::Rpc(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            bridge_url: bridge_url.into(),
        })
    }

    /// The configured bridge URL.
    pub fn bridge_url(&self) -> &str {
        &self.bridge_url
    }

    /// Send a JSON-RPC request and return the `result` field.
    ///
    /// A bridge-reported error is mapped through `on_error`.
    async fn rpc_call(
        &self,
        action: &str,
        params: Value,
        on_error: fn(String) -> WalletError,
    ) -> Result<Value, WalletError> {
        let body = request_body(action, params)?;

        let response = self
            .http
            .post(&self.bridge_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    WalletError::NotInstalled
                } else {
                    WalletError::Rpc(format!("request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            return Err(WalletError::Rpc(format!(
                "bridge returned HTTP {}",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| WalletError::InvalidResponse(format!("invalid JSON response: {e}")))?;

        parse_response(json, on_error)
    }
}

/// Build the request body: the params object plus an `action` field.
fn request_body(action: &str, params: Value) -> Result<Value, WalletError> {
    let mut body = params;
    body.as_object_mut()
        .ok_or_else(|| WalletError::Rpc("params must be a JSON object".into()))?
        .insert("action".to_string(), json!(action));
    Ok(body)
}

/// Extract `result`, or map the bridge's `error` message.
fn parse_response(json: Value, on_error: fn(String) -> WalletError) -> Result<Value, WalletError> {
    if let Some(err) = json.get("error").and_then(|e| e.as_str()) {
        return Err(on_error(err.to_string()));
    }
    Ok(json.get("result").cloned().unwrap_or(json))
}

fn parse_address(raw: &str) -> Result<WalletAddress, WalletError> {
    WalletAddress::parse(raw).map_err(|e| WalletError::InvalidResponse(e.to_string()))
}

fn transfer_params(transfer: &ValueTransfer) -> Value {
    json!({
        "to": transfer.to.as_str(),
        "value": transfer.value_base_units().to_string(),
        "data": transfer.payload,
        "signer": transfer.signer.as_ref().map(|s| s.as_str()),
        "comment": transfer.comment,
    })
}

#[async_trait]
impl WalletConnector for RpcWalletConnector {
    async fn is_available(&self) -> bool {
        match self
            .rpc_call("wallet_available", json!({}), WalletError::Rpc)
            .await
            .and_then(|v| {
                serde_json::from_value::<AvailableResult>(v)
                    .map_err(|e| WalletError::InvalidResponse(e.to_string()))
            }) {
            Ok(result) => result.available,
            Err(e) => {
                tracing::debug!(bridge = %self.bridge_url, error = %e, "signer bridge unavailable");
                false
            }
        }
    }

    async fn connect(&self) -> Result<WalletAddress, WalletError> {
        let result = self
            .rpc_call(
                "wallet_connect",
                json!({ "purpose": "identification", "content": CONNECT_CONTENT }),
                WalletError::Connection,
            )
            .await?;
        let resp: AddressResult = serde_json::from_value(result)
            .map_err(|e| WalletError::InvalidResponse(format!("invalid connect response: {e}")))?;
        let raw = resp
            .address
            .ok_or_else(|| WalletError::Connection("failed to get wallet address".into()))?;
        parse_address(&raw)
    }

    async fn current_address(&self) -> Result<Option<WalletAddress>, WalletError> {
        let result = self
            .rpc_call("wallet_current_address", json!({}), WalletError::Rpc)
            .await?;
        let resp: AddressResult = serde_json::from_value(result)
            .map_err(|e| WalletError::InvalidResponse(format!("invalid address response: {e}")))?;
        resp.address.as_deref().map(parse_address).transpose()
    }

    async fn submit_value_transfer(
        &self,
        transfer: &ValueTransfer,
    ) -> Result<TransactionId, WalletError> {
        let result = self
            .rpc_call(
                "wallet_submit_transfer",
                transfer_params(transfer),
                WalletError::Rejected,
            )
            .await?;
        let resp: SubmitResult = serde_json::from_value(result)
            .map_err(|e| WalletError::InvalidResponse(format!("invalid submit response: {e}")))?;
        resp.txid
            .and_then(TransactionId::new)
            .ok_or_else(|| WalletError::Rejected("transaction was rejected or failed".into()))
    }
}
