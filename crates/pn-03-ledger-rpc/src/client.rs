//! JSON-RPC client for an Ethereum node.

use crate::error::RpcError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared_types::{
    quantity, Address, Bytes, CallRequest, Hash, LogEntry, LogQuery, TransactionReceipt, U256,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::trace;

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

/// JSON-RPC response structure.
///
/// `result` stays untyped until the error field has been checked; a
/// `null` result is meaningful for some methods (pending receipts).
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

pub struct EthRpcClient {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl EthRpcClient {
    pub fn new(rpc_url: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http_client,
            rpc_url: rpc_url.into(),
            request_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.rpc_url
    }

    /// Make a JSON-RPC call.
    pub async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, RpcError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        trace!(method, id, "RPC request");

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?;

        let rpc_response: JsonRpcResponse =
            response
                .json()
                .await
                .map_err(|e| RpcError::InvalidResponse {
                    method: method.to_string(),
                    reason: e.to_string(),
                })?;

        if let Some(error) = rpc_response.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = rpc_response.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result).map_err(|e| RpcError::InvalidResponse {
            method: method.to_string(),
            reason: e.to_string(),
        })
    }

    async fn call_quantity<P: Serialize>(&self, method: &str, params: P) -> Result<u64, RpcError> {
        let result: String = self.call(method, params).await?;
        quantity::parse_hex_u64(&result).map_err(|reason| RpcError::InvalidResponse {
            method: method.to_string(),
            reason,
        })
    }

    /// eth_blockNumber - Get current block height.
    pub async fn block_number(&self) -> Result<u64, RpcError> {
        self.call_quantity("eth_blockNumber", Vec::<()>::new()).await
    }

    /// eth_chainId - Get chain ID.
    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        self.call_quantity("eth_chainId", Vec::<()>::new()).await
    }

    /// eth_gasPrice - Get current gas price in wei.
    pub async fn gas_price(&self) -> Result<U256, RpcError> {
        self.call("eth_gasPrice", Vec::<()>::new()).await
    }

    /// eth_getTransactionCount - Next nonce, counting pending transactions.
    pub async fn transaction_count(&self, address: Address) -> Result<u64, RpcError> {
        self.call_quantity("eth_getTransactionCount", (address, "pending"))
            .await
    }

    /// eth_estimateGas
    pub async fn estimate_gas(&self, request: &CallRequest) -> Result<U256, RpcError> {
        self.call("eth_estimateGas", [request]).await
    }

    /// eth_getLogs
    pub async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, RpcError> {
        self.call("eth_getLogs", [query]).await
    }

    /// eth_call against the latest block.
    pub async fn call_contract(&self, request: &CallRequest) -> Result<Bytes, RpcError> {
        self.call("eth_call", (request, "latest")).await
    }

    /// eth_sendRawTransaction
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<Hash, RpcError> {
        self.call("eth_sendRawTransaction", [Bytes::from_slice(raw)])
            .await
    }

    /// eth_getTransactionReceipt - `None` while the transaction is pending.
    pub async fn transaction_receipt(
        &self,
        hash: Hash,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        self.call("eth_getTransactionReceipt", [hash]).await
    }
}
