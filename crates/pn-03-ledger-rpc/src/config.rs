//! Ledger connection settings.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    /// HTTP endpoint of the Ethereum node.
    pub url: String,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Delay between `eth_getTransactionReceipt` polls.
    pub poll_interval: Duration,
    /// Give up waiting for a receipt after this long.
    pub confirmation_timeout: Duration,
    /// Added on top of `eth_estimateGas`, in percent.
    pub gas_margin_percent: u64,
}

impl RpcConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(2000),
            confirmation_timeout: Duration::from_secs(300),
            gas_margin_percent: 20,
        }
    }
}
