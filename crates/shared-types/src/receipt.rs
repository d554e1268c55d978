//! Transaction receipt and call request types.

use crate::log::LogEntry;
use crate::primitives::{quantity, Address, Bytes, Hash, U256};
use serde::{Deserialize, Serialize};

/// Receipt returned by `eth_getTransactionReceipt` once a transaction is mined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: Hash,
    #[serde(with = "quantity")]
    pub block_number: u64,
    #[serde(default)]
    pub block_hash: Option<Hash>,
    #[serde(default)]
    pub from: Option<Address>,
    #[serde(default)]
    pub to: Option<Address>,
    /// `1` success, `0` reverted. Absent on pre-Byzantium chains.
    #[serde(default, with = "quantity::option")]
    pub status: Option<u64>,
    #[serde(default)]
    pub gas_used: Option<U256>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl TransactionReceipt {
    /// A receipt without a status field is treated as success.
    pub fn is_success(&self) -> bool {
        self.status.map_or(true, |s| s == 1)
    }
}

/// Transaction call object for `eth_call` and `eth_estimateGas`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}
