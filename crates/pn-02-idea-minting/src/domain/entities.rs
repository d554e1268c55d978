//! # Entities

use pn_01_event_index::{domain::value_objects::decimal, Fingerprint};
use serde::{Deserialize, Serialize};
use shared_types::{Address, BlockNumber, Hash, LogEntry, U256};

/// Request to prove and mint an idea for `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MintRequest {
    pub owner: Address,
    pub idea: String,
}

/// Confirmed mint transaction as observed by the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub transaction_hash: Hash,
    pub block_number: BlockNumber,
    pub logs: Vec<LogEntry>,
}

/// Result handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintOutcome {
    #[serde(with = "decimal")]
    pub token_id: U256,
    pub transaction_hash: Hash,
    pub block_number: BlockNumber,
    pub fingerprint: Fingerprint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintingConfig {
    /// Only `IdeaProven` logs emitted by this contract identify the token.
    pub contract_address: Address,
}

impl MintingConfig {
    pub fn new(contract_address: Address) -> Self {
        Self { contract_address }
    }
}
