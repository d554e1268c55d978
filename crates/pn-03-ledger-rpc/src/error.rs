//! Error types for ledger access.

use shared_types::Hash;
use std::time::Duration;

/// JSON-RPC transport or protocol failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("failed to build http client: {0}")]
    ClientBuild(String),

    #[error("rpc transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid rpc response for {method}: {reason}")]
    InvalidResponse { method: String, reason: String },
}

impl From<reqwest::Error> for RpcError {
    fn from(e: reqwest::Error) -> Self {
        RpcError::Transport(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("signing failed: {0}")]
    Signing(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    #[error("return data is {actual} bytes, expected at least {expected}")]
    ShortData { expected: usize, actual: usize },
}

/// Failure while sending a contract transaction or waiting for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Signer(#[from] SignerError),

    #[error("transaction {transaction_hash:?} reverted in block {block_number}")]
    Reverted {
        transaction_hash: Hash,
        block_number: u64,
    },

    #[error("transaction {transaction_hash:?} not mined within {waited:?}")]
    ConfirmationTimeout {
        transaction_hash: Hash,
        waited: Duration,
    },
}

/// Failure reading a stored fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdeaHashError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Abi(#[from] AbiError),
}
