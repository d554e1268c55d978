//! # Domain Errors
//!
//! Error types for the Idea Minting subsystem.

use pn_01_event_index::{Fingerprint, IndexError};
use shared_types::Hash;

/// The idea cannot be fed to the circuit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("idea is empty")]
    Empty,

    #[error("idea is too long for the circuit: {actual} bytes, max {max}")]
    TooLong { actual: usize, max: usize },
}

/// Proof generation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProofError {
    #[error("proving artifact unavailable: {0}")]
    Artifact(String),

    #[error("prover failed: {0}")]
    Prover(String),

    #[error("invalid proof calldata: {0}")]
    InvalidCalldata(String),
}

/// Transaction submission or confirmation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("ledger rpc error: {0}")]
    Rpc(String),

    #[error("transaction signing failed: {0}")]
    Signing(String),

    #[error("transaction {transaction_hash:?} reverted")]
    Reverted { transaction_hash: Hash },

    #[error("transaction {transaction_hash:?} not confirmed after {waited_secs}s")]
    ConfirmationTimeout {
        transaction_hash: Hash,
        waited_secs: u64,
    },
}

/// Errors surfaced by the mint flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MintError {
    #[error(transparent)]
    InvalidIdea(#[from] InputError),

    #[error("idea {fingerprint} is already registered")]
    Duplicate { fingerprint: Fingerprint },

    #[error(transparent)]
    Proof(#[from] ProofError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("IdeaProven event not found in receipt of {transaction_hash:?}")]
    EventMissing { transaction_hash: Hash },
}
