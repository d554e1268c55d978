//! # Outbound Ports (Driven Ports)

use crate::domain::{CircuitInput, MintReceipt, ProofCalldata, ProofError, SubmissionError};
use async_trait::async_trait;
use shared_types::{Address, Hash};

/// Groth16 prover for the hash-preimage circuit.
#[async_trait]
pub trait ProofGenerator: Send + Sync {
    async fn prove(&self, input: &CircuitInput) -> Result<ProofCalldata, ProofError>;
}

/// Ledger write side.
#[async_trait]
pub trait MintSubmitter: Send + Sync {
    /// Sign and broadcast `mintWithProof`. Returns the transaction hash.
    async fn submit_mint(
        &self,
        owner: Address,
        calldata: &ProofCalldata,
    ) -> Result<Hash, SubmissionError>;

    /// Wait until the transaction is mined. A reverted transaction is an
    /// error.
    async fn await_confirmation(
        &self,
        transaction_hash: Hash,
    ) -> Result<MintReceipt, SubmissionError>;
}
