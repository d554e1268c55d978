//! # Inbound Ports (Driving Ports)

use crate::domain::{MintError, MintOutcome, MintRequest, ProofCalldata};
use async_trait::async_trait;
use shared_types::Address;

/// Primary API for the Idea Minting subsystem.
#[async_trait]
pub trait IdeaMintingApi: Send + Sync {
    /// Prove `request.idea` and mint it for `request.owner`.
    ///
    /// ## Returns
    ///
    /// - `Ok(MintOutcome)`: token minted and indexed state invalidated
    /// - `Err(MintError::Duplicate)`: fingerprint already on-chain, nothing sent
    /// - `Err(MintError::EventMissing)`: confirmed, but no `IdeaProven` log
    async fn mint(&self, request: MintRequest) -> Result<MintOutcome, MintError>;

    /// Mint from calldata the caller proved locally.
    async fn mint_with_calldata(
        &self,
        owner: Address,
        calldata: ProofCalldata,
    ) -> Result<MintOutcome, MintError>;
}
