//! # Outbound Ports
//!
//! Collaborators the gateway needs beyond the index and minting APIs.

use async_trait::async_trait;
use pn_01_event_index::Fingerprint;
use shared_types::U256;

/// Failure reading contract state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("contract read failed: {0}")]
pub struct LookupError(pub String);

/// On-chain `tokenIdToIdeaHash` view.
#[async_trait]
pub trait FingerprintLookup: Send + Sync {
    /// Stored fingerprint of `token_id`. The contract answers `(0, 0)` for
    /// tokens it never minted.
    async fn fingerprint_of(&self, token_id: U256) -> Result<Fingerprint, LookupError>;
}

/// Failure condensing a document into an idea.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummarizeError {
    #[error("summarizer request failed: {0}")]
    Upstream(String),

    #[error("summarizer returned no text")]
    EmptyResponse,
}

/// Condenses the text of a patent document into the single idea sentence
/// that gets proved and minted.
#[async_trait]
pub trait IdeaSummarizer: Send + Sync {
    async fn summarize(&self, document: &str) -> Result<String, SummarizeError>;
}
