//! `FingerprintLookup` over the contract's `tokenIdToIdeaHash` view.

use async_trait::async_trait;
use pn_01_event_index::Fingerprint;
use pn_03_ledger_rpc::ContractWriter;
use pn_04_api_gateway::{FingerprintLookup, LookupError};
use shared_types::U256;
use std::sync::Arc;

pub struct ContractFingerprintReader {
    writer: Arc<ContractWriter>,
}

impl ContractFingerprintReader {
    pub fn new(writer: Arc<ContractWriter>) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl FingerprintLookup for ContractFingerprintReader {
    async fn fingerprint_of(&self, token_id: U256) -> Result<Fingerprint, LookupError> {
        self.writer
            .idea_hash_of(&token_id)
            .await
            .map(Fingerprint)
            .map_err(|e| LookupError(e.to_string()))
    }
}
