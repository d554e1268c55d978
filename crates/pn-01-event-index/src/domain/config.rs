//! Index configuration.

use shared_types::{Address, BlockNumber};

/// Where to look for events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Patent NFT contract emitting `IdeaProven` and `Transfer`.
    pub contract_address: Address,
    /// First block scanned (usually the deployment block). Defaults to 0.
    pub genesis_block: BlockNumber,
}

impl IndexConfig {
    pub fn new(contract_address: Address) -> Self {
        Self {
            contract_address,
            genesis_block: 0,
        }
    }

    pub fn with_genesis_block(mut self, genesis_block: BlockNumber) -> Self {
        self.genesis_block = genesis_block;
        self
    }
}
