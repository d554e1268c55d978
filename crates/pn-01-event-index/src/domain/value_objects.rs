//! # Value Objects
//!
//! Immutable records observed in the contract's event log.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shared_types::{Address, BlockNumber, Hash, ParseU256Error, U256};
use std::fmt;

/// Content fingerprint of an idea: the two public signals of the hash
/// preimage proof, stored on-chain as `uint256[2]`.
///
/// Equality is numeric. `("007", "0x2")` and `("7", "2")` are the same
/// fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [U256; 2]);

impl Fingerprint {
    pub fn new(first: U256, second: U256) -> Self {
        Self([first, second])
    }

    /// Parse both words from text. Each accepts decimal or `0x` hex.
    pub fn parse(first: &str, second: &str) -> Result<Self, ParseU256Error> {
        Ok(Self([U256::parse(first)?, U256::parse(second)?]))
    }

    pub fn words(&self) -> &[U256; 2] {
        &self.0
    }

    /// Comparison key used by the fingerprint index: both words as exact
    /// decimal strings joined by `,`.
    pub fn canonical_key(&self) -> String {
        format!("{},{}", self.0[0].to_dec_string(), self.0[1].to_dec_string())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.canonical_key())
    }
}

/// Serialized as `["<decimal>", "<decimal>"]`; deserialized from strings
/// (decimal or hex) or small numbers.
impl Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.0[0].to_dec_string(), self.0[1].to_dec_string()].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <[U256; 2]>::deserialize(deserializer).map(Fingerprint)
    }
}

/// One successful mint: an ERC-721 `Transfer` from the zero address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRecord {
    #[serde(with = "decimal")]
    pub token_id: U256,
    pub transaction_hash: Hash,
    pub block_number: BlockNumber,
    /// Recipient of the freshly minted token.
    pub owner: Address,
}

/// Decoded `IdeaProven(uint256 indexed tokenId, uint256[2] ideaHash)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationEvent {
    pub token_id: U256,
    pub fingerprint: Fingerprint,
    pub transaction_hash: Option<Hash>,
    pub block_number: Option<BlockNumber>,
}

/// Serde helpers rendering token ids as exact decimal strings.
pub mod decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use shared_types::U256;

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_dec_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        U256::parse(&s).map_err(de::Error::custom)
    }
}
