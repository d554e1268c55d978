//! # Event Decoding
//!
//! Topic hashes and log decoders for the two events the index replays.
//!
//! ```text
//! IdeaProven(uint256 indexed tokenId, uint256[2] ideaHash)
//!   topics: [sig, tokenId]            data: ideaHash[0] ‖ ideaHash[1]
//!
//! Transfer(address indexed from, address indexed to, uint256 indexed tokenId)
//!   topics: [sig, from, to, tokenId]  data: empty
//! ```

use super::errors::DecodeError;
use super::value_objects::{Fingerprint, MintRecord, RegistrationEvent};
use serde::Serialize;
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash, LogEntry, U256};
use std::fmt;

/// Canonical signature of the registration event.
pub const IDEA_PROVEN_SIGNATURE: &str = "IdeaProven(uint256,uint256[2])";

/// Canonical signature of the ERC-721 transfer event.
pub const TRANSFER_SIGNATURE: &str = "Transfer(address,address,uint256)";

/// ABI word size.
const WORD: usize = 32;

/// keccak256 of an event signature, i.e. its `topic0`.
pub fn event_topic(signature: &str) -> Hash {
    Hash::from_slice(&Keccak256::digest(signature.as_bytes()))
}

/// The event kinds the index is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// `IdeaProven`: a fingerprint was associated with a token.
    Registration,
    /// `Transfer` from the zero address: a token was created.
    MintTransfer,
}

impl EventKind {
    pub fn signature(&self) -> &'static str {
        match self {
            Self::Registration => IDEA_PROVEN_SIGNATURE,
            Self::MintTransfer => TRANSFER_SIGNATURE,
        }
    }

    pub fn topic(&self) -> Hash {
        event_topic(self.signature())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::MintTransfer => "mint-transfer",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode an `IdeaProven` log.
///
/// The fingerprint words are read as full 256-bit integers; nothing is
/// narrowed.
pub fn decode_registration(log: &LogEntry) -> Result<RegistrationEvent, DecodeError> {
    let kind = EventKind::Registration;
    let token_topic = topic_at(log, kind, 1)?;

    let data = log.data.as_slice();
    if data.len() != 2 * WORD {
        return Err(DecodeError::DataLength {
            kind,
            expected: 2 * WORD,
            actual: data.len(),
        });
    }

    let fingerprint = Fingerprint::new(
        U256::from_be_slice(&data[..WORD]),
        U256::from_be_slice(&data[WORD..]),
    );

    Ok(RegistrationEvent {
        token_id: U256::from_be_slice(token_topic.as_bytes()),
        fingerprint,
        transaction_hash: log.transaction_hash,
        block_number: log.block_number,
    })
}

/// Decode a `Transfer` log.
///
/// Returns `Ok(None)` for ordinary transfers (non-zero `from`); only mints
/// become records.
pub fn decode_mint_transfer(log: &LogEntry) -> Result<Option<MintRecord>, DecodeError> {
    let kind = EventKind::MintTransfer;
    let from = topic_to_address(topic_at(log, kind, 1)?)?;
    let to = topic_to_address(topic_at(log, kind, 2)?)?;
    let token_topic = topic_at(log, kind, 3)?;

    if !from.is_zero() {
        return Ok(None);
    }

    let block_number = log
        .block_number
        .ok_or(DecodeError::MissingBlockNumber { kind })?;
    let transaction_hash = log
        .transaction_hash
        .ok_or(DecodeError::MissingTransactionHash { kind })?;

    Ok(Some(MintRecord {
        token_id: U256::from_be_slice(token_topic.as_bytes()),
        transaction_hash,
        block_number,
        owner: to,
    }))
}

fn topic_at(log: &LogEntry, kind: EventKind, index: usize) -> Result<&Hash, DecodeError> {
    log.topics
        .get(index)
        .ok_or(DecodeError::MissingTopic { kind, index })
}

/// Indexed addresses are left-padded to 32 bytes; the padding must be zero.
fn topic_to_address(topic: &Hash) -> Result<Address, DecodeError> {
    let bytes = topic.as_bytes();
    if bytes[..12].iter().any(|&b| b != 0) {
        return Err(DecodeError::InvalidAddressTopic { topic: *topic });
    }
    Ok(Address::from_slice(&bytes[12..]))
}
