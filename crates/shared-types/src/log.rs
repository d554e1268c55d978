//! Event log types for `eth_getLogs`.

use crate::primitives::{quantity, Address, Bytes, Hash};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Block selector used as a range bound in log queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockSpec {
    /// Explicit block height
    Number(u64),
    #[default]
    Latest,
    Earliest,
    Pending,
}

impl BlockSpec {
    pub fn as_param(&self) -> String {
        match self {
            BlockSpec::Number(n) => format!("0x{:x}", n),
            BlockSpec::Latest => "latest".to_string(),
            BlockSpec::Earliest => "earliest".to_string(),
            BlockSpec::Pending => "pending".to_string(),
        }
    }
}

impl From<u64> for BlockSpec {
    fn from(n: u64) -> Self {
        BlockSpec::Number(n)
    }
}

impl Serialize for BlockSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_param())
    }
}

impl<'de> Deserialize<'de> for BlockSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "latest" => Ok(BlockSpec::Latest),
            "earliest" => Ok(BlockSpec::Earliest),
            "pending" => Ok(BlockSpec::Pending),
            other => quantity::parse_hex_u64(other)
                .map(BlockSpec::Number)
                .map_err(de::Error::custom),
        }
    }
}

/// Filter object for `eth_getLogs`, restricted to one contract.
///
/// `topics[i] == None` matches any value in position `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    pub address: Address,
    pub from_block: BlockSpec,
    pub to_block: BlockSpec,
    pub topics: Vec<Option<Hash>>,
}

impl LogQuery {
    /// All logs of one event signature emitted by `address` in `[from, to]`.
    pub fn for_event(address: Address, topic0: Hash, from: BlockSpec, to: BlockSpec) -> Self {
        Self {
            address,
            from_block: from,
            to_block: to,
            topics: vec![Some(topic0)],
        }
    }

    /// Signature topic this query is restricted to, if any.
    pub fn topic0(&self) -> Option<Hash> {
        self.topics.first().copied().flatten()
    }
}

/// A single log entry as returned by the node.
///
/// Pending logs carry no block number or transaction hash, hence the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub address: Address,
    pub topics: Vec<Hash>,
    pub data: Bytes,
    #[serde(default, with = "quantity::option")]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub transaction_hash: Option<Hash>,
    #[serde(default, with = "quantity::option")]
    pub log_index: Option<u64>,
    #[serde(default)]
    pub removed: bool,
}

impl LogEntry {
    /// Event signature hash (first topic) for non-anonymous events.
    pub fn signature(&self) -> Option<&Hash> {
        self.topics.first()
    }
}
