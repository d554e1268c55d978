//! # Domain Errors
//!
//! Error types for the Event Index subsystem.

use super::events::EventKind;
use shared_types::Hash;

/// Failure reported by the ledger while answering a log query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct LedgerReadError(pub String);

impl LedgerReadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A log entry of the requested kind could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{kind} log is missing topic {index}")]
    MissingTopic { kind: EventKind, index: usize },

    #[error("{kind} log data is {actual} bytes, expected {expected}")]
    DataLength {
        kind: EventKind,
        expected: usize,
        actual: usize,
    },

    #[error("topic {topic:?} is not a left-padded address")]
    InvalidAddressTopic { topic: Hash },

    #[error("{kind} log has no block number")]
    MissingBlockNumber { kind: EventKind },

    #[error("{kind} log has no transaction hash")]
    MissingTransactionHash { kind: EventKind },
}

/// Index build failure. The affected cache slot is left unbuilt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// The historical log query itself failed.
    #[error("failed to build {kind} index: ledger query failed: {source}")]
    Scan {
        kind: EventKind,
        #[source]
        source: LedgerReadError,
    },

    /// An entry of the requested kind was malformed.
    #[error("failed to build {kind} index: {source}")]
    Decode {
        kind: EventKind,
        #[source]
        source: DecodeError,
    },
}

impl IndexError {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Scan { kind, .. } | Self::Decode { kind, .. } => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_message_names_the_build() {
        let err = IndexError::Scan {
            kind: EventKind::Registration,
            source: LedgerReadError::new("connection refused"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to build registration index"));
        assert!(msg.contains("connection refused"));
        assert_eq!(err.kind(), EventKind::Registration);
    }

    #[test]
    fn test_decode_error_message() {
        let err = DecodeError::DataLength {
            kind: EventKind::Registration,
            expected: 64,
            actual: 32,
        };
        assert_eq!(
            err.to_string(),
            "registration log data is 32 bytes, expected 64"
        );
    }
}
