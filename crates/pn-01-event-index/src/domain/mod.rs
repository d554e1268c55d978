//! # Domain Layer
//!
//! Pure event-index logic. No I/O, no async.

pub mod config;
pub mod entities;
pub mod errors;
pub mod events;
pub mod value_objects;

pub use config::IndexConfig;
pub use entities::{CacheState, CacheStatus, FingerprintIndex, IndexStats, RecencyList};
pub use errors::{DecodeError, IndexError, LedgerReadError};
pub use events::{
    decode_mint_transfer, decode_registration, event_topic, EventKind, IDEA_PROVEN_SIGNATURE,
    TRANSFER_SIGNATURE,
};
pub use value_objects::{Fingerprint, MintRecord, RegistrationEvent};
