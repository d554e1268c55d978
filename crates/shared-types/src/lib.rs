//! # Shared Types Crate
//!
//! Chain primitives used across the Patent-Notary subsystems.
//!
//! ## Design Principles
//!
//! - **Wire-faithful**: every type serializes the way an Ethereum JSON-RPC
//!   node expects it (`0x`-prefixed hex for quantities and data).
//! - **Full precision**: 256-bit values stay [`U256`]; nothing is narrowed to
//!   a native integer unless the protocol guarantees it fits (block numbers).

pub mod log;
pub mod primitives;
pub mod receipt;

pub use log::{BlockSpec, LogEntry, LogQuery};
pub use primitives::{quantity, Address, Bytes, Hash, ParseU256Error, U256};
pub use receipt::{CallRequest, TransactionReceipt};

/// Block height type.
pub type BlockNumber = u64;
