//! # Ledger RPC (pn-03)
//!
//! Everything that talks to the Ethereum node:
//!
//! - [`EthRpcClient`]: JSON-RPC 2.0 over HTTP
//! - [`TransactionSigner`]: secp256k1 keys, EIP-155 legacy transactions
//! - [`abi`]: selectors and static-type encoding for the patent contract
//! - [`ContractWriter`]: nonce / gas / sign / send, then receipt polling
//!
//! ```text
//! ContractWriter::send(data)
//!   ├─ eth_getTransactionCount(from, "pending")
//!   ├─ eth_gasPrice
//!   ├─ eth_estimateGas  (+ safety margin)
//!   ├─ TransactionSigner::sign_legacy  (rlp, keccak, secp256k1)
//!   └─ eth_sendRawTransaction ──→ tx hash
//!
//! ContractWriter::wait_for_receipt(hash)
//!   └─ eth_getTransactionReceipt every poll_interval until found or timeout
//! ```

pub mod abi;
pub mod client;
pub mod config;
pub mod error;
pub mod signer;
pub mod writer;

pub use client::EthRpcClient;
pub use config::RpcConfig;
pub use error::{AbiError, IdeaHashError, RpcError, SignerError, WriteError};
pub use signer::{LegacyTransaction, SignedTransaction, TransactionSigner};
pub use writer::ContractWriter;
