//! # Idea Minting Subsystem (pn-02)
//!
//! Turns an idea (or a locally generated proof) into a patent NFT.
//!
//! ## Mint Flow
//!
//! ```text
//! idea ──→ prepare_circuit_input ──→ ProofGenerator::prove ──→ ProofCalldata
//!                                                                   │
//!            ┌──────────────────────────────────────────────────────┘
//!            ↓
//!   EventIndexApi::exists(input) ── true ──→ MintError::Duplicate
//!            │ false
//!            ↓
//!   MintSubmitter::submit_mint ──→ await_confirmation ──→ MintReceipt
//!                                                            │
//!   EventIndexApi::invalidate() ←────────────────────────────┘
//!            │
//!            ↓
//!   IdeaProven in receipt? ── no ──→ MintError::EventMissing
//!            │ yes
//!            ↓
//!        MintOutcome { token_id, transaction_hash, block_number, fingerprint }
//! ```
//!
//! Invalidation happens as soon as the receipt is confirmed, before the
//! receipt is inspected, so a confirmed mint is never hidden from the
//! duplicate guard even if its event cannot be found.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    prepare_circuit_input, CircuitInput, InputError, MintError, MintOutcome, MintReceipt,
    MintRequest, MintingConfig, ProofCalldata, ProofError, SubmissionError, MAX_IDEA_BYTES,
    PREIMAGE_BITS,
};
pub use ports::{IdeaMintingApi, MintSubmitter, ProofGenerator};
pub use service::IdeaMintingService;
