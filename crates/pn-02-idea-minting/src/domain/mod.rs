//! # Domain Layer
//!
//! Proof inputs, calldata, mint records and errors.

pub mod calldata;
pub mod circuit;
pub mod entities;
pub mod errors;

pub use calldata::ProofCalldata;
pub use circuit::{prepare_circuit_input, CircuitInput, MAX_IDEA_BYTES, PREIMAGE_BITS};
pub use entities::{MintOutcome, MintReceipt, MintRequest, MintingConfig};
pub use errors::{InputError, MintError, ProofError, SubmissionError};
