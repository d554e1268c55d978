//! # Circuit Input
//!
//! The hash-preimage circuit takes a fixed 2048-bit preimage. Ideas are
//! UTF-8 encoded, zero-padded to 256 bytes and expanded bit by bit,
//! most significant bit of each byte first.

use super::errors::InputError;
use serde::Serialize;

/// Largest idea the circuit accepts, in UTF-8 bytes.
pub const MAX_IDEA_BYTES: usize = 256;

/// Length of the circuit's `preimage` signal.
pub const PREIMAGE_BITS: usize = MAX_IDEA_BYTES * 8;

/// Witness input, serialized as `{"preimage": [0, 1, ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitInput {
    pub preimage: Vec<u8>,
}

impl CircuitInput {
    pub fn to_json(&self) -> String {
        serde_json::json!({ "preimage": self.preimage }).to_string()
    }
}

pub fn prepare_circuit_input(idea: &str) -> Result<CircuitInput, InputError> {
    let bytes = idea.as_bytes();
    if bytes.is_empty() {
        return Err(InputError::Empty);
    }
    if bytes.len() > MAX_IDEA_BYTES {
        return Err(InputError::TooLong {
            actual: bytes.len(),
            max: MAX_IDEA_BYTES,
        });
    }

    let mut padded = [0u8; MAX_IDEA_BYTES];
    padded[..bytes.len()].copy_from_slice(bytes);

    let preimage = padded
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |i| (byte >> i) & 1))
        .collect();

    Ok(CircuitInput { preimage })
}
