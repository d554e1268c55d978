//! # Proof Calldata
//!
//! Groth16 proof points plus public signals, shaped for
//! `mintWithProof(address, uint256[2], uint256[2][2], uint256[2], uint256[2])`.

use super::errors::ProofError;
use pn_01_event_index::Fingerprint;
use serde::{Deserialize, Serialize};
use shared_types::U256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofCalldata {
    pub a: [U256; 2],
    pub b: [[U256; 2]; 2],
    pub c: [U256; 2],
    /// Public signals: the idea's fingerprint.
    pub input: [U256; 2],
}

impl ProofCalldata {
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint(self.input)
    }

    /// Parse the text printed by `snarkjs zkey export soliditycalldata`:
    /// four comma-separated JSON arrays without an enclosing bracket.
    pub fn from_solidity_calldata(text: &str) -> Result<Self, ProofError> {
        let wrapped = format!("[{}]", text.trim());
        let (a, b, c, input): ([U256; 2], [[U256; 2]; 2], [U256; 2], [U256; 2]) =
            serde_json::from_str(&wrapped)
                .map_err(|e| ProofError::InvalidCalldata(e.to_string()))?;
        Ok(Self { a, b, c, input })
    }

    /// Flattened in ABI argument order: a, b, c, input.
    pub fn words(&self) -> [U256; 10] {
        [
            self.a[0],
            self.a[1],
            self.b[0][0],
            self.b[0][1],
            self.b[1][0],
            self.b[1][1],
            self.c[0],
            self.c[1],
            self.input[0],
            self.input[1],
        ]
    }
}
