//! Minimal ABI encoding for the patent contract.
//!
//! Every argument used here is a static type, so calldata is the selector
//! followed by one 32-byte word per scalar, fixed arrays inlined.

use crate::error::AbiError;
use sha3::{Digest, Keccak256};
use shared_types::{Address, U256};

pub const WORD: usize = 32;

pub const MINT_WITH_PROOF: &str =
    "mintWithProof(address,uint256[2],uint256[2][2],uint256[2],uint256[2])";

pub const TOKEN_ID_TO_IDEA_HASH: &str = "tokenIdToIdeaHash(uint256)";

/// First four bytes of keccak256 over the function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub fn encode_address(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

pub fn encode_uint(value: &U256) -> [u8; WORD] {
    value.to_be_bytes()
}

/// `mintWithProof(owner, a, b, c, input)`; `proof` holds the ten words of
/// a, b, c and input in argument order.
pub fn encode_mint_with_proof(owner: &Address, proof: &[U256; 10]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + WORD * 11);
    data.extend_from_slice(&selector(MINT_WITH_PROOF));
    data.extend_from_slice(&encode_address(owner));
    for word in proof {
        data.extend_from_slice(&encode_uint(word));
    }
    data
}

pub fn encode_token_id_to_idea_hash(token_id: &U256) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + WORD);
    data.extend_from_slice(&selector(TOKEN_ID_TO_IDEA_HASH));
    data.extend_from_slice(&encode_uint(token_id));
    data
}

/// First `count` words of `data` as unsigned integers.
pub fn decode_words(data: &[u8], count: usize) -> Result<Vec<U256>, AbiError> {
    let expected = count * WORD;
    if data.len() < expected {
        return Err(AbiError::ShortData {
            expected,
            actual: data.len(),
        });
    }
    Ok(data[..expected]
        .chunks_exact(WORD)
        .map(U256::from_be_slice)
        .collect())
}

/// Return value of `tokenIdToIdeaHash`: `(uint256, uint256)`.
pub fn decode_idea_hash(data: &[u8]) -> Result<[U256; 2], AbiError> {
    let words = decode_words(data, 2)?;
    Ok([words[0], words[1]])
}
