//! EIP-155 legacy transaction signing.
//!
//! ```text
//! signing hash = keccak256(rlp([nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0]))
//! raw          = rlp([nonce, gasPrice, gasLimit, to, value, data, v, r, s])
//! v            = chainId * 2 + 35 + recovery_id
//! ```

use crate::error::SignerError;
use primitive_types::U256 as PrimitiveU256;
use rlp::RlpStream;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash, U256};

/// Unsigned legacy transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: U256,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
}

impl LegacyTransaction {
    fn append_unsigned_fields(&self, stream: &mut RlpStream) {
        stream.append(&self.nonce);
        stream.append(&self.gas_price.into_inner());
        stream.append(&self.gas_limit.into_inner());
        match &self.to {
            Some(to) => stream.append(to),
            None => stream.append_empty_data(),
        };
        stream.append(&self.value.into_inner());
        stream.append(&self.data);
    }

    pub fn signing_hash(&self, chain_id: u64) -> [u8; 32] {
        let mut stream = RlpStream::new_list(9);
        self.append_unsigned_fields(&mut stream);
        stream.append(&chain_id);
        stream.append(&0u8);
        stream.append(&0u8);
        Keccak256::digest(stream.as_raw()).into()
    }
}

/// RLP-encoded signed transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub raw: Vec<u8>,
    /// keccak256 of `raw`; what the node returns as the transaction hash.
    pub hash: Hash,
}

pub struct TransactionSigner {
    secp: Secp256k1<secp256k1::All>,
    secret: SecretKey,
    address: Address,
    chain_id: u64,
}

impl TransactionSigner {
    /// Load a key from 64 hex characters, `0x` prefix optional.
    pub fn from_hex(private_key: &str, chain_id: u64) -> Result<Self, SignerError> {
        let trimmed = private_key.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        let secret =
            SecretKey::from_slice(&bytes).map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        Ok(Self::from_secret(secret, chain_id))
    }

    pub fn from_secret(secret: SecretKey, chain_id: u64) -> Self {
        let secp = Secp256k1::new();
        let public = PublicKey::from_secret_key(&secp, &secret);
        Self {
            secp,
            secret,
            address: address_from_public_key(&public),
            chain_id,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn sign_legacy(&self, tx: &LegacyTransaction) -> Result<SignedTransaction, SignerError> {
        let digest = tx.signing_hash(self.chain_id);
        let message =
            Message::from_digest_slice(&digest).map_err(|e| SignerError::Signing(e.to_string()))?;
        let signature = self.secp.sign_ecdsa_recoverable(&message, &self.secret);
        let (recovery_id, compact) = signature.serialize_compact();

        let v = self.chain_id * 2 + 35 + recovery_id.to_i32() as u64;
        let r = PrimitiveU256::from_big_endian(&compact[..32]);
        let s = PrimitiveU256::from_big_endian(&compact[32..]);

        let mut stream = RlpStream::new_list(9);
        tx.append_unsigned_fields(&mut stream);
        stream.append(&v);
        stream.append(&r);
        stream.append(&s);

        let raw = stream.out().to_vec();
        let hash = Hash::from_slice(&Keccak256::digest(&raw));
        Ok(SignedTransaction { raw, hash })
    }
}

/// Last 20 bytes of keccak256 over the uncompressed key without its 0x04 prefix.
pub fn address_from_public_key(public: &PublicKey) -> Address {
    let uncompressed = public.serialize_uncompressed();
    let hash = Keccak256::digest(&uncompressed[1..]);
    Address::from_slice(&hash[12..])
}
