//! Core primitives with JSON-RPC serialization.
//!
//! All types follow Ethereum JSON-RPC conventions with hex string serialization.

use primitive_types::U256 as PrimitiveU256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// Re-export primitive types for convenience
pub use primitive_types::{H160 as Address, H256 as Hash};

/// Error returned when a string is not a valid unsigned 256-bit integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseU256Error {
    #[error("empty integer string")]
    Empty,
    #[error("invalid decimal integer: {0}")]
    InvalidDecimal(String),
    #[error("invalid hex integer: {0}")]
    InvalidHex(String),
}

/// U256 wrapper with hex string serialization for JSON-RPC compatibility.
///
/// Serializes as `"0x..."` hex string, deserializes from hex string, decimal
/// string or number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct U256(pub PrimitiveU256);

impl U256 {
    pub const ZERO: U256 = U256(PrimitiveU256::zero());
    pub const ONE: U256 = U256(PrimitiveU256::one());
    pub const MAX: U256 = U256(PrimitiveU256::MAX);

    #[inline]
    pub fn from_dec_str(s: &str) -> Result<Self, ParseU256Error> {
        PrimitiveU256::from_dec_str(s)
            .map(U256)
            .map_err(|_| ParseU256Error::InvalidDecimal(s.to_string()))
    }

    /// Parse a `0x`-prefixed hex string. Leading zeros are accepted.
    pub fn from_hex_str(s: &str) -> Result<Self, ParseU256Error> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return if digits.is_empty() {
                Err(ParseU256Error::InvalidHex(s.to_string()))
            } else {
                Ok(U256::ZERO)
            };
        }
        PrimitiveU256::from_str(significant)
            .map(U256)
            .map_err(|_| ParseU256Error::InvalidHex(s.to_string()))
    }

    /// Parse either notation: `0x`-prefixed hex or plain decimal.
    ///
    /// Surrounding whitespace is ignored, so `" 007"` and `"0x7"` both
    /// yield seven.
    pub fn parse(s: &str) -> Result<Self, ParseU256Error> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseU256Error::Empty);
        }
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex_str(s)
        } else {
            Self::from_dec_str(s)
        }
    }

    /// Interpret up to 32 big-endian bytes as an integer.
    #[inline]
    pub fn from_be_slice(bytes: &[u8]) -> Self {
        U256(PrimitiveU256::from_big_endian(bytes))
    }

    /// 32-byte big-endian encoding (one ABI word).
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }

    /// Exact base-10 rendering, no truncation.
    pub fn to_dec_string(&self) -> String {
        self.0.to_string()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0.as_u64()
    }

    #[inline]
    pub fn into_inner(self) -> PrimitiveU256 {
        self.0
    }

    /// Saturating multiplication
    #[inline]
    pub fn saturating_mul(self, other: Self) -> Self {
        U256(self.0.saturating_mul(other.0))
    }

    /// Checked division
    #[inline]
    pub fn checked_div(self, other: Self) -> Option<Self> {
        self.0.checked_div(other.0).map(U256)
    }
}

impl From<u64> for U256 {
    fn from(v: u64) -> Self {
        U256(PrimitiveU256::from(v))
    }
}

impl From<PrimitiveU256> for U256 {
    fn from(v: PrimitiveU256) -> Self {
        U256(v)
    }
}

impl From<U256> for PrimitiveU256 {
    fn from(v: U256) -> Self {
        v.0
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl Serialize for U256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{:x}", self.0))
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct U256Visitor;

        impl<'de> de::Visitor<'de> for U256Visitor {
            type Value = U256;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a hex string starting with 0x, a decimal string or a number")
            }

            fn visit_str<E>(self, value: &str) -> Result<U256, E>
            where
                E: de::Error,
            {
                U256::parse(value).map_err(de::Error::custom)
            }

            fn visit_u64<E>(self, value: u64) -> Result<U256, E>
            where
                E: de::Error,
            {
                Ok(U256::from(value))
            }
        }

        deserializer.deserialize_any(U256Visitor)
    }
}

/// Bytes wrapper with hex serialization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Bytes(Vec::new())
    }

    pub fn from_slice(slice: &[u8]) -> Self {
        Bytes(slice.to_vec())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Bytes(v)
    }
}

impl From<&[u8]> for Bytes {
    fn from(v: &[u8]) -> Self {
        Bytes(v.to_vec())
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(&self.0)))
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(s)
            .map(Bytes)
            .map_err(|_| de::Error::custom("invalid hex bytes"))
    }
}

/// Serde helpers for JSON-RPC quantities that fit in a `u64`
/// (block numbers, nonces, log indices, receipt status).
///
/// Use with `#[serde(with = "quantity")]` or
/// `#[serde(default, with = "quantity::option")]`.
pub mod quantity {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::fmt;

    struct Quantity(u64);

    impl<'de> Deserialize<'de> for Quantity {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct QuantityVisitor;

            impl<'de> de::Visitor<'de> for QuantityVisitor {
                type Value = Quantity;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a 0x-prefixed hex quantity or a number")
                }

                fn visit_str<E>(self, value: &str) -> Result<Quantity, E>
                where
                    E: de::Error,
                {
                    parse_hex_u64(value).map(Quantity).map_err(de::Error::custom)
                }

                fn visit_u64<E>(self, value: u64) -> Result<Quantity, E>
                where
                    E: de::Error,
                {
                    Ok(Quantity(value))
                }
            }

            deserializer.deserialize_any(QuantityVisitor)
        }
    }

    /// Parse `0x1b4` style quantities. The prefix is optional.
    pub fn parse_hex_u64(value: &str) -> Result<u64, String> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        u64::from_str_radix(digits, 16).map_err(|e| format!("invalid quantity {value:?}: {e}"))
    }

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{:x}", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Quantity::deserialize(deserializer).map(|q| q.0)
    }

    pub mod option {
        use super::Quantity;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<Quantity>::deserialize(deserializer).map(|q| q.map(|q| q.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_serialize() {
        let val = U256::from(255u64);
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, "\"0xff\"");
    }

    #[test]
    fn test_u256_deserialize_hex() {
        let val: U256 = serde_json::from_str("\"0xff\"").unwrap();
        assert_eq!(val, U256::from(255u64));
    }

    #[test]
    fn test_u256_deserialize_decimal() {
        let val: U256 = serde_json::from_str("\"255\"").unwrap();
        assert_eq!(val, U256::from(255u64));
    }

    #[test]
    fn test_u256_deserialize_number() {
        let val: U256 = serde_json::from_str("255").unwrap();
        assert_eq!(val, U256::from(255u64));
    }

    #[test]
    fn test_parse_accepts_leading_zeros() {
        assert_eq!(U256::parse("0007").unwrap(), U256::from(7u64));
        assert_eq!(U256::parse("0x0007").unwrap(), U256::from(7u64));
        assert_eq!(U256::parse(" 42 ").unwrap(), U256::from(42u64));
        assert_eq!(U256::parse("0x000").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_hex_with_64_significant_digits_and_padding() {
        let padded = format!("0x0000{}", "f".repeat(64));
        assert_eq!(U256::parse(&padded).unwrap(), U256::MAX);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(U256::parse(""), Err(ParseU256Error::Empty));
        assert!(U256::parse("12a").is_err());
        assert!(U256::parse("0x").is_err());
        assert!(U256::parse("0xzz").is_err());
        assert!(U256::parse("-1").is_err());
    }

    #[test]
    fn test_dec_string_beyond_u64() {
        // 2^64 + 1
        let val = U256::parse("18446744073709551617").unwrap();
        assert_eq!(val.to_dec_string(), "18446744073709551617");
    }

    #[test]
    fn test_be_bytes_word() {
        let val = U256::from(0x0102u64);
        let word = val.to_be_bytes();
        assert_eq!(word[30], 0x01);
        assert_eq!(word[31], 0x02);
        assert_eq!(U256::from_be_slice(&word), val);
    }

    #[test]
    fn test_bytes_serialize() {
        let bytes = Bytes::from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let json = serde_json::to_string(&bytes).unwrap();
        assert_eq!(json, "\"0xdeadbeef\"");
    }

    #[test]
    fn test_bytes_deserialize() {
        let bytes: Bytes = serde_json::from_str("\"0xdeadbeef\"").unwrap();
        assert_eq!(bytes.as_slice(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(quantity::parse_hex_u64("0x1b4").unwrap(), 436);
        assert_eq!(quantity::parse_hex_u64("1b4").unwrap(), 436);
        assert!(quantity::parse_hex_u64("0xnope").is_err());
    }
}
