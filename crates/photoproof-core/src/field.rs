//! # Scalar Field Packing
//!
//! The canonical value of an image is a single element of the BN254 scalar
//! field. Pixels are packed into 32-bit words (`r<<16 | g<<8 | b`), the words
//! are concatenated big-endian in row-major order, and the resulting integer
//! is reduced modulo the field order.
//!
//! The same packing runs out of circuit (when an image is hashed for
//! signing) and inside the compliance predicate (when the hash gadget
//! re-derives the element from pixel wires). Both call [`FieldElement::pack`].

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// BN254 scalar field order, big-endian.
pub const BN254_SCALAR_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// A reduced BN254 scalar, stored as 32 big-endian bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement([u8; 32]);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: FieldElement = FieldElement([0u8; 32]);

    /// Reduce an arbitrary big-endian integer into the field.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        let modulus = BigUint::from_bytes_be(&BN254_SCALAR_MODULUS);
        let reduced = BigUint::from_bytes_be(bytes) % &modulus;
        let digits = reduced.to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - digits.len()..].copy_from_slice(&digits);
        Self(out)
    }

    /// Pack RGB triples into one field element.
    ///
    /// Each pixel contributes a 32-bit word `0x00RRGGBB`; words are
    /// concatenated in iteration order.
    pub fn pack<I>(pixels: I) -> Self
    where
        I: IntoIterator<Item = [u8; 3]>,
    {
        let words: Vec<u8> = pixels
            .into_iter()
            .flat_map(|[r, g, b]| [0u8, r, g, b])
            .collect();
        Self::from_be_bytes_mod_order(&words)
    }

    /// Big-endian byte representation.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-character hex string. The value must already be reduced.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s.trim()).map_err(|e| CoreError::HexDecode(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::HexDecode("field element must be 32 bytes".to_string()))?;
        if arr >= BN254_SCALAR_MODULUS {
            return Err(CoreError::HexDecode(
                "field element is not reduced".to_string(),
            ));
        }
        Ok(Self(arr))
    }
}

impl std::fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FieldElement({})", self.to_hex())
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
