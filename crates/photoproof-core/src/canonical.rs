//! # Canonical Serialization
//!
//! `CanonicalBytes` is the sole construction path for bytes that get hashed
//! anywhere in PhotoProof. Two constructors exist:
//!
//! - [`CanonicalBytes::from_image`] is the fixed-width binary form of an
//!   image: its packed field element followed by every provenance entry.
//!   This is what cameras and editors sign, and what the in-circuit hash
//!   gadget recomputes.
//! - [`CanonicalBytes::from_json`] is RFC 8785 (JCS) canonical JSON for
//!   structured payloads such as circuit descriptions and proof transcripts.
//!
//! ## Security Invariant
//!
//! The inner buffer is private. Any function that computes a digest accepts
//! `&CanonicalBytes`, so a digest can only be taken over bytes produced by
//! one of the two pipelines above.
//!
//! ## Image Layout
//!
//! ```text
//! packed field element   32 bytes, big-endian
//! for each entry (tag order):
//!     tag                 u16 big-endian
//!     bound               u32 big-endian
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;
use crate::field::FieldElement;
use crate::image::Image;
use crate::provenance::{Provenance, PROVENANCE_LEN};

/// Length of the binary image form.
pub const IMAGE_CANONICAL_LEN: usize = 32 + PROVENANCE_LEN * 6;

/// Bytes produced exclusively by one of the canonicalization pipelines.
///
/// # Invariants
///
/// - Image bytes always have length [`IMAGE_CANONICAL_LEN`].
/// - JSON bytes have sorted keys, compact separators and no floats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonical binary form of an image.
    pub fn from_image(image: &Image) -> Self {
        Self::from_image_parts(&image.packed(), image.provenance())
    }

    /// Canonical binary form from an already-packed element.
    ///
    /// The in-circuit hash gadget uses this after re-packing pixel wires, so
    /// both sides of the circuit boundary share one byte layout.
    pub fn from_image_parts(packed: &FieldElement, provenance: &Provenance) -> Self {
        let mut out = Vec::with_capacity(IMAGE_CANONICAL_LEN);
        out.extend_from_slice(&packed.to_bytes());
        for entry in provenance.entries() {
            out.extend_from_slice(&entry.id.tag().to_be_bytes());
            out.extend_from_slice(&entry.bound.to_be_bytes());
        }
        Self(out)
    }

    /// Canonical JSON form of any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// float numbers. Returns `CanonicalizationError::SerializationFailed` if
    /// JCS serialization fails.
    pub fn from_json(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let coerced = reject_floats(value)?;
        let s = serde_jcs::to_string(&coerced)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively reject non-integer numbers; everything else passes through.
fn reject_floats(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(ref n) => {
            if n.is_f64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(value)
        }
        Value::Object(map) => {
            let mut coerced = serde_json::Map::new();
            for (k, v) in map {
                coerced.insert(k, reject_floats(v)?);
            }
            Ok(Value::Object(coerced))
        }
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(reject_floats).collect();
            Ok(Value::Array(coerced?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixel;
    use crate::provenance::{ProvenanceBounds, TransformationId};

    #[test]
    fn image_bytes_have_fixed_layout() {
        let img = Image::filled(Pixel::BLACK, Provenance::default());
        let cb = CanonicalBytes::from_image(&img);
        assert_eq!(cb.len(), IMAGE_CANONICAL_LEN);
        // All-black grid packs to zero.
        assert!(cb.as_bytes()[..32].iter().all(|b| *b == 0));
        // First entry: identity tag 0, bound 1.
        assert_eq!(&cb.as_bytes()[32..38], &[0, 0, 0, 0, 0, 1]);
        // Second entry: crop tag 1, bound 1.
        assert_eq!(&cb.as_bytes()[38..44], &[0, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn provenance_is_part_of_image_bytes() {
        let img = Image::filled(Pixel::BLACK, Provenance::default());
        let spent = img.with_provenance(
            img.provenance()
                .consume(TransformationId::Rotate)
                .unwrap(),
        );
        assert_ne!(
            CanonicalBytes::from_image(&img),
            CanonicalBytes::from_image(&spent)
        );
    }

    #[test]
    fn from_parts_matches_from_image() {
        let bounds = ProvenanceBounds {
            brightness: 9,
            ..ProvenanceBounds::default()
        };
        let img = Image::filled(Pixel::new(10, 20, 30), Provenance::new(&bounds));
        assert_eq!(
            CanonicalBytes::from_image(&img),
            CanonicalBytes::from_image_parts(&img.packed(), img.provenance())
        );
    }

    #[test]
    fn json_sorted_keys_compact() {
        let data = serde_json::json!({"z": 1, "m": [2, 3], "a": {"y": true, "b": null}});
        let cb = CanonicalBytes::from_json(&data).unwrap();
        let s = std::str::from_utf8(cb.as_bytes()).unwrap();
        assert_eq!(s, r#"{"a":{"b":null,"y":true},"m":[2,3],"z":1}"#);
    }

    #[test]
    fn json_float_rejection() {
        let data = serde_json::json!({"outer": [{"val": 0.5}]});
        match CanonicalBytes::from_json(&data).unwrap_err() {
            CanonicalizationError::FloatRejected(f) => assert_eq!(f, 0.5),
            other => panic!("expected FloatRejected, got: {other}"),
        }
    }

    #[test]
    fn json_negative_integer_accepted() {
        let cb = CanonicalBytes::from_json(&serde_json::json!({"delta": -42})).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"delta":-42}"#);
    }
}
