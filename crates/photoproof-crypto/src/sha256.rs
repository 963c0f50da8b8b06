//! # SHA-256 Image Hashing
//!
//! The out-of-circuit image hash: `hash(image) = SHA256(canonical_bytes(image))`.
//! Cameras hash to produce `OriginalHash`; editors hash the image they sign.
//! The in-circuit hash gadget in `photoproof-zkp` must agree bit-for-bit,
//! which it does by rebuilding the same `CanonicalBytes` from pixel wires.

use photoproof_core::{sha256_digest, CanonicalBytes, ContentDigest, Image};

/// Digest of an image's canonical binary form.
pub fn image_digest(image: &Image) -> ContentDigest {
    sha256_digest(&CanonicalBytes::from_image(image))
}
