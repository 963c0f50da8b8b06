//! # In-Circuit Primitives
//!
//! The hash and signature gadgets the compliance predicate is built from.
//! Both agree bit-for-bit with the out-of-circuit primitives in
//! `photoproof-crypto`: the hash gadget rebuilds the exact `CanonicalBytes`
//! that [`image_digest`](photoproof_crypto::image_digest) hashes.

use photoproof_core::{sha256_digest, CanonicalBytes, ContentDigest, FieldElement, TransformationId};
use photoproof_crypto::{Ed25519PublicKey, Ed25519Signature};

use crate::circuit::{Boolean, ConstraintSystem};
use crate::commitment::CircuitImage;

/// Hash an image from its wires.
///
/// Hard-asserts well-formedness: every channel fits in a byte, every
/// provenance tag sits at its own index, every bound fits in 32 bits, and the
/// prover's packed element equals the re-packed pixels. A witness failing any
/// of these cannot be proven whatever the branch selection.
pub fn hash_image<CS: ConstraintSystem>(
    cs: &mut CS,
    scope: &str,
    image: &CircuitImage,
) -> ContentDigest {
    let range = format!("{scope}.range");
    for channel in image.pixels.iter().flatten() {
        cs.enforce(&range, *channel <= u64::from(u8::MAX));
    }
    for (index, (tag, bound)) in image.provenance.iter().enumerate() {
        let expected = TransformationId::ALL[index].tag();
        cs.enforce(&format!("{scope}.tag"), *tag == u64::from(expected));
        cs.enforce(&format!("{scope}.bound"), *bound <= u64::from(u32::MAX));
    }

    let grid = image.pixel_grid();
    let repacked = FieldElement::pack(grid.iter().map(|p| p.rgb));
    cs.enforce(&format!("{scope}.packing"), repacked == image.packed);

    cs.constrain(&format!("{scope}.sha256"));
    sha256_digest(&CanonicalBytes::from_image_parts(
        &image.packed,
        &image.provenance(),
    ))
}

/// Ed25519 verification as a soft boolean. Malformed keys verify as false.
pub fn verify_signature<CS: ConstraintSystem>(
    cs: &mut CS,
    label: &str,
    digest: &ContentDigest,
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> Boolean {
    let valid = photoproof_crypto::verify(digest, signature, public_key).is_ok();
    cs.alloc_bit(label, valid)
}
