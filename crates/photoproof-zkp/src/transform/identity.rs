//! Identity: the image passes through untouched.
//!
//! The identity bound is a permission bit rather than a credit. It must equal
//! one and is never decremented, so an identity edit yields an image whose
//! canonical bytes, and therefore hash, equal the input's.

use photoproof_core::{ContentDigest, Image, TransformationId};

use crate::circuit::{Boolean, ConstraintSystem};
use crate::commitment::CircuitCommitment;
use crate::error::TransformError;

pub(super) fn apply(image: &Image) -> Result<Image, TransformError> {
    if image.provenance().bound(TransformationId::Identity) != 1 {
        return Err(TransformError::BoundExhausted(TransformationId::Identity));
    }
    Ok(image.clone())
}

pub(super) fn check<CS: ConstraintSystem>(
    cs: &mut CS,
    z_in: &CircuitCommitment,
    _z_out: &CircuitCommitment,
    (hash_in, hash_out): (&ContentDigest, &ContentDigest),
) -> Boolean {
    let permitted = cs.is_equal(
        "identity.permitted",
        &z_in.image.bound(TransformationId::Identity.index()),
        &1,
    );
    let unchanged = cs.is_equal("identity.unchanged", hash_in, hash_out);
    cs.and("identity", permitted, unchanged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photoproof_core::{Pixel, Provenance};

    #[test]
    fn identity_is_byte_identical() {
        let image = Image::filled(Pixel::new(1, 2, 3), Provenance::default());
        assert_eq!(apply(&image).unwrap(), image);
    }

    #[test]
    fn identity_requires_permission_bit() {
        let image = Image::filled(Pixel::BLACK, Provenance::from_bounds([0, 1, 1, 1]));
        assert_eq!(
            apply(&image),
            Err(TransformError::BoundExhausted(TransformationId::Identity))
        );
    }
}
