//! # photoproof-core — Foundational Types for PhotoProof
//!
//! Defines the image model that every other crate builds on: the fixed-size
//! pixel grid, the provenance credit vector, the BN254 field packing of
//! pixel content, canonical bytes and content digests.
//!
//! ## Key Design Principles
//!
//! 1. **Compile-time dimensions.** `GRID_SIZE` and `PROVENANCE_LEN` are
//!    constants; images are fixed arrays. A dimension mismatch between the
//!    plain image and its circuit form cannot be expressed.
//!
//! 2. **`CanonicalBytes` newtype.** All digest computation flows through
//!    `CanonicalBytes`. The binary image form is shared by the signer and the
//!    in-circuit hash gadget.
//!
//! 3. **Credits only go down.** `Provenance::consume` returns a new vector
//!    with one credit spent and refuses to go below zero.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `photoproof-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod field;
pub mod image;
pub mod provenance;

pub use canonical::{CanonicalBytes, IMAGE_CANONICAL_LEN};
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, CoreError, CryptoError};
pub use field::{FieldElement, BN254_SCALAR_MODULUS};
pub use image::{Image, Pixel, PixelGrid, PixelLocation, GRID_SIZE, PIXEL_COUNT};
pub use provenance::{
    Provenance, ProvenanceBounds, ProvenanceEntry, TransformationId, PROVENANCE_LEN,
};
