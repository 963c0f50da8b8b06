//! # Commitment Object
//!
//! `Commitment` (Z) binds an image to the camera admin's public key, the
//! genesis signature and the genesis image hash. The last three are set once
//! at genesis and then passed through every edit unchanged; only the image
//! moves.
//!
//! ## Construction
//!
//! - [`Commitment::genesis`] hashes the image and returns a
//!   [`GenesisCommitment`]. The caller signs `original_hash()` with the admin
//!   key and finishes with [`GenesisCommitment::with_signature`]. This crate
//!   never signs on anyone's behalf.
//! - [`Commitment::derive_successor`] swaps the image and copies everything
//!   else.
//!
//! ## Circuit Projection
//!
//! [`Commitment::to_circuit`] is the single place where the domain type is
//! turned into the wire assignment the compliance predicate consumes. Grid
//! and provenance lengths are the same constants on both sides.

use photoproof_core::{
    ContentDigest, FieldElement, Image, Pixel, PixelGrid, Provenance, PIXEL_COUNT, PROVENANCE_LEN,
};
use photoproof_crypto::{image_digest, Ed25519PublicKey, Ed25519Signature};
use serde::{Deserialize, Serialize};

/// Z = (image, originator public key, original signature, original hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    image: Image,
    originator: Ed25519PublicKey,
    original_signature: Ed25519Signature,
    original_hash: ContentDigest,
}

/// A genesis commitment waiting for the admin's signature.
#[derive(Debug, Clone)]
pub struct GenesisCommitment {
    image: Image,
    originator: Ed25519PublicKey,
    original_hash: ContentDigest,
}

impl GenesisCommitment {
    /// The digest the admin must sign.
    pub fn original_hash(&self) -> &ContentDigest {
        &self.original_hash
    }

    /// Attach the admin's signature over [`Self::original_hash`].
    pub fn with_signature(self, original_signature: Ed25519Signature) -> Commitment {
        Commitment {
            image: self.image,
            originator: self.originator,
            original_signature,
            original_hash: self.original_hash,
        }
    }
}

impl Commitment {
    /// Start a genesis commitment: `OriginalHash = hash(image)`.
    pub fn genesis(image: Image, originator: Ed25519PublicKey) -> GenesisCommitment {
        let original_hash = image_digest(&image);
        GenesisCommitment {
            image,
            originator,
            original_hash,
        }
    }

    /// The commitment for an edited image. Originator, original signature
    /// and original hash are copied unchanged.
    pub fn derive_successor(&self, image: Image) -> Commitment {
        Commitment {
            image,
            originator: self.originator,
            original_signature: self.original_signature,
            original_hash: self.original_hash,
        }
    }

    /// Current image.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Camera admin's public key.
    pub fn originator(&self) -> &Ed25519PublicKey {
        &self.originator
    }

    /// Genesis signature over [`Self::original_hash`].
    pub fn original_signature(&self) -> &Ed25519Signature {
        &self.original_signature
    }

    /// Hash of the genesis image.
    pub fn original_hash(&self) -> &ContentDigest {
        &self.original_hash
    }

    /// Wire assignment for the compliance predicate.
    pub fn to_circuit(&self) -> CircuitCommitment {
        CircuitCommitment {
            image: CircuitImage::from_image(&self.image),
            originator: self.originator,
            original_signature: self.original_signature,
            original_hash: self.original_hash,
        }
    }
}

/// An image as circuit wires.
///
/// Channels and bounds are carried as full-width words; the hash gadget
/// range-checks them. `packed` is supplied by the prover and checked against
/// a re-packing of the pixel wires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitImage {
    /// One `[r, g, b]` triple per pixel, row-major.
    pub pixels: [[u64; 3]; PIXEL_COUNT],
    /// `(tag, bound)` per provenance entry, tag order.
    pub provenance: [(u64, u64); PROVENANCE_LEN],
    /// Claimed canonical field element of the pixels.
    pub packed: FieldElement,
}

impl CircuitImage {
    /// Project a domain image onto wires.
    pub fn from_image(image: &Image) -> Self {
        Self {
            pixels: image
                .pixels()
                .map(|p| [u64::from(p.rgb[0]), u64::from(p.rgb[1]), u64::from(p.rgb[2])]),
            provenance: image
                .provenance()
                .entries()
                .map(|e| (u64::from(e.id.tag()), u64::from(e.bound))),
            packed: image.packed(),
        }
    }

    /// Pixel wires read back as channels. Values above 255 wrap; the hash
    /// gadget has already failed the range check for such an assignment.
    pub fn pixel_grid(&self) -> PixelGrid {
        self.pixels.map(|[r, g, b]| Pixel::new(r as u8, g as u8, b as u8))
    }

    /// Bound wire of provenance entry `index`.
    pub fn bound(&self, index: usize) -> u64 {
        self.provenance[index].1
    }

    /// Provenance read back from the wires. Bounds above `u32::MAX` wrap, as
    /// for [`Self::pixel_grid`].
    pub fn provenance(&self) -> Provenance {
        Provenance::from_bounds(self.provenance.map(|(_, bound)| bound as u32))
    }
}

/// A commitment as circuit wires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitCommitment {
    /// Image wires.
    pub image: CircuitImage,
    /// Camera admin's public key.
    pub originator: Ed25519PublicKey,
    /// Genesis signature.
    pub original_signature: Ed25519Signature,
    /// Genesis image hash.
    pub original_hash: ContentDigest,
}

impl CircuitCommitment {
    /// An all-zero assignment with valid shape, used to record the relation.
    pub fn blank() -> Self {
        Commitment {
            image: Image::filled(Pixel::BLACK, Provenance::from_bounds([0; PROVENANCE_LEN])),
            originator: Ed25519PublicKey::from_bytes([0; 32]),
            original_signature: Ed25519Signature::from_bytes([0; 64]),
            original_hash: ContentDigest::default(),
        }
        .to_circuit()
    }
}
