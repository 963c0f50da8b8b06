//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types shared by every PhotoProof crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Grid and provenance errors carry the offending coordinate or
//!   transformation tag.
//! - Cryptographic errors fail loudly with full context.
//! - Canonicalization errors are kept separate so digest paths can report
//!   exactly which payload could not be canonicalized.

use thiserror::Error;

use crate::provenance::TransformationId;

/// Top-level error type for image and provenance handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A provenance credit was already zero when a transformation tried to
    /// consume it.
    #[error("provenance bound for `{0}` is exhausted")]
    BoundExhausted(TransformationId),

    /// A pixel coordinate fell outside the fixed grid.
    #[error("pixel ({x}, {y}) is outside the {size}x{size} grid")]
    PixelOutOfBounds {
        /// Column index.
        x: usize,
        /// Row index.
        y: usize,
        /// Grid edge length.
        size: usize,
    },

    /// A pixel buffer did not have exactly the grid's pixel count.
    #[error("expected {expected} pixels, got {actual}")]
    Dimension {
        /// Pixel count required by the grid constants.
        expected: usize,
        /// Pixel count supplied.
        actual: usize,
    },

    /// A provenance entry sat at a position belonging to another
    /// transformation.
    #[error("provenance entry {index} is `{actual}`, expected `{expected}`")]
    ProvenanceOrder {
        /// Position in the vector.
        index: usize,
        /// Transformation whose tag equals the position.
        expected: TransformationId,
        /// Transformation found there.
        actual: TransformationId,
    },

    /// A hex-encoded value could not be decoded.
    #[error("hex decode error: {0}")]
    HexDecode(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Signing failed.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),
}
