//! # Error Types
//!
//! Errors raised at the proving-backend boundary and by out-of-circuit
//! transformation application. A rejected proof is not an error:
//! [`ProvingBackend::verify`](crate::traits::ProvingBackend::verify) returns
//! `Ok(false)` for that case.

use photoproof_core::{ContentDigest, TransformationId};
use thiserror::Error;

/// Compilation or key generation failed. Fatal for the predicate version.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The circuit description could not be compiled into a relation.
    #[error("circuit compilation failed: {0}")]
    Compilation(String),

    /// The backend could not derive a matched key pair for the relation.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),
}

/// Error during proof generation.
///
/// Returned by [`ProvingBackend::prove`](crate::traits::ProvingBackend::prove).
/// No variant carries witness values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The witness violates at least one hard assertion of the relation.
    #[error("witness does not satisfy the relation; violated: {}", .violated.join(", "))]
    Unsatisfied {
        /// Labels of the violated constraints, in synthesis order.
        violated: Vec<String>,
    },

    /// Synthesizing the witness produced a different constraint sequence
    /// than the compiled relation.
    #[error("constraint shape mismatch: relation has {expected} constraints, witness produced {actual}")]
    ShapeMismatch {
        /// Constraint count of the compiled relation.
        expected: usize,
        /// Constraint count produced from the witness.
        actual: usize,
    },

    /// The proving key was generated for another relation.
    #[error("proving key is for relation {actual}, expected {expected}")]
    KeyMismatch {
        /// Digest of the relation being proven.
        expected: ContentDigest,
        /// Digest the proving key is bound to.
        actual: ContentDigest,
    },

    /// Proof generation failed internally.
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),
}

/// The backend could not reach a verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The proof is structurally malformed.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// The verification routine itself malfunctioned.
    #[error("verification backend failure: {0}")]
    Backend(String),
}

/// Out-of-circuit application of a transformation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The parameters are outside what the transformation accepts.
    #[error("invalid parameters for `{transformation}`: {reason}")]
    InvalidParameters {
        /// The transformation that refused the parameters.
        transformation: TransformationId,
        /// What was wrong.
        reason: String,
    },

    /// The image has no credit left for this transformation.
    #[error("provenance bound for `{0}` is exhausted")]
    BoundExhausted(TransformationId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsatisfied_lists_labels() {
        let err = ProofError::Unsatisfied {
            violated: vec!["compliance".to_string(), "z_in.img.packing".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "witness does not satisfy the relation; violated: compliance, z_in.img.packing"
        );
    }

    #[test]
    fn invalid_parameters_names_transformation() {
        let err = TransformError::InvalidParameters {
            transformation: TransformationId::Brightness,
            reason: "delta 300 outside [-255, 255]".to_string(),
        };
        assert!(err.to_string().starts_with("invalid parameters for `brightness`"));
    }
}
