//! # Protocol Errors
//!
//! One variant per failure kind of the chain-of-custody protocol. Camera,
//! editor and verifier operations return the first failure they hit and
//! never touch the caller's existing photograph.
//!
//! A verifier rejecting a photograph is not an error. It is
//! [`Verdict::Rejected`](crate::verifier::Verdict::Rejected); only a
//! malfunctioning backend surfaces as
//! [`PcdError::VerificationBackendFailure`].

use photoproof_core::CryptoError;
use photoproof_zkp::{ProofError, SetupError, TransformError, VerifyError};
use thiserror::Error;

/// Failure of a camera, editor or verifier operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PcdError {
    /// The predicate could not be compiled. Fatal, not retried.
    #[error("compilation failure: {0}")]
    CompilationFailure(String),

    /// Key generation failed. Fatal for the chain.
    #[error("key generation failure: {0}")]
    KeyGenerationFailure(String),

    /// Signing the current image failed.
    #[error("signing failure: {0}")]
    SigningFailure(#[from] CryptoError),

    /// The requested transformation could not be applied.
    #[error("transformation failure: {0}")]
    TransformationFailure(#[from] TransformError),

    /// The backend refused or failed to produce a proof.
    #[error("proof generation failure: {0}")]
    ProofGenerationFailure(#[from] ProofError),

    /// The backend could not reach a verdict.
    #[error("verification backend failure: {0}")]
    VerificationBackendFailure(#[from] VerifyError),
}

impl From<SetupError> for PcdError {
    fn from(err: SetupError) -> Self {
        match err {
            SetupError::Compilation(msg) => Self::CompilationFailure(msg),
            SetupError::KeyGeneration(msg) => Self::KeyGenerationFailure(msg),
        }
    }
}

impl PcdError {
    /// Whether retrying the same operation can succeed. Signing and proof
    /// generation may be retried by the caller; the core never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SigningFailure(_)
                | Self::ProofGenerationFailure(ProofError::GenerationFailed(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photoproof_core::TransformationId;

    #[test]
    fn setup_errors_map_to_their_kinds() {
        assert!(matches!(
            PcdError::from(SetupError::Compilation("x".into())),
            PcdError::CompilationFailure(_)
        ));
        assert!(matches!(
            PcdError::from(SetupError::KeyGeneration("x".into())),
            PcdError::KeyGenerationFailure(_)
        ));
    }

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(PcdError::from(CryptoError::SigningFailed("rng".into())).is_retryable());
        assert!(PcdError::from(ProofError::GenerationFailed("oom".into())).is_retryable());
        assert!(!PcdError::from(ProofError::Unsatisfied { violated: vec![] }).is_retryable());
        assert!(
            !PcdError::from(TransformError::BoundExhausted(TransformationId::Crop)).is_retryable()
        );
        assert!(!PcdError::CompilationFailure("bad".into()).is_retryable());
    }

    #[test]
    fn display_names_the_kind() {
        let err = PcdError::from(TransformError::BoundExhausted(TransformationId::Rotate));
        assert_eq!(
            err.to_string(),
            "transformation failure: provenance bound for `rotate` is exhausted"
        );
    }
}
