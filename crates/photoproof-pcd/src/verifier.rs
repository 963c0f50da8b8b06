//! # Verifier
//!
//! Decides whether a photograph belongs to the compliant language. Needs
//! only the photograph and the admin's verifier keys.
//!
//! ## Checks, in order
//!
//! 1. The commitment's originator is the admin the keys were issued for.
//! 2. The attached signature verifies over `hash(z.image)` under the proof's
//!    signer. This catches content altered after signing without a backend
//!    call.
//! 3. The backend accepts the proof for the public inputs rebuilt from the
//!    photograph.
//!
//! A failed check is a [`Verdict::Rejected`], not an error. Only a backend
//! that cannot reach a verdict yields [`PcdError::VerificationBackendFailure`].

use photoproof_crypto::{image_digest, verify};
use photoproof_zkp::{MockProofSystem, ProvingBackend};
use serde::{Deserialize, Serialize};

use crate::error::PcdError;
use crate::shareables::{Photograph, VerifierKeys};

/// Why a photograph was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Commitment names a different camera admin.
    OriginatorMismatch,
    /// Signature over the current image does not verify.
    SignatureMismatch,
    /// The backend rejected the proof.
    ProofRejected,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::OriginatorMismatch => "originator mismatch",
            Self::SignatureMismatch => "signature mismatch",
            Self::ProofRejected => "proof rejected",
        })
    }
}

/// Outcome of verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "reason")]
pub enum Verdict {
    /// The photograph is compliant.
    Accepted,
    /// The photograph is not compliant.
    Rejected(Rejection),
}

impl Verdict {
    /// True for [`Verdict::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Stateless verifier over a backend.
#[derive(Debug, Clone, Default)]
pub struct Verifier<B: ProvingBackend = MockProofSystem> {
    backend: B,
}

impl<B: ProvingBackend> Verifier<B> {
    /// A verifier using `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Full verdict.
    ///
    /// # Errors
    ///
    /// [`PcdError::VerificationBackendFailure`] when the backend fails.
    pub fn verdict(
        &self,
        photo: &Photograph<B>,
        keys: &VerifierKeys<B>,
    ) -> Result<Verdict, PcdError> {
        let z = photo.z();
        let proof = photo.proof();

        if z.originator() != keys.originator() {
            tracing::warn!(
                expected = %keys.originator(),
                actual = %z.originator(),
                "photograph names another originator"
            );
            return Ok(Verdict::Rejected(Rejection::OriginatorMismatch));
        }

        let digest = image_digest(z.image());
        if verify(&digest, &proof.signature, &proof.signer).is_err() {
            tracing::warn!(image = %digest, signer = %proof.signer, "current signature does not verify");
            return Ok(Verdict::Rejected(Rejection::SignatureMismatch));
        }

        let accepted =
            self.backend
                .verify(keys.verifying_key(), &proof.pcd_proof, &photo.public_inputs())?;
        if !accepted {
            tracing::warn!(image = %digest, "proof rejected by backend");
            return Ok(Verdict::Rejected(Rejection::ProofRejected));
        }
        tracing::debug!(image = %digest, "photograph verified");
        Ok(Verdict::Accepted)
    }

    /// `true` only when the verdict is [`Verdict::Accepted`]. Backend
    /// failures count as not verified.
    pub fn check(&self, photo: &Photograph<B>, keys: &VerifierKeys<B>) -> bool {
        match self.verdict(photo, keys) {
            Ok(verdict) => verdict.is_accepted(),
            Err(err) => {
                tracing::error!(error = %err, "verification backend failure");
                false
            }
        }
    }
}
