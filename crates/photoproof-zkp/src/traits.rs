//! # Proving Backend Trait (Sealed)
//!
//! The boundary to the proving backend: compile a circuit into a relation,
//! derive a matched key pair once, prove, verify.
//!
//! ## Sealed Trait
//!
//! `ProvingBackend` is **sealed**: only backends defined in `photoproof-zkp`
//! can implement it. Participants pick a backend by type; they cannot inject
//! their own.
//!
//! ## Concurrency
//!
//! Backends are `Send + Sync` and keys are immutable after setup, so one key
//! pair can serve any number of independent chains on worker threads.

use serde::{de::DeserializeOwned, Serialize};

use crate::circuit::{Circuit, CompiledRelation};
use crate::error::{ProofError, SetupError, VerifyError};

/// Private module that seals the [`ProvingBackend`] trait.
mod private {
    /// Sealing marker trait. Not accessible outside `photoproof-zkp`.
    pub trait Sealed {}
}

/// Sealed trait defining the interface of a proving backend.
///
/// ## Associated Types
///
/// - **`ProvingKey`**: used by the camera and every editor. Shared behind an
///   `Arc`, never cloned.
/// - **`VerifyingKey`**: distributed to verifiers. Cheap to clone.
/// - **`Proof`**: the opaque artifact carried by a photograph.
pub trait ProvingBackend: private::Sealed + Clone + std::fmt::Debug + Send + Sync {
    /// The proving key type.
    type ProvingKey: std::fmt::Debug + Send + Sync;
    /// The verifying key type.
    type VerifyingKey: Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync;
    /// The proof type.
    type Proof: Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync;

    /// Compile a circuit. Deterministic for a fixed circuit description.
    ///
    /// # Errors
    ///
    /// [`SetupError::Compilation`] if the description is malformed.
    fn compile<C: Circuit>(&self, circuit: &C) -> Result<CompiledRelation, SetupError> {
        CompiledRelation::compile(circuit)
    }

    /// One-time key generation for a relation.
    ///
    /// # Errors
    ///
    /// [`SetupError::KeyGeneration`] if no key pair can be derived.
    fn setup(
        &self,
        relation: &CompiledRelation,
    ) -> Result<(Self::ProvingKey, Self::VerifyingKey), SetupError>;

    /// Prove that `witness` satisfies `relation`.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::Unsatisfied`] when a hard assertion fails,
    /// [`ProofError::ShapeMismatch`] when synthesis diverges from the
    /// relation, [`ProofError::KeyMismatch`] when `pk` belongs to another
    /// relation.
    fn prove<C: Circuit>(
        &self,
        relation: &CompiledRelation,
        circuit: &C,
        pk: &Self::ProvingKey,
        witness: &C::Witness,
    ) -> Result<Self::Proof, ProofError>;

    /// Verify a proof against public inputs.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the proof is accepted, `Ok(false)` if it is rejected.
    ///
    /// # Errors
    ///
    /// [`VerifyError`] only when the backend cannot reach a verdict.
    fn verify<P: Serialize>(
        &self,
        vk: &Self::VerifyingKey,
        proof: &Self::Proof,
        public_inputs: &P,
    ) -> Result<bool, VerifyError>;
}

// ---- Sealed trait implementations for authorized backends ----

#[cfg(feature = "mock")]
impl private::Sealed for crate::mock::MockProofSystem {}
