//! # Editor (Chain Participant)
//!
//! Consumes a photograph, applies one registered transformation, signs the
//! result with the editor's own key and proves transformation compliance.
//! The input photograph is borrowed and never modified; on failure the
//! caller still holds it unchanged.

use photoproof_crypto::Ed25519PublicKey;
use photoproof_zkp::{
    CompiledRelation, CompliancePredicate, ComplianceWitness, MockProofSystem, ProvingBackend,
    Transformation,
};

use crate::error::PcdError;
use crate::shareables::{Photograph, Proof};
use crate::user::User;

/// An editor with its own key pair.
#[derive(Debug)]
pub struct Editor<B: ProvingBackend = MockProofSystem> {
    user: User,
    backend: B,
    relation: CompiledRelation,
}

impl<B: ProvingBackend> Editor<B> {
    /// Compile the compliance predicate once for this editor.
    ///
    /// # Errors
    ///
    /// [`PcdError::CompilationFailure`].
    pub fn new(user: User, backend: B) -> Result<Self, PcdError> {
        let relation = backend.compile(&CompliancePredicate)?;
        Ok(Self {
            user,
            backend,
            relation,
        })
    }

    /// The editor's public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.user.public_key()
    }

    /// Apply `transformation` to `photo` and prove the result.
    ///
    /// # Errors
    ///
    /// [`PcdError::TransformationFailure`], [`PcdError::SigningFailure`] or
    /// [`PcdError::ProofGenerationFailure`].
    pub fn edit(
        &self,
        photo: &Photograph<B>,
        transformation: &Transformation,
    ) -> Result<Photograph<B>, PcdError> {
        let z_in = photo.z();
        let image_out = transformation.apply(z_in.image())?;
        let signature = self.user.sign_image(&image_out)?;
        let z_out = z_in.derive_successor(image_out);

        let witness = ComplianceWitness::transformation(
            z_in,
            &z_out,
            self.user.public_key(),
            signature,
            transformation,
        );
        let pcd_proof = self.backend.prove(
            &self.relation,
            &CompliancePredicate,
            photo.prover_keys().proving_key(),
            &witness,
        )?;
        tracing::info!(
            transformation = %transformation,
            editor = %self.user.public_key(),
            original_hash = %z_out.original_hash(),
            "edit proven"
        );

        let proof = Proof {
            pcd_proof,
            signature,
            signer: self.user.public_key(),
        };
        Ok(Photograph::new(
            z_out,
            proof,
            photo.prover_keys().clone(),
            photo.verifier_keys().clone(),
        ))
    }
}
