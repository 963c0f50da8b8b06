//! # Camera (Genesis Issuer)
//!
//! The trusted root of every chain. At setup the camera compiles the
//! compliance predicate and generates the key pair once; the keys then serve
//! every photograph it issues. `issue` stamps the admin-chosen provenance
//! credits, signs the genesis hash with the admin key and proves
//! originality.

use photoproof_core::{Image, PixelGrid, Provenance, ProvenanceBounds};
use photoproof_crypto::Ed25519PublicKey;
use photoproof_zkp::{
    Commitment, CompiledRelation, CompliancePredicate, ComplianceWitness, MockProofSystem,
    ProvingBackend,
};
use rand::Rng;

use crate::error::PcdError;
use crate::shareables::{Photograph, Proof, ProverKeys, VerifierKeys};
use crate::user::User;

/// A camera bound to one admin and one key set.
#[derive(Debug)]
pub struct Camera<B: ProvingBackend = MockProofSystem> {
    backend: B,
    admin: User,
    bounds: ProvenanceBounds,
    relation: CompiledRelation,
    prover_keys: ProverKeys<B>,
    verifier_keys: VerifierKeys<B>,
}

impl<B: ProvingBackend> Camera<B> {
    /// Compile the predicate and generate the chain's key pair.
    ///
    /// # Errors
    ///
    /// [`PcdError::CompilationFailure`] or [`PcdError::KeyGenerationFailure`].
    pub fn setup(backend: B, admin: User, bounds: ProvenanceBounds) -> Result<Self, PcdError> {
        let relation = backend.compile(&CompliancePredicate)?;
        let (pk, vk) = backend.setup(&relation)?;
        let originator = admin.public_key();
        tracing::info!(
            relation = %relation.digest(),
            constraints = relation.constraint_count(),
            originator = %originator,
            "camera setup complete"
        );
        Ok(Self {
            backend,
            admin,
            bounds,
            relation,
            prover_keys: ProverKeys::new(pk, originator),
            verifier_keys: VerifierKeys::new(vk, originator),
        })
    }

    /// Keys handed to editors.
    pub fn prover_keys(&self) -> &ProverKeys<B> {
        &self.prover_keys
    }

    /// Keys handed to verifiers.
    pub fn verifier_keys(&self) -> &VerifierKeys<B> {
        &self.verifier_keys
    }

    /// Admin public key.
    pub fn admin_public_key(&self) -> Ed25519PublicKey {
        self.admin.public_key()
    }

    /// Genesis credits stamped on every issued image.
    pub fn bounds(&self) -> &ProvenanceBounds {
        &self.bounds
    }

    /// The compiled compliance predicate.
    pub fn relation(&self) -> &CompiledRelation {
        &self.relation
    }

    /// Simulate a capture: uniformly random pixels.
    pub fn capture<R: Rng>(&self, rng: &mut R) -> PixelGrid {
        *Image::random(rng, Provenance::new(&self.bounds)).pixels()
    }

    /// Issue the genesis photograph for a captured grid.
    ///
    /// # Errors
    ///
    /// [`PcdError::SigningFailure`] or [`PcdError::ProofGenerationFailure`].
    /// Nothing is returned on failure.
    pub fn issue(&self, pixels: PixelGrid) -> Result<Photograph<B>, PcdError> {
        let image = Image::new(pixels, Provenance::new(&self.bounds));
        let pending = Commitment::genesis(image, self.admin.public_key());
        // At genesis the current image is the original, so one signature
        // serves as both the original and the current-image signature.
        let signature = self.admin.sign(pending.original_hash())?;
        let z = pending.with_signature(signature);

        let witness = ComplianceWitness::originality(&z, self.admin.public_key(), signature);
        let pcd_proof = self.backend.prove(
            &self.relation,
            &CompliancePredicate,
            self.prover_keys.proving_key(),
            &witness,
        )?;
        tracing::info!(original_hash = %z.original_hash(), "genesis photograph issued");

        let proof = Proof {
            pcd_proof,
            signature,
            signer: self.admin.public_key(),
        };
        Ok(Photograph::new(
            z,
            proof,
            self.prover_keys.clone(),
            self.verifier_keys.clone(),
        ))
    }
}
