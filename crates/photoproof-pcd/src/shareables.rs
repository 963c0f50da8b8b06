//! # Shareable Artifacts
//!
//! What participants hand to one another: the proof attached to an image,
//! the key material generated once by the camera, and the photograph that
//! bundles them.
//!
//! Key material is immutable after setup. `ProverKeys` holds the proving key
//! behind an `Arc`, so cloning a photograph or handing keys to a worker
//! thread never copies or regenerates it.

use std::sync::Arc;

use photoproof_crypto::{Ed25519PublicKey, Ed25519Signature};
use photoproof_zkp::{Commitment, CompliancePublicInputs, MockProofSystem, ProvingBackend};
use serde::{Deserialize, Serialize};

/// Backend proof plus the signature over the current image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Proof<B: ProvingBackend> {
    /// Opaque backend artifact.
    pub pcd_proof: B::Proof,
    /// Signature over `hash(z.image)` by whoever produced this version.
    pub signature: Ed25519Signature,
    /// Key that made `signature`.
    pub signer: Ed25519PublicKey,
}

/// What every chain participant needs to prove.
#[derive(Debug)]
pub struct ProverKeys<B: ProvingBackend> {
    proving_key: Arc<B::ProvingKey>,
    originator: Ed25519PublicKey,
}

impl<B: ProvingBackend> Clone for ProverKeys<B> {
    fn clone(&self) -> Self {
        Self {
            proving_key: Arc::clone(&self.proving_key),
            originator: self.originator,
        }
    }
}

impl<B: ProvingBackend> ProverKeys<B> {
    pub(crate) fn new(proving_key: B::ProvingKey, originator: Ed25519PublicKey) -> Self {
        Self {
            proving_key: Arc::new(proving_key),
            originator,
        }
    }

    /// Backend proving key.
    pub fn proving_key(&self) -> &B::ProvingKey {
        &self.proving_key
    }

    /// Camera admin's public key.
    pub fn originator(&self) -> &Ed25519PublicKey {
        &self.originator
    }
}

/// What a verifier needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct VerifierKeys<B: ProvingBackend> {
    verifying_key: B::VerifyingKey,
    originator: Ed25519PublicKey,
}

impl<B: ProvingBackend> VerifierKeys<B> {
    pub(crate) fn new(verifying_key: B::VerifyingKey, originator: Ed25519PublicKey) -> Self {
        Self {
            verifying_key,
            originator,
        }
    }

    /// Backend verifying key.
    pub fn verifying_key(&self) -> &B::VerifyingKey {
        &self.verifying_key
    }

    /// Camera admin's public key.
    pub fn originator(&self) -> &Ed25519PublicKey {
        &self.originator
    }
}

/// The unit exchanged between parties. Immutable once built: an edit
/// produces a new photograph and leaves this one alone.
#[derive(Debug, Clone)]
pub struct Photograph<B: ProvingBackend = MockProofSystem> {
    z: Commitment,
    proof: Proof<B>,
    prover_keys: ProverKeys<B>,
    verifier_keys: VerifierKeys<B>,
}

impl<B: ProvingBackend> Photograph<B> {
    /// Bundle a commitment, its proof and the chain's keys.
    pub fn new(
        z: Commitment,
        proof: Proof<B>,
        prover_keys: ProverKeys<B>,
        verifier_keys: VerifierKeys<B>,
    ) -> Self {
        Self {
            z,
            proof,
            prover_keys,
            verifier_keys,
        }
    }

    /// Commitment Z.
    pub fn z(&self) -> &Commitment {
        &self.z
    }

    /// Attached proof.
    pub fn proof(&self) -> &Proof<B> {
        &self.proof
    }

    /// Keys for the next edit.
    pub fn prover_keys(&self) -> &ProverKeys<B> {
        &self.prover_keys
    }

    /// Keys for verification.
    pub fn verifier_keys(&self) -> &VerifierKeys<B> {
        &self.verifier_keys
    }

    /// Public inputs as a verifier reconstructs them.
    pub fn public_inputs(&self) -> CompliancePublicInputs {
        CompliancePublicInputs::new(&self.z, self.proof.signer)
    }
}
