//! # Mock Proving Backend
//!
//! A transparent backend for development and testing. It evaluates the
//! relation directly and, when the witness satisfies it, signs a transcript
//! of the relation digest and public inputs with a key drawn at setup.
//!
//! ## How It Works
//!
//! - `setup()` draws a fresh Ed25519 key pair and binds both halves to the
//!   relation digest.
//! - `prove()` synthesizes the witness with a [`WitnessChecker`], refuses on
//!   any violated assertion or shape drift, then signs
//!   `SHA256(JCS{domain, relation, public_inputs})`.
//! - `verify()` rebuilds the transcript and checks the signature.
//!
//! ## Security Warning
//!
//! **NOT SUCCINCT AND NOT A ZERO-KNOWLEDGE ARGUMENT.** Soundness rests on
//! the prover running this code honestly with the proving key. The proof
//! itself carries only the relation digest and a signature, so it reveals
//! nothing of the witness beyond the public inputs.

use photoproof_core::{sha256_digest, CanonicalBytes, ContentDigest};
use photoproof_crypto::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::circuit::{Circuit, CompiledRelation, WitnessChecker};
use crate::error::{ProofError, SetupError, VerifyError};
use crate::traits::ProvingBackend;

/// Domain separator for proof transcripts.
const TRANSCRIPT_DOMAIN: &str = "photoproof.mock-proof.v1";

/// Encoded proof length: relation digest then signature.
pub const MOCK_PROOF_LEN: usize = 32 + 64;

/// Proving key: the relation it serves and the transcript signing key.
#[derive(Debug)]
pub struct MockProvingKey {
    relation: ContentDigest,
    keypair: Ed25519KeyPair,
}

impl MockProvingKey {
    /// Digest of the relation this key proves.
    pub fn relation(&self) -> ContentDigest {
        self.relation
    }
}

/// Verifying key: the relation and the transcript verification key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockVerifyingKey {
    /// Digest of the relation this key verifies.
    pub relation: ContentDigest,
    /// Transcript verification key.
    pub public_key: Ed25519PublicKey,
}

/// A mock proof. Serializes as one hex string of [`MOCK_PROOF_LEN`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProof {
    /// Relation the proof was produced for.
    pub relation: ContentDigest,
    /// Signature over the transcript.
    pub signature: Ed25519Signature,
}

impl MockProof {
    /// `relation || signature`.
    pub fn to_bytes(&self) -> [u8; MOCK_PROOF_LEN] {
        let mut out = [0u8; MOCK_PROOF_LEN];
        out[..32].copy_from_slice(self.relation.as_bytes());
        out[32..].copy_from_slice(self.signature.as_bytes());
        out
    }

    /// Decode [`Self::to_bytes`] output.
    ///
    /// # Errors
    ///
    /// [`VerifyError::MalformedProof`] on a length mismatch.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VerifyError> {
        if bytes.len() != MOCK_PROOF_LEN {
            return Err(VerifyError::MalformedProof(format!(
                "expected {MOCK_PROOF_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let mut relation = [0u8; 32];
        relation.copy_from_slice(&bytes[..32]);
        let mut signature = [0u8; 64];
        signature.copy_from_slice(&bytes[32..]);
        Ok(Self {
            relation: ContentDigest::from_bytes(relation),
            signature: Ed25519Signature::from_bytes(signature),
        })
    }

    /// Hex rendering of [`Self::to_bytes`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse [`Self::to_hex`] output.
    ///
    /// # Errors
    ///
    /// [`VerifyError::MalformedProof`] on bad hex or a length mismatch.
    pub fn from_hex(s: &str) -> Result<Self, VerifyError> {
        let bytes = hex::decode(s.trim()).map_err(|e| VerifyError::MalformedProof(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for MockProof {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for MockProof {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// The mock backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProofSystem;

impl MockProofSystem {
    fn transcript<P: Serialize>(
        relation: &ContentDigest,
        public_inputs: &P,
    ) -> Result<ContentDigest, String> {
        let payload = serde_json::json!({
            "domain": TRANSCRIPT_DOMAIN,
            "relation": relation,
            "public_inputs": public_inputs,
        });
        let canonical = CanonicalBytes::from_json(&payload).map_err(|e| e.to_string())?;
        Ok(sha256_digest(&canonical))
    }
}

impl ProvingBackend for MockProofSystem {
    type ProvingKey = MockProvingKey;
    type VerifyingKey = MockVerifyingKey;
    type Proof = MockProof;

    fn setup(
        &self,
        relation: &CompiledRelation,
    ) -> Result<(MockProvingKey, MockVerifyingKey), SetupError> {
        if !relation.is_consistent() {
            return Err(SetupError::KeyGeneration(format!(
                "relation {} does not match its constraints",
                relation.digest()
            )));
        }
        let keypair = Ed25519KeyPair::generate();
        let vk = MockVerifyingKey {
            relation: relation.digest(),
            public_key: keypair.public_key(),
        };
        tracing::debug!(
            relation = %relation.digest(),
            constraints = relation.constraint_count(),
            "generated mock key pair"
        );
        Ok((
            MockProvingKey {
                relation: relation.digest(),
                keypair,
            },
            vk,
        ))
    }

    fn prove<C: Circuit>(
        &self,
        relation: &CompiledRelation,
        circuit: &C,
        pk: &MockProvingKey,
        witness: &C::Witness,
    ) -> Result<MockProof, ProofError> {
        if pk.relation != relation.digest() {
            return Err(ProofError::KeyMismatch {
                expected: relation.digest(),
                actual: pk.relation,
            });
        }

        let mut checker = WitnessChecker::new();
        circuit.synthesize(&mut checker, witness);
        let (labels, violated) = checker.into_parts();
        if labels.as_slice() != relation.constraints() {
            return Err(ProofError::ShapeMismatch {
                expected: relation.constraint_count(),
                actual: labels.len(),
            });
        }
        if !violated.is_empty() {
            tracing::debug!(circuit = C::NAME, violated = violated.len(), "witness rejected");
            return Err(ProofError::Unsatisfied { violated });
        }

        let public_inputs = circuit.public_inputs(witness);
        let transcript = Self::transcript(&pk.relation, &public_inputs)
            .map_err(ProofError::GenerationFailed)?;
        let signature = pk
            .keypair
            .sign(&transcript)
            .map_err(|e| ProofError::GenerationFailed(e.to_string()))?;
        tracing::debug!(circuit = C::NAME, transcript = %transcript, "mock proof generated");
        Ok(MockProof {
            relation: pk.relation,
            signature,
        })
    }

    fn verify<P: Serialize>(
        &self,
        vk: &MockVerifyingKey,
        proof: &MockProof,
        public_inputs: &P,
    ) -> Result<bool, VerifyError> {
        if proof.relation != vk.relation {
            return Ok(false);
        }
        let transcript =
            Self::transcript(&vk.relation, public_inputs).map_err(VerifyError::Backend)?;
        Ok(photoproof_crypto::verify(&transcript, &proof.signature, &vk.public_key).is_ok())
    }
}
