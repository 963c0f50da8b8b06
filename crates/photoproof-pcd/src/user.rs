//! A protocol participant: camera admin or editor.

use photoproof_core::{ContentDigest, Image};
use photoproof_crypto::{image_digest, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

use crate::error::PcdError;

/// A participant's key pair. Each participant generates their own; nothing
/// is shared between users.
#[derive(Debug)]
pub struct User {
    keypair: Ed25519KeyPair,
}

impl User {
    /// Fresh random key pair.
    pub fn generate() -> Self {
        Self {
            keypair: Ed25519KeyPair::generate(),
        }
    }

    /// Deterministic key pair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            keypair: Ed25519KeyPair::from_seed(seed),
        }
    }

    /// Public half.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// Sign a digest.
    ///
    /// # Errors
    ///
    /// [`PcdError::SigningFailure`].
    pub fn sign(&self, digest: &ContentDigest) -> Result<Ed25519Signature, PcdError> {
        Ok(self.keypair.sign(digest)?)
    }

    /// Hash an image and sign the digest.
    ///
    /// # Errors
    ///
    /// [`PcdError::SigningFailure`].
    pub fn sign_image(&self, image: &Image) -> Result<Ed25519Signature, PcdError> {
        self.sign(&image_digest(image))
    }
}
