//! # photoproof-crypto — Out-of-Circuit Primitives
//!
//! Provides the signing and hashing building blocks used outside the
//! compliance predicate:
//!
//! - **Ed25519** signing and verification. The camera admin signs the
//!   genesis `OriginalHash`; every editor signs the digest of the image they
//!   produced.
//! - **SHA-256** image digests taken over `CanonicalBytes`, the same bytes
//!   the in-circuit hash gadget rebuilds.
//!
//! ## Crate Policy
//!
//! - Depends only on `photoproof-core` internally.
//! - No mocking of cryptographic operations in tests. All tests use real
//!   `CanonicalBytes`, real SHA-256, real Ed25519.
//! - No `unsafe` code.

pub mod ed25519;
pub mod sha256;

pub use ed25519::{verify, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use sha256::image_digest;
