//! # photoproof-pcd — Chain-of-Custody Protocol
//!
//! The three roles of a PhotoProof chain, built on the compliance predicate
//! and a sealed proving backend from `photoproof-zkp`:
//!
//! - **Camera** (`camera.rs`): compiles the predicate, generates the chain's
//!   keys once and issues genesis photographs signed by the admin.
//! - **Editor** (`editor.rs`): applies one registered transformation,
//!   signs the output and proves compliance against the predecessor.
//! - **Verifier** (`verifier.rs`): accepts or rejects a photograph given
//!   only the admin's verifier keys.
//!
//! Shared artifacts (`Photograph`, `Proof`, `ProverKeys`, `VerifierKeys`)
//! live in `shareables.rs`; participants and their keys in `user.rs`.
//!
//! ## Concurrency
//!
//! Key material is immutable after camera setup. Independent chains may be
//! edited on separate threads with the same keys; a single chain is
//! sequential because each edit consumes its predecessor.
//!
//! ## Crate Policy
//!
//! - Generic over `ProvingBackend`; defaults to `MockProofSystem`.
//! - No `unsafe` code.

pub mod camera;
pub mod editor;
pub mod error;
pub mod shareables;
pub mod user;
pub mod verifier;

pub use camera::Camera;
pub use editor::Editor;
pub use error::PcdError;
pub use shareables::{Photograph, Proof, ProverKeys, VerifierKeys};
pub use user::User;
pub use verifier::{Rejection, Verdict, Verifier};
