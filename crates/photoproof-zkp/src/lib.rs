//! # photoproof-zkp — Compliance Predicate and Proving Backend
//!
//! Everything a proof is about, and the interface of whatever produces it.
//!
//! ## Architecture
//!
//! - **Circuit** (`circuit.rs`): the `ConstraintSystem` API, its two
//!   implementations (shape recording and witness checking) and
//!   `CompiledRelation`.
//!
//! - **Commitment** (`commitment.rs`): the commitment object Z, its genesis
//!   builder, successor derivation and the projection onto circuit wires.
//!
//! - **Gadgets** (`gadgets.rs`): in-circuit image hash and signature
//!   verification, bit-compatible with `photoproof-crypto`.
//!
//! - **Transform** (`transform/`): the registry of permissible edits, each
//!   with an out-of-circuit `apply` and an in-circuit check.
//!
//! - **Predicate** (`predicate.rs`): the two-branch compliance predicate.
//!
//! - **Traits** (`traits.rs`): the sealed `ProvingBackend` trait
//!   (compile, setup, prove, verify).
//!
//! - **Mock** (`mock.rs`): `MockProofSystem`, a transparent backend that
//!   evaluates the relation and signs a transcript.
//!
//! ## Crate Policy
//!
//! - Depends on `photoproof-core` and `photoproof-crypto` internally.
//! - Constraint sequences never depend on witness values.
//! - No `unsafe` code.

pub mod circuit;
pub mod commitment;
pub mod error;
pub mod gadgets;
#[cfg(feature = "mock")]
pub mod mock;
pub mod predicate;
pub mod traits;
pub mod transform;

pub use circuit::{
    Boolean, Circuit, CompiledRelation, ConstraintSystem, ShapeRecorder, WitnessChecker,
};
pub use commitment::{CircuitCommitment, CircuitImage, Commitment, GenesisCommitment};
pub use error::{ProofError, SetupError, TransformError, VerifyError};
#[cfg(feature = "mock")]
pub use mock::{MockProof, MockProofSystem, MockProvingKey, MockVerifyingKey};
pub use predicate::{CompliancePredicate, CompliancePublicInputs, ComplianceWitness};
pub use traits::ProvingBackend;
pub use transform::{
    BrightnessParams, CropParams, RotateParams, Transformation, TransformationFlags,
    TransformationParams,
};
