//! # Constraint Systems and Compiled Relations
//!
//! A [`Circuit`] describes its statement by driving a [`ConstraintSystem`]
//! through a fixed sequence of labelled constraints. Two systems consume that
//! sequence:
//!
//! - [`ShapeRecorder`] runs at compile time over a blank witness and records
//!   the constraint labels. The ordered labels, together with the circuit's
//!   description, form the [`CompiledRelation`].
//! - [`WitnessChecker`] runs at proving time over the real witness. It records
//!   the same labels plus every hard assertion that failed.
//!
//! ## Security Invariant
//!
//! Synthesis must emit the same label sequence for every witness. Branches
//! are evaluated unconditionally and combined with [`ConstraintSystem::select`];
//! no constraint is skipped because a witness value made it irrelevant. The
//! prover refuses any witness whose sequence differs from the relation.

use photoproof_core::{sha256_digest, CanonicalBytes, ContentDigest};
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// A soft boolean wire: the result of a gadget that has not been asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boolean(bool);

impl Boolean {
    /// Constant true.
    pub const TRUE: Boolean = Boolean(true);
    /// Constant false.
    pub const FALSE: Boolean = Boolean(false);

    /// The assigned value.
    pub fn value(self) -> bool {
        self.0
    }
}

/// The in-circuit API a statement is written against.
pub trait ConstraintSystem {
    /// Record a gate that computes a wire without asserting anything.
    fn constrain(&mut self, label: &str);

    /// Record a hard assertion. `holds` is its value under the current
    /// assignment.
    fn enforce(&mut self, label: &str, holds: bool);

    /// Allocate a witness bit with its booleanity constraint.
    fn alloc_bit(&mut self, label: &str, value: bool) -> Boolean {
        self.constrain(label);
        Boolean(value)
    }

    /// Equality test producing a soft boolean.
    fn is_equal<T: PartialEq + ?Sized>(&mut self, label: &str, a: &T, b: &T) -> Boolean {
        self.constrain(label);
        Boolean(a == b)
    }

    /// Logical AND.
    fn and(&mut self, label: &str, a: Boolean, b: Boolean) -> Boolean {
        self.constrain(label);
        Boolean(a.0 && b.0)
    }

    /// Logical OR.
    fn or(&mut self, label: &str, a: Boolean, b: Boolean) -> Boolean {
        self.constrain(label);
        Boolean(a.0 || b.0)
    }

    /// `if cond { a } else { b }`.
    fn select(&mut self, label: &str, cond: Boolean, a: Boolean, b: Boolean) -> Boolean {
        self.constrain(label);
        if cond.0 {
            a
        } else {
            b
        }
    }

    /// Assert a soft boolean equals one.
    fn assert_true(&mut self, label: &str, b: Boolean) {
        self.enforce(label, b.0);
    }
}

/// Records the constraint sequence and ignores assignment values.
#[derive(Debug, Default)]
pub struct ShapeRecorder {
    labels: Vec<String>,
}

impl ShapeRecorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded labels, in synthesis order.
    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }
}

impl ConstraintSystem for ShapeRecorder {
    fn constrain(&mut self, label: &str) {
        self.labels.push(label.to_string());
    }

    fn enforce(&mut self, label: &str, _holds: bool) {
        self.labels.push(label.to_string());
    }
}

/// Records the constraint sequence and every failed hard assertion.
#[derive(Debug, Default)]
pub struct WitnessChecker {
    labels: Vec<String>,
    violated: Vec<String>,
}

impl WitnessChecker {
    /// An empty checker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels in synthesis order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Labels of failed hard assertions.
    pub fn violated(&self) -> &[String] {
        &self.violated
    }

    /// True when no hard assertion failed.
    pub fn is_satisfied(&self) -> bool {
        self.violated.is_empty()
    }

    /// Split into `(labels, violated)`.
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.labels, self.violated)
    }
}

impl ConstraintSystem for WitnessChecker {
    fn constrain(&mut self, label: &str) {
        self.labels.push(label.to_string());
    }

    fn enforce(&mut self, label: &str, holds: bool) {
        self.labels.push(label.to_string());
        if !holds {
            self.violated.push(label.to_string());
        }
    }
}

/// A statement that can be compiled and proven.
pub trait Circuit {
    /// Stable name, part of the relation digest.
    const NAME: &'static str;

    /// Secret and public assignment.
    type Witness;

    /// The public part of the assignment, as handed to the verifier.
    type PublicInputs: Serialize;

    /// Integer-only JSON description of the circuit's parameters.
    fn describe(&self) -> serde_json::Value;

    /// An assignment used only to record the constraint shape.
    fn blank_witness(&self) -> Self::Witness;

    /// Project the public inputs out of a full assignment.
    fn public_inputs(&self, witness: &Self::Witness) -> Self::PublicInputs;

    /// Emit the constraint sequence for `witness`.
    fn synthesize<CS: ConstraintSystem>(&self, cs: &mut CS, witness: &Self::Witness);
}

/// The output of compilation: circuit description, constraint sequence and
/// their joint digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledRelation {
    circuit: serde_json::Value,
    constraints: Vec<String>,
    digest: ContentDigest,
}

impl CompiledRelation {
    /// Compile a circuit. Deterministic for a fixed description.
    ///
    /// # Errors
    ///
    /// [`SetupError::Compilation`] if the description cannot be
    /// canonicalized or the circuit emits no constraints.
    pub fn compile<C: Circuit>(circuit: &C) -> Result<Self, SetupError> {
        let description = serde_json::json!({
            "name": C::NAME,
            "parameters": circuit.describe(),
        });
        let mut recorder = ShapeRecorder::new();
        circuit.synthesize(&mut recorder, &circuit.blank_witness());
        let constraints = recorder.into_labels();
        if constraints.is_empty() {
            return Err(SetupError::Compilation(format!(
                "circuit `{}` emitted no constraints",
                C::NAME
            )));
        }
        let digest = relation_digest(&description, &constraints)?;
        Ok(Self {
            circuit: description,
            constraints,
            digest,
        })
    }

    /// Name and parameters of the compiled circuit.
    pub fn circuit(&self) -> &serde_json::Value {
        &self.circuit
    }

    /// Ordered constraint labels.
    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Relation identifier.
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }

    /// Recompute the digest and compare it with the stored one.
    pub fn is_consistent(&self) -> bool {
        matches!(
            relation_digest(&self.circuit, &self.constraints),
            Ok(d) if d == self.digest
        )
    }
}

fn relation_digest(
    circuit: &serde_json::Value,
    constraints: &[String],
) -> Result<ContentDigest, SetupError> {
    let payload = serde_json::json!({
        "circuit": circuit,
        "constraints": constraints,
    });
    let canonical =
        CanonicalBytes::from_json(&payload).map_err(|e| SetupError::Compilation(e.to_string()))?;
    Ok(sha256_digest(&canonical))
}
