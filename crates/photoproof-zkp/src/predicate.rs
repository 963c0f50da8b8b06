//! # Compliance Predicate
//!
//! The relation every PhotoProof proof attests. Given a secret predecessor
//! `z_in` and a public successor `z_out`, it accepts when either
//!
//! - **originality** (branch A): `z_in.original_hash == hash(z_in.image)`,
//!   the original signature verifies under `z_in.originator`, and the public
//!   `z_out` is `z_in` itself; or
//! - **transformation** (branch B): originator and original hash pass
//!   through unchanged, `signature_out` over `hash(z_out.image)` verifies
//!   under the public `signer_out`, and exactly one registered
//!   transformation is flagged and its check holds.
//!
//! Both branches are synthesized for every witness. The secret originality
//! bit selects between them and the selected result is the only
//! branch-dependent hard assertion.
//!
//! ## What Is Public
//!
//! [`CompliancePublicInputs`]: the successor commitment wires and the
//! signer's key. The predecessor image, the transformation, its parameters
//! and the originality bit stay in the witness.
//!
//! ## Recursion
//!
//! Branch B does not verify the proof attached to `z_in`. Chain validity
//! rests on every proof checking the pass-through invariants on its own.

use photoproof_core::{TransformationId, GRID_SIZE, PROVENANCE_LEN};
use photoproof_crypto::{Ed25519PublicKey, Ed25519Signature};
use serde::{Deserialize, Serialize};

use crate::circuit::{Circuit, ConstraintSystem};
use crate::commitment::{CircuitCommitment, Commitment};
use crate::gadgets::{hash_image, verify_signature};
use crate::transform::{check_registry, Transformation, TransformationFlags, TransformationParams};

/// The compliance predicate circuit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompliancePredicate;

/// Full assignment of the compliance predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceWitness {
    /// Predecessor commitment (secret).
    pub z_in: CircuitCommitment,
    /// Successor commitment (public).
    pub z_out: CircuitCommitment,
    /// Key of the party that signed `z_out`'s image (public).
    pub signer_out: Ed25519PublicKey,
    /// Signature over `hash(z_out.image)` (secret).
    pub signature_out: Ed25519Signature,
    /// Selects branch A when set (secret).
    pub originality: bool,
    /// Per-transformation activation flags (secret).
    pub flags: TransformationFlags,
    /// Parameter slots (secret).
    pub params: TransformationParams,
}

impl ComplianceWitness {
    /// Witness for the genesis proof: `z_in = z_out = genesis`, no
    /// transformation flagged.
    pub fn originality(
        genesis: &Commitment,
        signer: Ed25519PublicKey,
        signature: Ed25519Signature,
    ) -> Self {
        let wires = genesis.to_circuit();
        Self {
            z_in: wires.clone(),
            z_out: wires,
            signer_out: signer,
            signature_out: signature,
            originality: true,
            flags: TransformationFlags::none(),
            params: TransformationParams::default(),
        }
    }

    /// Witness for an edit of `z_in` into `z_out` by `transformation`.
    pub fn transformation(
        z_in: &Commitment,
        z_out: &Commitment,
        signer: Ed25519PublicKey,
        signature: Ed25519Signature,
        transformation: &Transformation,
    ) -> Self {
        let (flags, params) = transformation.to_circuit_form();
        Self {
            z_in: z_in.to_circuit(),
            z_out: z_out.to_circuit(),
            signer_out: signer,
            signature_out: signature,
            originality: false,
            flags,
            params,
        }
    }

    /// The same assignment with the originality bit replaced.
    pub fn with_originality(mut self, originality: bool) -> Self {
        self.originality = originality;
        self
    }
}

/// The public part of the assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompliancePublicInputs {
    /// Successor commitment wires.
    pub z_out: CircuitCommitment,
    /// Key of the party that signed the successor image.
    pub signer_out: Ed25519PublicKey,
}

impl CompliancePublicInputs {
    /// Rebuild the public inputs from a commitment and its signer.
    pub fn new(z_out: &Commitment, signer_out: Ed25519PublicKey) -> Self {
        Self {
            z_out: z_out.to_circuit(),
            signer_out,
        }
    }
}

impl Circuit for CompliancePredicate {
    const NAME: &'static str = "photoproof.compliance.v1";

    type Witness = ComplianceWitness;
    type PublicInputs = CompliancePublicInputs;

    fn describe(&self) -> serde_json::Value {
        let registry: Vec<serde_json::Value> = TransformationId::ALL
            .iter()
            .map(|id| serde_json::json!({ "tag": id.tag(), "name": id.name() }))
            .collect();
        serde_json::json!({
            "grid_size": GRID_SIZE,
            "provenance_len": PROVENANCE_LEN,
            "hash": "sha256",
            "signature": "ed25519",
            "transformations": registry,
        })
    }

    fn blank_witness(&self) -> ComplianceWitness {
        let blank = CircuitCommitment::blank();
        ComplianceWitness {
            z_in: blank.clone(),
            z_out: blank,
            signer_out: Ed25519PublicKey::from_bytes([0; 32]),
            signature_out: Ed25519Signature::from_bytes([0; 64]),
            originality: false,
            flags: TransformationFlags::none(),
            params: TransformationParams::default(),
        }
    }

    fn public_inputs(&self, witness: &ComplianceWitness) -> CompliancePublicInputs {
        CompliancePublicInputs {
            z_out: witness.z_out.clone(),
            signer_out: witness.signer_out,
        }
    }

    fn synthesize<CS: ConstraintSystem>(&self, cs: &mut CS, w: &ComplianceWitness) {
        let originality = cs.alloc_bit("originality", w.originality);
        let hash_in = hash_image(cs, "z_in.img", &w.z_in.image);
        let hash_out = hash_image(cs, "z_out.img", &w.z_out.image);

        // Branch A: z_in is a signed genesis and z_out republishes it as is.
        let a_hash = cs.is_equal("a.original_hash", &w.z_in.original_hash, &hash_in);
        let a_sig = verify_signature(
            cs,
            "a.original_signature",
            &w.z_in.original_hash,
            &w.z_in.original_signature,
            &w.z_in.originator,
        );
        let a_same = cs.is_equal("a.z_out_is_z_in", &w.z_in, &w.z_out);
        let genesis = cs.and("a.genesis", a_hash, a_sig);
        let branch_a = cs.and("a", genesis, a_same);

        // Branch B.
        let b_author = cs.is_equal("b.originator", &w.z_in.originator, &w.z_out.originator);
        let b_origin = cs.is_equal(
            "b.original_hash",
            &w.z_in.original_hash,
            &w.z_out.original_hash,
        );
        let b_sig = verify_signature(
            cs,
            "b.signature_out",
            &hash_out,
            &w.signature_out,
            &w.signer_out,
        );
        let b_edit = check_registry(
            cs,
            &w.flags,
            &w.params,
            &w.z_in,
            &w.z_out,
            (&hash_in, &hash_out),
        );
        let chain = cs.and("b.chain", b_author, b_origin);
        let signed = cs.and("b.signed", chain, b_sig);
        let branch_b = cs.and("b", signed, b_edit);

        let satisfied = cs.select("select", originality, branch_a, branch_b);
        cs.assert_true("compliance", satisfied);
    }
}
