//! # Negative Control
//!
//! A proof must never be accepted under key material issued for another
//! camera admin, however the keys are mixed.

use photoproof_core::{Pixel, ProvenanceBounds, PIXEL_COUNT};
use photoproof_pcd::{
    Camera, Editor, Photograph, Rejection, User, Verdict, Verifier, VerifierKeys,
};
use photoproof_zkp::{Commitment, MockProofSystem, ProvingBackend, Transformation};

fn camera(seed: u8) -> Camera {
    Camera::setup(
        MockProofSystem,
        User::from_seed(&[seed; 32]),
        ProvenanceBounds::default(),
    )
    .unwrap()
}

/// `photo`'s proof and keys attached to a different commitment, as a party
/// altering the content in transit would produce.
fn in_transit(photo: &Photograph, z: Commitment) -> Photograph {
    Photograph::new(
        z,
        photo.proof().clone(),
        photo.prover_keys().clone(),
        photo.verifier_keys().clone(),
    )
}

#[test]
fn other_admins_keys_reject() {
    let ours = camera(0x41);
    let theirs = camera(0x42);
    let photo = ours.issue([Pixel::BLACK; PIXEL_COUNT]).unwrap();
    let verifier = Verifier::new(MockProofSystem);

    assert!(verifier.check(&photo, ours.verifier_keys()));
    assert_eq!(
        verifier.verdict(&photo, theirs.verifier_keys()).unwrap(),
        Verdict::Rejected(Rejection::OriginatorMismatch)
    );
    assert!(!verifier.check(&photo, theirs.verifier_keys()));
}

#[test]
fn backend_rejects_foreign_verifying_key() {
    let ours = camera(0x41);
    let theirs = camera(0x42);
    let photo = ours.issue([Pixel::new(3, 3, 3); PIXEL_COUNT]).unwrap();

    // Same relation, different key pair.
    assert_eq!(ours.relation().digest(), theirs.relation().digest());
    let accepted = MockProofSystem
        .verify(
            theirs.verifier_keys().verifying_key(),
            &photo.proof().pcd_proof,
            &photo.public_inputs(),
        )
        .unwrap();
    assert!(!accepted);
}

#[test]
fn spliced_keys_reject_on_proof() {
    // Our originator paired with their verifying key: passes the originator
    // and signature checks, fails at the backend.
    let ours = camera(0x41);
    let theirs = camera(0x42);
    let editor = Editor::new(User::generate(), MockProofSystem).unwrap();
    let photo = editor
        .edit(
            &ours.issue([Pixel::BLACK; PIXEL_COUNT]).unwrap(),
            &Transformation::Identity,
        )
        .unwrap();

    let mut json = serde_json::to_value(ours.verifier_keys()).unwrap();
    json["verifying_key"] = serde_json::to_value(theirs.verifier_keys().verifying_key()).unwrap();
    let spliced: VerifierKeys<MockProofSystem> = serde_json::from_value(json).unwrap();

    assert_eq!(
        Verifier::new(MockProofSystem)
            .verdict(&photo, &spliced)
            .unwrap(),
        Verdict::Rejected(Rejection::ProofRejected)
    );
}

#[test]
fn photograph_from_one_camera_cannot_be_relabelled() {
    // Re-deriving a commitment that names another originator breaks the
    // public inputs the proof was made for.
    let ours = camera(0x41);
    let theirs = camera(0x42);
    let photo = ours.issue([Pixel::BLACK; PIXEL_COUNT]).unwrap();
    let relabelled = theirs.issue(*photo.z().image().pixels()).unwrap();

    let mixed = in_transit(&photo, relabelled.z().clone());
    let verifier = Verifier::new(MockProofSystem);
    assert!(!verifier.check(&mixed, theirs.verifier_keys()));
    assert!(!verifier.check(&mixed, ours.verifier_keys()));
}
