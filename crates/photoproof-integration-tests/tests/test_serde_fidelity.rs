//! # Serde Fidelity
//!
//! Photographs cross process boundaries as JSON. Commitments, proofs and
//! verifier keys must survive serialization and still verify, and the
//! wire form keeps keys, signatures and digests as lowercase hex.

use photoproof_core::{Pixel, ProvenanceBounds, PIXEL_COUNT};
use photoproof_pcd::{Camera, Editor, Photograph, Proof, User, Verifier, VerifierKeys};
use photoproof_zkp::{Commitment, CropParams, MockProof, MockProofSystem, Transformation};

fn edited_photo() -> (Camera, Photograph) {
    let camera = Camera::setup(
        MockProofSystem,
        User::from_seed(&[0x61; 32]),
        ProvenanceBounds::default(),
    )
    .unwrap();
    let editor = Editor::new(User::from_seed(&[0x62; 32]), MockProofSystem).unwrap();
    let genesis = camera.issue([Pixel::new(200, 100, 50); PIXEL_COUNT]).unwrap();
    let crop = Transformation::Crop(CropParams {
        x: 0,
        y: 0,
        width: 3,
        height: 3,
    });
    let photo = editor.edit(&genesis, &crop).unwrap();
    (camera, photo)
}

#[test]
fn transported_photograph_still_verifies() {
    let (camera, photo) = edited_photo();

    let z_json = serde_json::to_string(photo.z()).unwrap();
    let proof_json = serde_json::to_string(photo.proof()).unwrap();
    let keys_json = serde_json::to_string(camera.verifier_keys()).unwrap();

    let z: Commitment = serde_json::from_str(&z_json).unwrap();
    let proof: Proof<MockProofSystem> = serde_json::from_str(&proof_json).unwrap();
    let keys: VerifierKeys<MockProofSystem> = serde_json::from_str(&keys_json).unwrap();
    assert_eq!(&z, photo.z());

    let received = Photograph::new(z, proof, photo.prover_keys().clone(), keys.clone());
    assert!(Verifier::new(MockProofSystem).check(&received, &keys));
}

#[test]
fn wire_form_uses_hex() {
    let (camera, photo) = edited_photo();
    let proof = serde_json::to_value(photo.proof()).unwrap();

    let pcd = proof["pcd_proof"].as_str().unwrap();
    assert_eq!(pcd.len(), 2 * photoproof_zkp::mock::MOCK_PROOF_LEN);
    assert_eq!(MockProof::from_hex(pcd).unwrap(), photo.proof().pcd_proof);

    let signer = proof["signer"].as_str().unwrap();
    assert_eq!(signer, photo.proof().signer.to_hex());
    assert!(signer.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let keys = serde_json::to_value(camera.verifier_keys()).unwrap();
    assert_eq!(
        keys["originator"].as_str().unwrap(),
        camera.admin_public_key().to_hex()
    );
}

#[test]
fn truncated_proof_is_rejected_at_parse() {
    let (_, photo) = edited_photo();
    let mut proof = serde_json::to_value(photo.proof()).unwrap();
    let short = photo.proof().pcd_proof.to_hex()[..64].to_string();
    proof["pcd_proof"] = serde_json::Value::String(short);
    assert!(serde_json::from_value::<Proof<MockProofSystem>>(proof).is_err());
}

#[test]
fn reordered_provenance_is_rejected_at_parse() {
    // Swapping the crop and rotate entries would let `bound(Crop)` read the
    // rotate credit.
    let (_, photo) = edited_photo();
    let mut z = serde_json::to_value(photo.z()).unwrap();
    let entries = z["image"]["provenance"].as_array_mut().unwrap();
    entries.swap(1, 2);
    let err = serde_json::from_value::<Commitment>(z).unwrap_err();
    assert!(err.to_string().contains("expected `crop`"), "{err}");
}
