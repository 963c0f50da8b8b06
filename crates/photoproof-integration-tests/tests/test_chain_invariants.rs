//! # Chain Invariants
//!
//! Properties every edit must preserve across the whole registry:
//!
//! - originator and original hash pass through unchanged;
//! - Identity leaves the image byte-identical;
//! - provenance credits only go down, and a spent credit blocks the edit
//!   both out of circuit and inside the predicate.

use photoproof_core::{Pixel, ProvenanceBounds, TransformationId, PIXEL_COUNT};
use photoproof_crypto::image_digest;
use photoproof_pcd::{Camera, Editor, PcdError, Photograph, User, Verifier};
use photoproof_zkp::{
    BrightnessParams, CompliancePredicate, ComplianceWitness, CropParams, MockProofSystem,
    ProofError, ProvingBackend, RotateParams, TransformError, Transformation,
};
use proptest::prelude::*;

fn setup(bounds: ProvenanceBounds) -> (Camera, Editor, Verifier) {
    let camera = Camera::setup(MockProofSystem, User::from_seed(&[0x31; 32]), bounds).unwrap();
    let editor = Editor::new(User::from_seed(&[0x32; 32]), MockProofSystem).unwrap();
    (camera, editor, Verifier::new(MockProofSystem))
}

fn registry() -> Vec<Transformation> {
    vec![
        Transformation::Identity,
        Transformation::Crop(CropParams {
            x: 1,
            y: 2,
            width: 2,
            height: 3,
        }),
        Transformation::Rotate(RotateParams { quarter_turns: 3 }),
        Transformation::Brightness(BrightnessParams { delta: 100 }),
    ]
}

fn gradient() -> [Pixel; PIXEL_COUNT] {
    let mut grid = [Pixel::BLACK; PIXEL_COUNT];
    for (i, p) in grid.iter_mut().enumerate() {
        let v = (i * 10) as u8;
        *p = Pixel::new(v, 255 - v, v / 2);
    }
    grid
}

#[test]
fn every_transformation_preserves_origin() {
    let (camera, editor, verifier) = setup(ProvenanceBounds::default());
    let photo = camera.issue(gradient()).unwrap();
    for t in registry() {
        let out = editor.edit(&photo, &t).unwrap();
        assert_eq!(out.z().original_hash(), photo.z().original_hash(), "{t}");
        assert_eq!(out.z().originator(), photo.z().originator(), "{t}");
        assert_eq!(out.z().original_signature(), photo.z().original_signature(), "{t}");
        assert!(verifier.check(&out, camera.verifier_keys()), "{t}");
    }
}

#[test]
fn identity_is_idempotent() {
    let (camera, editor, _) = setup(ProvenanceBounds::default());
    let photo = camera.issue(gradient()).unwrap();
    let once = editor.edit(&photo, &Transformation::Identity).unwrap();
    let twice = editor.edit(&once, &Transformation::Identity).unwrap();
    for out in [&once, &twice] {
        assert_eq!(out.z().image(), photo.z().image());
        assert_eq!(image_digest(out.z().image()), image_digest(photo.z().image()));
    }
}

#[test]
fn identity_forbidden_when_permission_clear() {
    let bounds = ProvenanceBounds {
        identity: 0,
        ..ProvenanceBounds::default()
    };
    let (camera, editor, _) = setup(bounds);
    let photo = camera.issue(gradient()).unwrap();
    let err = editor.edit(&photo, &Transformation::Identity).unwrap_err();
    assert_eq!(
        err,
        PcdError::TransformationFailure(TransformError::BoundExhausted(
            TransformationId::Identity
        ))
    );
}

#[test]
fn second_crop_with_bound_one_fails() {
    let (camera, editor, verifier) = setup(ProvenanceBounds::default());
    let photo0 = camera.issue(gradient()).unwrap();
    let crop = Transformation::Crop(CropParams::default());

    let photo1 = editor.edit(&photo0, &crop).unwrap();
    assert!(verifier.check(&photo1, camera.verifier_keys()));
    assert_eq!(
        photo1.z().image().provenance().bound(TransformationId::Crop),
        0
    );

    let err = editor.edit(&photo1, &crop).unwrap_err();
    assert_eq!(
        err,
        PcdError::TransformationFailure(TransformError::BoundExhausted(TransformationId::Crop))
    );
}

#[test]
fn exhausted_credit_is_unprovable_in_circuit() {
    // Skip the out-of-circuit check and hand the predicate a crop of a
    // photograph whose crop credit is already zero.
    let (camera, editor, _) = setup(ProvenanceBounds::default());
    let full_frame = Transformation::Crop(CropParams::default());
    let photo1 = editor
        .edit(&camera.issue(gradient()).unwrap(), &full_frame)
        .unwrap();

    let z_in = photo1.z();
    let z_out = z_in.derive_successor(z_in.image().clone());
    let signer = User::from_seed(&[0x32; 32]);
    let signature = signer.sign_image(z_out.image()).unwrap();
    let witness =
        ComplianceWitness::transformation(z_in, &z_out, signer.public_key(), signature, &full_frame);

    let err = MockProofSystem
        .prove(
            camera.relation(),
            &CompliancePredicate,
            camera.prover_keys().proving_key(),
            &witness,
        )
        .unwrap_err();
    assert_eq!(
        err,
        ProofError::Unsatisfied {
            violated: vec!["compliance".to_string()]
        }
    );
}

#[test]
fn wrong_flag_is_unprovable() {
    // A rotation presented as a brightness change.
    let (camera, editor, _) = setup(ProvenanceBounds::default());
    let photo = camera.issue(gradient()).unwrap();
    let rotate = Transformation::Rotate(RotateParams { quarter_turns: 1 });
    let rotated = editor.edit(&photo, &rotate).unwrap();

    let signer = User::from_seed(&[0x32; 32]);
    let witness = ComplianceWitness::transformation(
        photo.z(),
        rotated.z(),
        signer.public_key(),
        rotated.proof().signature,
        &Transformation::Brightness(BrightnessParams { delta: 0 }),
    );
    let err = MockProofSystem
        .prove(
            camera.relation(),
            &CompliancePredicate,
            camera.prover_keys().proving_key(),
            &witness,
        )
        .unwrap_err();
    assert!(matches!(err, ProofError::Unsatisfied { .. }));
}

#[test]
fn credits_never_increase_along_a_chain() {
    let (camera, editor, verifier) = setup(ProvenanceBounds::default());
    let mut photo: Photograph = camera.issue(gradient()).unwrap();
    let rotate = Transformation::Rotate(RotateParams { quarter_turns: 1 });
    let mut last = photo.z().image().provenance().bound(TransformationId::Rotate);
    for _ in 0..4 {
        photo = editor.edit(&photo, &rotate).unwrap();
        assert!(verifier.check(&photo, camera.verifier_keys()));
        let now = photo.z().image().provenance().bound(TransformationId::Rotate);
        assert_eq!(now + 1, last);
        last = now;
    }
    // Four quarter turns restore the pixels but not the credit.
    assert_eq!(photo.z().image().pixels(), &gradient());
    assert!(editor.edit(&photo, &rotate).is_err());
}

fn transformation_strategy() -> impl Strategy<Value = Transformation> {
    prop_oneof![
        Just(Transformation::Identity),
        (0u32..5, 0u32..5, 1u32..6, 1u32..6).prop_map(|(x, y, width, height)| {
            Transformation::Crop(CropParams {
                x,
                y,
                width: width.min(5 - x),
                height: height.min(5 - y),
            })
        }),
        (0u32..8).prop_map(|quarter_turns| Transformation::Rotate(RotateParams { quarter_turns })),
        (-255i16..=255).prop_map(|delta| Transformation::Brightness(BrightnessParams { delta })),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn accepted_edits_keep_origin_and_verify(
        edits in proptest::collection::vec(transformation_strategy(), 1..5),
    ) {
        let bounds = ProvenanceBounds { identity: 1, crop: 8, rotate: 8, brightness: 8 };
        let (camera, editor, verifier) = setup(bounds);
        let genesis = camera.issue(gradient()).unwrap();
        let mut photo = genesis.clone();
        for t in &edits {
            let next = editor.edit(&photo, t).unwrap();
            prop_assert!(verifier.check(&next, camera.verifier_keys()));
            prop_assert_eq!(next.z().original_hash(), genesis.z().original_hash());
            prop_assert_eq!(next.z().originator(), genesis.z().originator());
            let before = photo.z().image().provenance();
            let after = next.z().image().provenance();
            for id in TransformationId::ALL {
                prop_assert!(after.bound(id) <= before.bound(id));
            }
            photo = next;
        }
    }
}
