//! # Transformation Registry
//!
//! The closed set of permissible edits. Each variant supplies:
//!
//! - an out-of-circuit [`Transformation::apply`] used by editors before
//!   proving, which also spends the provenance credit;
//! - an in-circuit check, dispatched by [`check_registry`], that decides
//!   whether `z_out` is a legitimate result of applying the variant to
//!   `z_in`, including the provenance update;
//! - a stable [`TransformationId`] tag that selects its provenance entry.
//!
//! Pixel mappings are pure functions over a [`PixelGrid`] shared by both
//! sides, so the edit an editor performs and the edit the predicate checks
//! cannot drift apart.
//!
//! ## Exactly One Flag
//!
//! The circuit form carries one activation flag per registered variant.
//! [`check_registry`] evaluates every variant's check unconditionally, then
//! requires the flags to sum to one and the flagged variant's check to hold.

pub mod brightness;
pub mod crop;
pub mod identity;
pub mod rotate;

use photoproof_core::{ContentDigest, Image, PixelGrid, TransformationId, PROVENANCE_LEN};
use serde::{Deserialize, Serialize};

use crate::circuit::{Boolean, ConstraintSystem};
use crate::commitment::CircuitCommitment;
use crate::error::TransformError;

pub use brightness::BrightnessParams;
pub use crop::CropParams;
pub use rotate::RotateParams;

/// A permissible edit together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transformation {
    /// Leave the image unchanged.
    Identity,
    /// Black out everything outside a rectangle.
    Crop(CropParams),
    /// Rotate clockwise by quarter turns.
    Rotate(RotateParams),
    /// Shift every channel by a constant and clamp.
    Brightness(BrightnessParams),
}

impl Transformation {
    /// Registry tag.
    pub fn id(&self) -> TransformationId {
        match self {
            Self::Identity => TransformationId::Identity,
            Self::Crop(_) => TransformationId::Crop,
            Self::Rotate(_) => TransformationId::Rotate,
            Self::Brightness(_) => TransformationId::Brightness,
        }
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        self.id().name()
    }

    /// Apply out of circuit, spending the provenance credit.
    ///
    /// # Errors
    ///
    /// [`TransformError::InvalidParameters`] for parameters the variant
    /// refuses; [`TransformError::BoundExhausted`] when the credit is gone
    /// (for `Identity`, when the permission bit is not set).
    pub fn apply(&self, image: &Image) -> Result<Image, TransformError> {
        match self {
            Self::Identity => identity::apply(image),
            Self::Crop(p) => spend_credit(image, TransformationId::Crop, p.map(image.pixels())?),
            Self::Rotate(p) => {
                spend_credit(image, TransformationId::Rotate, p.map(image.pixels()))
            }
            Self::Brightness(p) => {
                spend_credit(image, TransformationId::Brightness, p.map(image.pixels())?)
            }
        }
    }

    /// Activation flags and parameter slots for the predicate witness.
    pub fn to_circuit_form(&self) -> (TransformationFlags, TransformationParams) {
        let flags = TransformationFlags::only(self.id());
        let mut params = TransformationParams::default();
        match *self {
            Self::Identity => {}
            Self::Crop(p) => params.crop = p,
            Self::Rotate(p) => params.rotate = p,
            Self::Brightness(p) => params.brightness = p,
        }
        (flags, params)
    }
}

impl std::fmt::Display for Transformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => f.write_str("identity"),
            Self::Crop(p) => write!(f, "crop({}, {}, {}x{})", p.x, p.y, p.width, p.height),
            Self::Rotate(p) => write!(f, "rotate({})", p.quarter_turns),
            Self::Brightness(p) => write!(f, "brightness({:+})", p.delta),
        }
    }
}

/// New pixels plus one credit of `id` spent.
fn spend_credit(
    image: &Image,
    id: TransformationId,
    pixels: PixelGrid,
) -> Result<Image, TransformError> {
    let provenance = image
        .provenance()
        .consume(id)
        .map_err(|_| TransformError::BoundExhausted(id))?;
    Ok(Image::new(pixels, provenance))
}

/// One activation flag per registered transformation, in tag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformationFlags([bool; PROVENANCE_LEN]);

impl TransformationFlags {
    /// No transformation active (the genesis witness).
    pub fn none() -> Self {
        Self::default()
    }

    /// Exactly `id` active.
    pub fn only(id: TransformationId) -> Self {
        let mut flags = Self::default();
        flags.0[id.index()] = true;
        flags
    }

    /// Flag for `id`.
    pub fn get(&self, id: TransformationId) -> bool {
        self.0[id.index()]
    }

    /// Set the flag for `id`.
    pub fn set(&mut self, id: TransformationId, active: bool) {
        self.0[id.index()] = active;
    }

    /// Number of active flags.
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|f| **f).count()
    }
}

/// Parameter slots for every registered transformation. Slots of inactive
/// variants hold defaults and only feed soft checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformationParams {
    /// Crop rectangle.
    pub crop: CropParams,
    /// Rotation.
    pub rotate: RotateParams,
    /// Brightness shift.
    pub brightness: BrightnessParams,
}

/// Evaluate every registered check and combine them under the
/// exactly-one-flag discipline.
pub fn check_registry<CS: ConstraintSystem>(
    cs: &mut CS,
    flags: &TransformationFlags,
    params: &TransformationParams,
    z_in: &CircuitCommitment,
    z_out: &CircuitCommitment,
    hashes: (&ContentDigest, &ContentDigest),
) -> Boolean {
    let mut any_applied = Boolean::FALSE;
    let mut active = 0u64;
    for id in TransformationId::ALL {
        let flag = cs.alloc_bit(&format!("flag.{id}"), flags.get(id));
        active += u64::from(flag.value());
        let check = match id {
            TransformationId::Identity => identity::check(cs, z_in, z_out, hashes),
            TransformationId::Crop => crop::check(cs, &params.crop, z_in, z_out),
            TransformationId::Rotate => rotate::check(cs, &params.rotate, z_in, z_out),
            TransformationId::Brightness => {
                brightness::check(cs, &params.brightness, z_in, z_out)
            }
        };
        let applied = cs.and(&format!("{id}.applied"), flag, check);
        any_applied = cs.or("flags.any_applied", any_applied, applied);
    }
    let exactly_one = cs.is_equal("flags.exactly_one", &active, &1);
    cs.and("transformation", exactly_one, any_applied)
}

/// In-circuit provenance update for a credit-consuming transformation:
/// `bound_in != 0`, `bound_out == bound_in - 1`, every other entry unchanged.
pub(crate) fn consumes_one_credit<CS: ConstraintSystem>(
    cs: &mut CS,
    id: TransformationId,
    z_in: &CircuitCommitment,
    z_out: &CircuitCommitment,
) -> Boolean {
    let mut ok = Boolean::TRUE;
    for entry in TransformationId::ALL {
        let bound_in = z_in.image.bound(entry.index());
        let bound_out = z_out.image.bound(entry.index());
        let holds = if entry == id {
            let nonzero = cs.is_equal(&format!("{id}.credit.nonzero"), &(bound_in != 0), &true);
            let spent = cs.is_equal(
                &format!("{id}.credit.spent"),
                &Some(bound_out),
                &bound_in.checked_sub(1),
            );
            cs.and(&format!("{id}.credit"), nonzero, spent)
        } else {
            cs.is_equal(&format!("{id}.credit.{entry}"), &bound_out, &bound_in)
        };
        ok = cs.and(&format!("{id}.credit.all"), ok, holds);
    }
    ok
}

/// Compare a mapped grid against the output wires. `None` (invalid
/// parameters) never matches.
pub(crate) fn pixels_match<CS: ConstraintSystem>(
    cs: &mut CS,
    label: &str,
    mapped: Option<PixelGrid>,
    z_out: &CircuitCommitment,
) -> Boolean {
    let holds = matches!(mapped, Some(grid) if grid == z_out.image.pixel_grid());
    cs.alloc_bit(label, holds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{ShapeRecorder, WitnessChecker};
    use crate::commitment::Commitment;
    use photoproof_core::{Pixel, PixelLocation, Provenance};
    use photoproof_crypto::{image_digest, Ed25519KeyPair};

    fn genesis(image: Image) -> Commitment {
        let admin = Ed25519KeyPair::from_seed(&[2; 32]);
        let pending = Commitment::genesis(image, admin.public_key());
        let sig = admin.sign(pending.original_hash()).unwrap();
        pending.with_signature(sig)
    }

    fn gradient() -> Image {
        let mut pixels = [Pixel::BLACK; photoproof_core::PIXEL_COUNT];
        for (i, px) in pixels.iter_mut().enumerate() {
            *px = Pixel::new(i as u8 * 10, 255 - i as u8, 7);
        }
        Image::new(pixels, Provenance::default())
    }

    fn all_transformations() -> Vec<Transformation> {
        vec![
            Transformation::Identity,
            Transformation::Crop(CropParams {
                x: 1,
                y: 1,
                width: 3,
                height: 2,
            }),
            Transformation::Rotate(RotateParams { quarter_turns: 1 }),
            Transformation::Brightness(BrightnessParams { delta: -40 }),
        ]
    }

    fn run(
        t: &Transformation,
        z_in: &Commitment,
        z_out: &Commitment,
        flags: TransformationFlags,
    ) -> (bool, Vec<String>) {
        let (_, params) = t.to_circuit_form();
        let (w_in, w_out) = (z_in.to_circuit(), z_out.to_circuit());
        let hashes = (image_digest(z_in.image()), image_digest(z_out.image()));
        let mut cs = WitnessChecker::new();
        let result = check_registry(
            &mut cs,
            &flags,
            &params,
            &w_in,
            &w_out,
            (&hashes.0, &hashes.1),
        );
        (result.value(), cs.labels().to_vec())
    }

    #[test]
    fn applied_output_passes_its_own_check() {
        let z_in = genesis(gradient());
        for t in all_transformations() {
            let out = t.apply(z_in.image()).unwrap();
            let z_out = z_in.derive_successor(out);
            let (ok, _) = run(&t, &z_in, &z_out, t.to_circuit_form().0);
            assert!(ok, "{t} should satisfy its own check");
        }
    }

    #[test]
    fn output_fails_under_another_flag() {
        let z_in = genesis(gradient());
        let rotate = Transformation::Rotate(RotateParams { quarter_turns: 1 });
        let z_out = z_in.derive_successor(rotate.apply(z_in.image()).unwrap());
        for other in all_transformations() {
            if other.id() == TransformationId::Rotate {
                continue;
            }
            let (ok, _) = run(&rotate, &z_in, &z_out, TransformationFlags::only(other.id()));
            assert!(!ok, "rotated output must not pass as {other}");
        }
    }

    #[test]
    fn zero_or_two_flags_fail() {
        let z_in = genesis(gradient());
        let t = Transformation::Identity;
        let z_out = z_in.derive_successor(t.apply(z_in.image()).unwrap());
        assert!(!run(&t, &z_in, &z_out, TransformationFlags::none()).0);
        let mut two = TransformationFlags::only(TransformationId::Identity);
        two.set(TransformationId::Crop, true);
        assert_eq!(two.active_count(), 2);
        assert!(!run(&t, &z_in, &z_out, two).0);
    }

    #[test]
    fn shape_does_not_depend_on_values() {
        let z_in = genesis(gradient());
        let mut shapes = Vec::new();
        for t in all_transformations() {
            let z_out = z_in.derive_successor(t.apply(z_in.image()).unwrap());
            shapes.push(run(&t, &z_in, &z_out, t.to_circuit_form().0).1);
        }
        let blank = CircuitCommitment::blank();
        let mut rec = ShapeRecorder::new();
        let zero = ContentDigest::default();
        check_registry(
            &mut rec,
            &TransformationFlags::none(),
            &TransformationParams::default(),
            &blank,
            &blank,
            (&zero, &zero),
        );
        let reference = rec.into_labels();
        assert!(shapes.iter().all(|s| *s == reference));
    }

    #[test]
    fn credit_update_rejects_replenish_and_double_spend() {
        let z_in = genesis(gradient());
        let grid = *z_in.image().pixels();
        let check = |prov: Provenance| {
            let z_out = z_in.derive_successor(Image::new(grid, prov));
            let mut cs = WitnessChecker::new();
            let (w_in, w_out) = (z_in.to_circuit(), z_out.to_circuit());
            consumes_one_credit(&mut cs, TransformationId::Rotate, &w_in, &w_out).value()
        };
        assert!(check(Provenance::from_bounds([1, 1, 3, 2])));
        assert!(!check(Provenance::from_bounds([1, 1, 2, 2])));
        assert!(!check(Provenance::from_bounds([1, 1, 4, 2])));
        assert!(!check(Provenance::from_bounds([1, 0, 3, 2])));
        assert!(!check(Provenance::from_bounds([1, 1, 3, 5])));
    }

    #[test]
    fn apply_spends_exactly_one_credit() {
        let image = gradient();
        let out = Transformation::Brightness(BrightnessParams { delta: 5 })
            .apply(&image)
            .unwrap();
        assert_eq!(out.provenance().bound(TransformationId::Brightness), 1);
        assert_eq!(out.provenance().bound(TransformationId::Rotate), 4);
        assert_eq!(
            out.pixel(PixelLocation::from_index(0)),
            Pixel::new(5, 255, 12)
        );
    }

    #[test]
    fn exhausted_bound_is_refused() {
        let image = gradient();
        let crop = Transformation::Crop(CropParams::default());
        let once = crop.apply(&image).unwrap();
        assert_eq!(
            crop.apply(&once),
            Err(TransformError::BoundExhausted(TransformationId::Crop))
        );
    }

    #[test]
    fn serde_uses_kind_tag() {
        let t = Transformation::Rotate(RotateParams { quarter_turns: 3 });
        let json = serde_json::to_value(t).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "rotate", "quarter_turns": 3}));
        let back: Transformation = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
        let id: Transformation = serde_json::from_str(r#"{"kind":"identity"}"#).unwrap();
        assert_eq!(id, Transformation::Identity);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::circuit::WitnessChecker;
    use crate::commitment::Commitment;
    use photoproof_core::{Pixel, Provenance, GRID_SIZE, PIXEL_COUNT};
    use photoproof_crypto::{image_digest, Ed25519PublicKey, Ed25519Signature};
    use proptest::prelude::*;

    fn any_image() -> impl Strategy<Value = Image> {
        prop::collection::vec(any::<[u8; 3]>(), PIXEL_COUNT).prop_map(|rgb| {
            let pixels: Vec<Pixel> = rgb.into_iter().map(|rgb| Pixel { rgb }).collect();
            Image::from_pixels(&pixels, Provenance::default()).unwrap()
        })
    }

    fn any_transformation() -> impl Strategy<Value = Transformation> {
        let n = GRID_SIZE as u32;
        prop_oneof![
            Just(Transformation::Identity),
            (0..n, 0..n, 1..=n, 1..=n).prop_map(move |(x, y, w, h)| {
                Transformation::Crop(CropParams {
                    x,
                    y,
                    width: w.min(n - x),
                    height: h.min(n - y),
                })
            }),
            any::<u32>().prop_map(|q| Transformation::Rotate(RotateParams { quarter_turns: q })),
            (-255i16..=255).prop_map(|d| Transformation::Brightness(BrightnessParams { delta: d })),
        ]
    }

    fn unsigned(image: Image) -> Commitment {
        Commitment::genesis(image, Ed25519PublicKey::from_bytes([0; 32]))
            .with_signature(Ed25519Signature::from_bytes([0; 64]))
    }

    proptest! {
        /// Whatever an editor applies out of circuit passes the in-circuit check.
        #[test]
        fn apply_and_check_agree(image in any_image(), t in any_transformation()) {
            let z_in = unsigned(image);
            let z_out = z_in.derive_successor(t.apply(z_in.image()).unwrap());
            let (flags, params) = t.to_circuit_form();
            let (h_in, h_out) = (image_digest(z_in.image()), image_digest(z_out.image()));
            let mut cs = WitnessChecker::new();
            let ok = check_registry(
                &mut cs,
                &flags,
                &params,
                &z_in.to_circuit(),
                &z_out.to_circuit(),
                (&h_in, &h_out),
            );
            prop_assert!(ok.value());
        }

        /// Four quarter turns restore the grid.
        #[test]
        fn full_rotation_restores_pixels(image in any_image()) {
            let turn = RotateParams { quarter_turns: 1 };
            let mut grid = *image.pixels();
            for _ in 0..4 {
                grid = turn.map(&grid);
            }
            prop_assert_eq!(&grid, image.pixels());
        }
    }
}
