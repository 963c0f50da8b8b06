//! Brightness: add a constant to every channel, clamped to `0..=255`.

use photoproof_core::{PixelGrid, TransformationId};
use serde::{Deserialize, Serialize};

use crate::circuit::{Boolean, ConstraintSystem};
use crate::commitment::CircuitCommitment;
use crate::error::TransformError;

/// Largest accepted shift in either direction.
pub const MAX_BRIGHTNESS_DELTA: i16 = 255;

/// Signed shift applied to every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrightnessParams {
    /// Shift, within `-255..=255`.
    pub delta: i16,
}

impl BrightnessParams {
    /// The shifted grid.
    pub fn map(&self, grid: &PixelGrid) -> Result<PixelGrid, TransformError> {
        if !(-MAX_BRIGHTNESS_DELTA..=MAX_BRIGHTNESS_DELTA).contains(&self.delta) {
            return Err(TransformError::InvalidParameters {
                transformation: TransformationId::Brightness,
                reason: format!(
                    "delta {} outside [-{MAX_BRIGHTNESS_DELTA}, {MAX_BRIGHTNESS_DELTA}]",
                    self.delta
                ),
            });
        }
        let shift = |c: u8| (i16::from(c) + self.delta).clamp(0, 255) as u8;
        let mut out = *grid;
        for px in out.iter_mut() {
            px.rgb = px.rgb.map(shift);
        }
        Ok(out)
    }
}

pub(super) fn check<CS: ConstraintSystem>(
    cs: &mut CS,
    params: &BrightnessParams,
    z_in: &CircuitCommitment,
    z_out: &CircuitCommitment,
) -> Boolean {
    let credit = super::consumes_one_credit(cs, TransformationId::Brightness, z_in, z_out);
    let mapped = params.map(&z_in.image.pixel_grid()).ok();
    let pixels = super::pixels_match(cs, "brightness.pixels", mapped, z_out);
    cs.and("brightness", credit, pixels)
}
