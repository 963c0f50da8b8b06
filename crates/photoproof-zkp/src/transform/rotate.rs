//! Rotate: clockwise quarter turns of the whole grid.

use photoproof_core::{Pixel, PixelGrid, PixelLocation, TransformationId, GRID_SIZE, PIXEL_COUNT};
use serde::{Deserialize, Serialize};

use crate::circuit::{Boolean, ConstraintSystem};
use crate::commitment::CircuitCommitment;

/// Number of clockwise quarter turns. Taken modulo four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotateParams {
    /// Quarter turns.
    pub quarter_turns: u32,
}

impl RotateParams {
    /// The rotated grid. One turn moves `(x, y)` to `(N - 1 - y, x)`.
    pub fn map(&self, grid: &PixelGrid) -> PixelGrid {
        let mut current = *grid;
        for _ in 0..self.quarter_turns % 4 {
            let mut next = [Pixel::BLACK; PIXEL_COUNT];
            for (index, px) in current.iter().enumerate() {
                let PixelLocation { x, y } = PixelLocation::from_index(index);
                next[x * GRID_SIZE + (GRID_SIZE - 1 - y)] = *px;
            }
            current = next;
        }
        current
    }
}

pub(super) fn check<CS: ConstraintSystem>(
    cs: &mut CS,
    params: &RotateParams,
    z_in: &CircuitCommitment,
    z_out: &CircuitCommitment,
) -> Boolean {
    let credit = super::consumes_one_credit(cs, TransformationId::Rotate, z_in, z_out);
    let mapped = Some(params.map(&z_in.image.pixel_grid()));
    let pixels = super::pixels_match(cs, "rotate.pixels", mapped, z_out);
    cs.and("rotate", credit, pixels)
}
