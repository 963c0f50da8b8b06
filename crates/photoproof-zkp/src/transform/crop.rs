//! Crop: keep a rectangle, black out the rest. The grid keeps its size.

use photoproof_core::{Pixel, PixelGrid, PixelLocation, TransformationId, GRID_SIZE, PIXEL_COUNT};
use serde::{Deserialize, Serialize};

use crate::circuit::{Boolean, ConstraintSystem};
use crate::commitment::CircuitCommitment;
use crate::error::TransformError;

/// The rectangle to keep, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropParams {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Columns kept.
    pub width: u32,
    /// Rows kept.
    pub height: u32,
}

impl Default for CropParams {
    /// The full frame.
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: GRID_SIZE as u32,
            height: GRID_SIZE as u32,
        }
    }
}

impl CropParams {
    /// Check the rectangle is non-empty and inside the grid.
    pub fn validate(&self) -> Result<(), TransformError> {
        let invalid = |reason: String| TransformError::InvalidParameters {
            transformation: TransformationId::Crop,
            reason,
        };
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "empty rectangle {}x{}",
                self.width, self.height
            )));
        }
        let right = u64::from(self.x) + u64::from(self.width);
        let bottom = u64::from(self.y) + u64::from(self.height);
        if right > GRID_SIZE as u64 || bottom > GRID_SIZE as u64 {
            return Err(invalid(format!(
                "rectangle ({}, {}) {}x{} exceeds the {GRID_SIZE}x{GRID_SIZE} grid",
                self.x, self.y, self.width, self.height
            )));
        }
        Ok(())
    }

    fn contains(&self, loc: PixelLocation) -> bool {
        let (x, y) = (loc.x as u32, loc.y as u32);
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// The cropped grid.
    pub fn map(&self, grid: &PixelGrid) -> Result<PixelGrid, TransformError> {
        self.validate()?;
        let mut out = [Pixel::BLACK; PIXEL_COUNT];
        for (index, px) in grid.iter().enumerate() {
            if self.contains(PixelLocation::from_index(index)) {
                out[index] = *px;
            }
        }
        Ok(out)
    }
}

pub(super) fn check<CS: ConstraintSystem>(
    cs: &mut CS,
    params: &CropParams,
    z_in: &CircuitCommitment,
    z_out: &CircuitCommitment,
) -> Boolean {
    let credit = super::consumes_one_credit(cs, TransformationId::Crop, z_in, z_out);
    let mapped = params.map(&z_in.image.pixel_grid()).ok();
    let pixels = super::pixels_match(cs, "crop.pixels", mapped, z_out);
    cs.and("crop", credit, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered() -> PixelGrid {
        let mut grid = [Pixel::BLACK; PIXEL_COUNT];
        for (i, px) in grid.iter_mut().enumerate() {
            *px = Pixel::new(i as u8 + 1, 0, 0);
        }
        grid
    }

    #[test]
    fn keeps_rectangle_blacks_out_rest() {
        let p = CropParams {
            x: 1,
            y: 2,
            width: 2,
            height: 2,
        };
        let out = p.map(&numbered()).unwrap();
        let kept: Vec<usize> = (0..PIXEL_COUNT).filter(|i| out[*i] != Pixel::BLACK).collect();
        assert_eq!(kept, vec![11, 12, 16, 17]);
        assert_eq!(out[11], Pixel::new(12, 0, 0));
    }

    #[test]
    fn full_frame_is_a_no_op_on_pixels() {
        let grid = numbered();
        assert_eq!(CropParams::default().map(&grid).unwrap(), grid);
    }

    #[test]
    fn rejects_empty_and_overflowing_rectangles() {
        let empty = CropParams {
            width: 0,
            ..CropParams::default()
        };
        let overflow = CropParams {
            x: 4,
            width: 2,
            ..CropParams::default()
        };
        let huge = CropParams {
            x: u32::MAX,
            width: u32::MAX,
            ..CropParams::default()
        };
        for p in [empty, overflow, huge] {
            assert!(matches!(
                p.map(&numbered()),
                Err(TransformError::InvalidParameters {
                    transformation: TransformationId::Crop,
                    ..
                })
            ));
        }
    }
}
