//! # Image Model
//!
//! A fixed-size square grid of RGB pixels plus the provenance vector. The
//! grid dimensions are compile-time constants shared by the plain image and
//! by its circuit projection; there is no runtime-sized image.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field::FieldElement;
use crate::provenance::Provenance;

/// Edge length of the pixel grid.
pub const GRID_SIZE: usize = 5;

/// Total number of pixels in an image.
pub const PIXEL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Row-major pixel storage.
pub type PixelGrid = [Pixel; PIXEL_COUNT];

/// An RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    /// Red, green and blue channels.
    pub rgb: [u8; 3],
}

impl Pixel {
    /// All channels zero.
    pub const BLACK: Pixel = Pixel { rgb: [0, 0, 0] };

    /// Build a pixel from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b] }
    }
}

/// Column/row coordinate of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelLocation {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl PixelLocation {
    /// Validated constructor.
    pub fn new(x: usize, y: usize) -> Result<Self, CoreError> {
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return Err(CoreError::PixelOutOfBounds {
                x,
                y,
                size: GRID_SIZE,
            });
        }
        Ok(Self { x, y })
    }

    /// Position in the row-major pixel array.
    pub fn to_index(self) -> usize {
        self.y * GRID_SIZE + self.x
    }

    /// Inverse of [`PixelLocation::to_index`]. `index` must be below
    /// [`PIXEL_COUNT`].
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < PIXEL_COUNT);
        Self {
            x: index % GRID_SIZE,
            y: index / GRID_SIZE,
        }
    }
}

/// Image content plus provenance credits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Image {
    pixels: PixelGrid,
    provenance: Provenance,
}

impl Image {
    /// Assemble an image from a full grid.
    pub fn new(pixels: PixelGrid, provenance: Provenance) -> Self {
        Self { pixels, provenance }
    }

    /// Every pixel set to `pixel`.
    pub fn filled(pixel: Pixel, provenance: Provenance) -> Self {
        Self::new([pixel; PIXEL_COUNT], provenance)
    }

    /// Build from a slice, checking it covers the grid exactly.
    pub fn from_pixels(pixels: &[Pixel], provenance: Provenance) -> Result<Self, CoreError> {
        let grid: PixelGrid = pixels.try_into().map_err(|_| CoreError::Dimension {
            expected: PIXEL_COUNT,
            actual: pixels.len(),
        })?;
        Ok(Self::new(grid, provenance))
    }

    /// Uniformly random pixels, used by the camera to simulate a capture.
    pub fn random<R: Rng>(rng: &mut R, provenance: Provenance) -> Self {
        let mut pixels = [Pixel::BLACK; PIXEL_COUNT];
        for px in pixels.iter_mut() {
            px.rgb = rng.gen();
        }
        Self::new(pixels, provenance)
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &PixelGrid {
        &self.pixels
    }

    /// Provenance credits.
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Pixel at a location.
    pub fn pixel(&self, loc: PixelLocation) -> Pixel {
        self.pixels[loc.to_index()]
    }

    /// Copy with one pixel replaced.
    pub fn with_pixel(&self, loc: PixelLocation, pixel: Pixel) -> Self {
        let mut next = self.clone();
        next.pixels[loc.to_index()] = pixel;
        next
    }

    /// Copy with the whole grid replaced.
    pub fn with_pixels(&self, pixels: PixelGrid) -> Self {
        Self::new(pixels, self.provenance)
    }

    /// Copy with different provenance.
    pub fn with_provenance(&self, provenance: Provenance) -> Self {
        Self::new(self.pixels, provenance)
    }

    /// The canonical field element of the pixel content.
    pub fn packed(&self) -> FieldElement {
        FieldElement::pack(self.pixels.iter().map(|p| p.rgb))
    }
}
