//! Packed monochrome frame buffers
//!
//! [`Bitmap`] holds one bit per pixel, row-major, in a fixed-capacity
//! backing store so it works without an allocator. Dimensions are chosen
//! at runtime (character displays come in several geometries) and are
//! clamped to the compile-time capacity.

use crate::glyph::{Glyph, CELL_HEIGHT, CELL_WIDTH};

/// Largest supported frame width in pixels
pub const MAX_WIDTH: usize = 128;

/// Largest supported frame height in pixels
pub const MAX_HEIGHT: usize = 64;

/// Bytes per packed row (fixed stride)
const STRIDE: usize = MAX_WIDTH / 8;

/// Monochrome frame buffer
///
/// Out-of-bounds reads return an off pixel and out-of-bounds writes are
/// ignored, so callers can hand in geometry-agnostic drawing code.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    data: [u8; STRIDE * MAX_HEIGHT],
    width: u16,
    height: u16,
}

impl Bitmap {
    /// Create an all-off bitmap, clamping dimensions to the capacity
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            data: [0; STRIDE * MAX_HEIGHT],
            width: width.min(MAX_WIDTH as u16),
            height: height.min(MAX_HEIGHT as u16),
        }
    }

    /// Convert 8-bit luma samples (row-major, one byte per pixel) to 1-bit
    ///
    /// A pixel is on when its sample is at or above `threshold`. Samples
    /// beyond the bitmap capacity are dropped.
    pub fn from_luma(samples: &[u8], width: u16, height: u16, threshold: u8) -> Self {
        let mut bitmap = Self::new(width, height);
        for y in 0..bitmap.height {
            for x in 0..bitmap.width {
                let idx = y as usize * width as usize + x as usize;
                if samples.get(idx).is_some_and(|&s| s >= threshold) {
                    bitmap.set_pixel(x, y, true);
                }
            }
        }
        bitmap
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Read a pixel; coordinates outside the bitmap read as off
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = y as usize * STRIDE + x as usize / 8;
        self.data[byte] & (0x80 >> (x % 8)) != 0
    }

    /// Write a pixel; coordinates outside the bitmap are ignored
    pub fn set_pixel(&mut self, x: u16, y: u16, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let byte = y as usize * STRIDE + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        if on {
            self.data[byte] |= mask;
        } else {
            self.data[byte] &= !mask;
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Copy of the top-left `width` x `height` region
    ///
    /// Pixels outside the source read as off, so cropping larger than the
    /// source pads with blank pixels.
    pub fn crop(&self, width: u16, height: u16) -> Self {
        let mut out = Self::new(width, height);
        for y in 0..out.height {
            for x in 0..out.width {
                if self.pixel(x, y) {
                    out.set_pixel(x, y, true);
                }
            }
        }
        out
    }

    /// Extract the 5x8 cell whose top-left pixel is at (`x0`, `y0`)
    pub fn glyph_at(&self, x0: u16, y0: u16) -> Glyph {
        Glyph::from_fn(|x, y| self.pixel(x0 + x as u16, y0 + y as u16))
    }

    /// Draw a glyph with its top-left pixel at (`x0`, `y0`)
    ///
    /// Useful for composing test frames cell by cell.
    pub fn blit_glyph(&mut self, x0: u16, y0: u16, glyph: &Glyph) {
        for y in 0..CELL_HEIGHT {
            for x in 0..CELL_WIDTH {
                self.set_pixel(x0 + x as u16, y0 + y as u16, glyph.pixel(x, y));
            }
        }
    }
}

impl core::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Bitmap({}x{})", self.width, self.height)
    }
}
