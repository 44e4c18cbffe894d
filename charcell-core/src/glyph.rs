//! 5x8 glyph patterns
//!
//! A glyph is one character cell's worth of pixels in the row format the
//! controller's CGRAM expects: eight rows of five columns, one byte per
//! row, bit 4 being the leftmost column. Glyphs compare bit-for-bit and
//! hash structurally so they can key a reverse-lookup map directly.

/// Width of a character cell in pixels
pub const CELL_WIDTH: usize = 5;

/// Height of a character cell in pixels
pub const CELL_HEIGHT: usize = 8;

/// Valid bits within a glyph row
const ROW_MASK: u8 = 0x1F;

/// Immutable 5x8 pixel pattern
///
/// The default glyph is all pixels off (a blank cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    rows: [u8; CELL_HEIGHT],
}

impl Glyph {
    /// Build a glyph from raw row bytes, masking off the unused high bits
    pub const fn from_rows(rows: [u8; CELL_HEIGHT]) -> Self {
        let mut masked = [0u8; CELL_HEIGHT];
        let mut y = 0;
        while y < CELL_HEIGHT {
            masked[y] = rows[y] & ROW_MASK;
            y += 1;
        }
        Self { rows: masked }
    }

    /// Build a glyph by sampling a pixel function over the cell
    pub fn from_fn<F: FnMut(usize, usize) -> bool>(mut pixel: F) -> Self {
        let mut rows = [0u8; CELL_HEIGHT];
        for (y, row) in rows.iter_mut().enumerate() {
            for x in 0..CELL_WIDTH {
                if pixel(x, y) {
                    *row |= 1 << (CELL_WIDTH - 1 - x);
                }
            }
        }
        Self { rows }
    }

    /// Read the pixel at cell coordinates (`x` left to right, `y` top down)
    ///
    /// Coordinates outside the cell read as off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= CELL_WIDTH || y >= CELL_HEIGHT {
            return false;
        }
        self.rows[y] & (1 << (CELL_WIDTH - 1 - x)) != 0
    }

    /// Row bytes in CGRAM upload order (top row first)
    pub const fn rows(&self) -> [u8; CELL_HEIGHT] {
        self.rows
    }

    /// True if no pixel is set
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }
}
