//! Font reverse index
//!
//! The render pipeline works backwards from pixels to characters: given a
//! 5x8 cell it asks "which codepoint draws exactly this pattern?". A
//! [`FontTable`] is that reverse index, built by whatever loads the font
//! (font-file parsing lives outside this workspace) and handed to the
//! driver at construction.
//!
//! Matching is exact, bit for bit. There is deliberately no fuzzy or
//! nearest-pattern lookup; a near miss goes to the CGRAM glyph cache
//! instead.

use heapless::FnvIndexMap;

use crate::glyph::Glyph;

/// Maximum number of distinct glyph patterns in a font table
pub const FONT_TABLE_CAPACITY: usize = 256;

/// Font table errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// The reverse index is full
    TableFull,
}

/// Exact-match reverse index from glyph pattern to codepoint
#[derive(Default)]
pub struct FontTable {
    index: FnvIndexMap<Glyph, u8, FONT_TABLE_CAPACITY>,
}

impl FontTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `glyph` as the canonical pattern for `codepoint`
    ///
    /// Re-inserting an existing pattern replaces its codepoint.
    pub fn insert(&mut self, glyph: Glyph, codepoint: u8) -> Result<(), FontError> {
        self.index
            .insert(glyph, codepoint)
            .map(|_| ())
            .map_err(|_| FontError::TableFull)
    }

    /// Look up the codepoint whose canonical pattern is exactly `glyph`
    pub fn lookup(&self, glyph: &Glyph) -> Option<u8> {
        self.index.get(glyph).copied()
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if no pattern is registered
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_lookup() {
        let mut font = FontTable::new();
        let a = Glyph::from_rows([0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11, 0x00]);
        font.insert(a, b'A').unwrap();

        assert_eq!(font.lookup(&a), Some(b'A'));

        // One flipped bit is a miss, not a near match
        let mut rows = a.rows();
        rows[7] ^= 0x01;
        assert_eq!(font.lookup(&Glyph::from_rows(rows)), None);
    }

    #[test]
    fn test_reinsert_replaces() {
        let mut font = FontTable::new();
        let blank = Glyph::default();
        font.insert(blank, b' ').unwrap();
        font.insert(blank, b'.').unwrap();
        assert_eq!(font.lookup(&blank), Some(b'.'));
        assert_eq!(font.len(), 1);
    }

    #[test]
    fn test_empty_table() {
        let font = FontTable::new();
        assert!(font.is_empty());
        assert_eq!(font.lookup(&Glyph::default()), None);
    }
}
