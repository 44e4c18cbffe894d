//! CGRAM glyph cache
//!
//! The controller has exactly eight programmable glyph slots, addressable
//! as codepoints 0-7. The cache hands them out first-free-slot within a
//! single rendered frame: it is reset at the start of every `update`, so
//! slot assignments never persist across frames and lookups only have
//! "within this frame" meaning. There is no LRU - once all eight slots
//! are taken, every further unmatched pattern in the frame falls back to
//! a substitute glyph until the next reset.

use charcell_hal::ByteBus;
use embedded_hal::delay::DelayNs;
use heapless::FnvIndexMap;

use charcell_core::Glyph;

use crate::cmd;
use crate::protocol::{Mode, NibbleBus};

/// Number of programmable glyph slots in controller CGRAM
pub const CGRAM_SLOTS: usize = 8;

/// Frame-scoped allocator over the controller's CGRAM slots
///
/// Keyed by exact glyph pattern. Resetting clears the bookkeeping only;
/// the slots in controller memory are simply overwritten as the next
/// frame allocates.
#[derive(Default)]
pub struct GlyphCache {
    slots: FnvIndexMap<Glyph, u8, CGRAM_SLOTS>,
    next_slot: u8,
    fallbacks: u32,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all slot assignments; no bus traffic
    ///
    /// Must run once per full-frame render before any resolve/allocate.
    /// The exhaustion counter deliberately survives so it stays useful
    /// as a cross-frame diagnostic.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.next_slot = 0;
    }

    /// Codepoint of the slot already holding `glyph` this frame, if any
    ///
    /// Exact bit-for-bit match only.
    pub fn resolve(&self, glyph: &Glyph) -> Option<u8> {
        self.slots.get(glyph).copied()
    }

    /// Upload `glyph` into the next free slot and return its codepoint
    ///
    /// Returns `Ok(None)` when all slots are taken this frame; the caller
    /// substitutes a fallback glyph. The upload is one CGRAM address-set
    /// command followed by the eight pattern rows in character mode.
    pub fn allocate<B, D>(
        &mut self,
        link: &mut NibbleBus<B, D>,
        glyph: &Glyph,
    ) -> Result<Option<u8>, B::Error>
    where
        B: ByteBus,
        D: DelayNs,
    {
        if self.next_slot as usize >= CGRAM_SLOTS {
            self.fallbacks = self.fallbacks.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("CGRAM exhausted, substituting fallback glyph");
            return Ok(None);
        }

        let slot = self.next_slot;
        link.write(cmd::SET_CGRAM_ADDR | (slot * 8), Mode::Command)?;
        for row in glyph.rows() {
            link.write(row, Mode::Character)?;
        }

        // Cannot fail: map capacity equals the slot count
        let _ = self.slots.insert(*glyph, slot);
        self.next_slot += 1;
        Ok(Some(slot))
    }

    /// Slots allocated since the last reset
    pub fn in_use(&self) -> usize {
        self.next_slot as usize
    }

    /// Total fallback substitutions since construction
    pub fn fallback_count(&self) -> u32 {
        self.fallbacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{NoopDelay, RecordingBus};

    fn pattern(seed: u8) -> Glyph {
        Glyph::from_rows([seed, seed ^ 0x1F, 0, 0, 0, 0, 0, seed])
    }

    #[test]
    fn test_allocate_uploads_pattern() {
        let bus = RecordingBus::new();
        let mut link = NibbleBus::new(&bus, NoopDelay).unwrap();
        let mut cache = GlyphCache::new();
        bus.clear();

        let glyph = pattern(0x0A);
        let slot = cache.allocate(&mut link, &glyph).unwrap();
        assert_eq!(slot, Some(0));

        let logical = bus.logical();
        assert_eq!(logical[0], (cmd::SET_CGRAM_ADDR, false));
        for (i, &row) in glyph.rows().iter().enumerate() {
            assert_eq!(logical[1 + i], (row, true));
        }
    }

    #[test]
    fn test_slots_are_first_free_in_order() {
        let bus = RecordingBus::new();
        let mut link = NibbleBus::new(&bus, NoopDelay).unwrap();
        let mut cache = GlyphCache::new();

        for i in 0..CGRAM_SLOTS as u8 {
            let slot = cache.allocate(&mut link, &pattern(i + 1)).unwrap();
            assert_eq!(slot, Some(i));
        }
        assert_eq!(cache.in_use(), CGRAM_SLOTS);
    }

    #[test]
    fn test_resolve_within_frame() {
        let bus = RecordingBus::new();
        let mut link = NibbleBus::new(&bus, NoopDelay).unwrap();
        let mut cache = GlyphCache::new();

        let glyph = pattern(0x15);
        assert_eq!(cache.resolve(&glyph), None);
        cache.allocate(&mut link, &glyph).unwrap();
        assert_eq!(cache.resolve(&glyph), Some(0));

        // A different pattern is not a near-match
        assert_eq!(cache.resolve(&pattern(0x14)), None);
    }

    #[test]
    fn test_exhaustion_counts_fallbacks() {
        let bus = RecordingBus::new();
        let mut link = NibbleBus::new(&bus, NoopDelay).unwrap();
        let mut cache = GlyphCache::new();

        for i in 0..CGRAM_SLOTS as u8 {
            cache.allocate(&mut link, &pattern(i + 1)).unwrap();
        }
        bus.clear();

        let spill = cache.allocate(&mut link, &pattern(0x1E)).unwrap();
        assert_eq!(spill, None);
        assert_eq!(cache.fallback_count(), 1);
        // Exhaustion issues no bus traffic
        assert!(bus.raw().is_empty());
    }

    #[test]
    fn test_reset_clears_slots_but_keeps_counter() {
        let bus = RecordingBus::new();
        let mut link = NibbleBus::new(&bus, NoopDelay).unwrap();
        let mut cache = GlyphCache::new();

        for i in 0..=CGRAM_SLOTS as u8 {
            cache.allocate(&mut link, &pattern(i + 1)).unwrap();
        }
        assert_eq!(cache.fallback_count(), 1);

        cache.reset();
        assert_eq!(cache.in_use(), 0);
        assert_eq!(cache.resolve(&pattern(1)), None);
        assert_eq!(cache.fallback_count(), 1);

        // First allocation after reset reuses slot 0
        assert_eq!(cache.allocate(&mut link, &pattern(9)).unwrap(), Some(0));
    }
}
