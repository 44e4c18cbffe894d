//! Bitmap-to-character render engine
//!
//! [`Hd44780`] owns the 4-bit link, a font reverse index, the CGRAM
//! glyph cache and a shadow copy of the last rendered frame. Every public
//! call is self-contained: it runs to completion (including the mandated
//! settle delays) and leaves the controller ready for the next call.
//!
//! `update` re-renders the full frame rather than diffing against the
//! shadow buffer. The glyph cache is frame-scoped, so skipping cells
//! would leave stale slot assignments for anything outside the redrawn
//! region; a cell may only ever be skipped if its pattern requires no new
//! allocation, and that optimization is not implemented. The shadow
//! buffer is still kept current for callers that want to inspect what is
//! on the glass.

use charcell_core::{Bitmap, DisplayConfig, FontTable, Glyph, CELL_HEIGHT, CELL_WIDTH};
use charcell_hal::ByteBus;
use embedded_hal::delay::DelayNs;

use crate::cgram::{GlyphCache, CGRAM_SLOTS};
use crate::cmd;
use crate::protocol::{
    Mode, NibbleBus, CGRAM_PRELOAD_US, CLEAR_SETTLE_US, COMMAND_SETTLE_US, HOME_SETTLE_US,
    INIT_CLEAR_US,
};
use crate::rom;

/// DDRAM offset of each character row (controller wiring, not geometry)
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Native index written for cells that cannot be rendered ('?')
const FALLBACK_NATIVE: u8 = b'?';

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Cursor or message target outside the character grid
    OutOfRange,
    /// Not enough free CGRAM slots for a bulk preload
    CacheExhausted,
    /// Underlying bus transaction failed
    Bus(E),
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Bus(err)
    }
}

/// HD44780 render driver
///
/// One instance per physical display. Not safe for concurrent use: the
/// controller keeps persistent DDRAM/CGRAM address state, so callers
/// must serialize access externally.
pub struct Hd44780<B, D> {
    link: NibbleBus<B, D>,
    font: FontTable,
    cache: GlyphCache,
    shadow: Bitmap,
    cursor: (u8, u8),
    cols_cells: u8,
    rows_cells: u8,
    config: DisplayConfig,
}

impl<B, D> Hd44780<B, D>
where
    B: ByteBus,
    D: DelayNs,
{
    /// Bring the controller up and leave it ready for rendering
    ///
    /// Runs the 4-bit mode preamble followed by the full configuration
    /// sequence: function set, display off, entry mode, character
    /// mode/internal power, clear, home, display on. A bus failure at any
    /// point is fatal; the caller gets the error and no driver.
    pub fn new(
        bus: B,
        delay: D,
        config: DisplayConfig,
        font: FontTable,
    ) -> Result<Self, Error<B::Error>> {
        let mut link = NibbleBus::new(bus, delay)?;

        // 4-bit bus, 2 display lines, 5x8 cells, western-European ROM page
        link.write(
            cmd::FUNCTION_SET | cmd::MODE_4BIT | cmd::LINES_2 | cmd::DOTS_5X8 | cmd::FONT_EUR1,
            Mode::Command,
        )?;
        link.delay_us(COMMAND_SETTLE_US);

        // Display off while configuring
        link.write(cmd::DISPLAY_CONTROL, Mode::Command)?;
        link.delay_us(COMMAND_SETTLE_US);

        // Cursor increments left to right, no display shift
        link.write(cmd::ENTRY_MODE_SET | cmd::ENTRY_LEFT, Mode::Command)?;
        link.delay_us(COMMAND_SETTLE_US);

        // Character mode, internal power on (OLED variant register)
        link.write(
            cmd::MODE_POWER_SET | cmd::CHARACTER_MODE | cmd::INTERNAL_POWER_ON,
            Mode::Command,
        )?;
        link.delay_us(COMMAND_SETTLE_US);

        link.write(cmd::CLEAR_DISPLAY, Mode::Command)?;
        link.delay_us(INIT_CLEAR_US);

        link.write(cmd::RETURN_HOME, Mode::Command)?;
        link.delay_us(HOME_SETTLE_US);

        link.write(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON, Mode::Command)?;
        link.delay_us(COMMAND_SETTLE_US);

        Ok(Self {
            link,
            font,
            cache: GlyphCache::new(),
            shadow: Bitmap::new(config.cols, config.rows),
            cursor: (0, 0),
            cols_cells: config.cols_cells(),
            rows_cells: config.rows_cells().min(ROW_OFFSETS.len() as u8),
            config,
        })
    }

    /// Render a bitmap so the display exactly reflects it
    ///
    /// The frame is cropped to the display geometry; each 5x8 cell is
    /// resolved to a font glyph, a CGRAM slot, or the fallback `?`, and
    /// written in row-major order. On success the shadow buffer holds the
    /// rendered frame.
    pub fn update(&mut self, frame: &Bitmap) -> Result<(), Error<B::Error>> {
        let frame = frame.crop(self.config.cols, self.config.rows);

        // Slot assignments are only meaningful within one frame
        self.cache.reset();

        for row in 0..self.rows_cells {
            for col in 0..self.cols_cells {
                let glyph = frame.glyph_at(
                    u16::from(col) * CELL_WIDTH as u16,
                    u16::from(row) * CELL_HEIGHT as u16,
                );
                let native = self.resolve_cell(&glyph)?;
                self.set_cursor(col, row)?;
                self.link.write(native, Mode::Character)?;
            }
        }

        self.shadow = frame;
        self.set_cursor(0, 0)?;

        // Some controllers drop display-on during heavy write bursts
        self.link
            .write(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON, Mode::Command)?;
        Ok(())
    }

    /// Move the write position to a character cell
    ///
    /// Rejects out-of-grid targets before touching the bus. The bound is
    /// strictly exclusive on both axes.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Error<B::Error>> {
        if col >= self.cols_cells || row >= self.rows_cells {
            return Err(Error::OutOfRange);
        }

        self.link.write(
            cmd::SET_DDRAM_ADDR | (ROW_OFFSETS[row as usize] + col),
            Mode::Command,
        )?;
        self.cursor = (col, row);
        Ok(())
    }

    /// Blank the display and the shadow buffer
    pub fn clear(&mut self) -> Result<(), Error<B::Error>> {
        self.set_cursor(0, 0)?;
        self.shadow.clear();

        self.link.write(cmd::CLEAR_DISPLAY, Mode::Command)?;
        // Clearing is slow on real hardware
        self.link.delay_us(CLEAR_SETTLE_US);
        Ok(())
    }

    /// Write a text string starting at a character cell
    ///
    /// `\n` moves to column 0 of the next row, clamped at the bottom row.
    /// Codepoints above 255 and codepoints the ROM cannot draw render as
    /// spaces.
    pub fn message(&mut self, text: &str, row: u8, col: u8) -> Result<(), Error<B::Error>> {
        if col >= self.cols_cells || row >= self.rows_cells {
            return Err(Error::OutOfRange);
        }
        self.set_cursor(col, row)?;

        for ch in text.chars() {
            if ch == '\n' {
                let next = (self.cursor.1 + 1).min(self.rows_cells - 1);
                self.set_cursor(0, next)?;
                continue;
            }

            let codepoint = match u32::from(ch) {
                cp if cp > 255 => b' ',
                cp => cp as u8,
            };
            let native = rom::native_index(codepoint).unwrap_or(b' ');
            self.link.write(native, Mode::Character)?;
        }
        Ok(())
    }

    /// Bulk-preload glyphs into CGRAM starting at `start_slot`
    ///
    /// This bypasses the per-frame cache entirely; it is meant for
    /// callers that manage a fixed set of symbols themselves. Fails with
    /// [`Error::CacheExhausted`] when the glyphs do not fit in the
    /// remaining slots, without writing anything.
    pub fn load_custom_chars(
        &mut self,
        start_slot: u8,
        glyphs: &[Glyph],
    ) -> Result<(), Error<B::Error>> {
        if start_slot as usize + glyphs.len() > CGRAM_SLOTS {
            return Err(Error::CacheExhausted);
        }

        self.link
            .write(cmd::SET_CGRAM_ADDR | (start_slot * 8), Mode::Command)?;
        // The module needs a moment before a burst of CGRAM writes
        self.link.delay_us(CGRAM_PRELOAD_US);

        for glyph in glyphs {
            for row in glyph.rows() {
                self.link.write(row, Mode::Character)?;
            }
        }
        Ok(())
    }

    /// No-op hook for symmetry with other display backends
    pub fn cleanup(&mut self) {}

    /// Display configuration this driver was built with
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Last successfully rendered frame
    pub fn shadow(&self) -> &Bitmap {
        &self.shadow
    }

    /// Current cursor cell as `(col, row)`
    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// CGRAM slots used by the most recent frame
    pub fn custom_in_use(&self) -> usize {
        self.cache.in_use()
    }

    /// Total fallback-glyph substitutions since construction
    pub fn fallback_count(&self) -> u32 {
        self.cache.fallback_count()
    }

    /// Tear the driver down and reclaim the bus and delay instances
    pub fn release(self) -> (B, D) {
        self.link.release()
    }

    /// Resolve one cell to the native index to write at its position
    ///
    /// Font reverse index first; a hit still goes through ROM translation
    /// and an unsupported codepoint falls through to the custom-glyph
    /// path, exactly like a miss.
    fn resolve_cell(&mut self, glyph: &Glyph) -> Result<u8, Error<B::Error>> {
        if let Some(native) = self.font.lookup(glyph).and_then(rom::native_index) {
            return Ok(native);
        }

        if let Some(slot) = self.cache.resolve(glyph) {
            return Ok(slot);
        }

        match self.cache.allocate(&mut self.link, glyph)? {
            // CGRAM slot codepoints 0-7 translate to themselves
            Some(slot) => Ok(slot),
            None => Ok(FALLBACK_NATIVE),
        }
    }
}
