//! HD44780 character display driver
//!
//! Renders monochrome bitmaps onto HD44780-family controllers (including
//! the OLED variants such as the EA W204 series) reached over a byte-wide
//! bus in 4-bit mode. The display has no pixel addressing; instead, each
//! 5x8 cell of the incoming bitmap is matched against a font reverse
//! index, and cells with no matching glyph are spilled into the
//! controller's 8 programmable CGRAM slots. Once the slots run out, the
//! remaining unmatched cells of that frame degrade to a `?`.
//!
//! # Pipeline
//!
//! ```text
//! Bitmap ──cells──▶ FontTable ──miss──▶ GlyphCache ──full──▶ '?'
//!    │                  │                   │
//!    └── codepoint ◀────┴───────────────────┘
//!                       │
//!                  ROM translation
//!                       │
//!              NibbleBus (4-bit link)
//!                       │
//!                   ByteBus (I2C expander)
//! ```
//!
//! Everything is synchronous and blocking: the controller mandates settle
//! delays after every transaction, taken through an injected
//! [`embedded_hal::delay::DelayNs`] so host tests run without wall-clock
//! waits.

#![no_std]
#![deny(unsafe_code)]

pub mod cgram;
pub mod cmd;
pub mod driver;
pub mod protocol;
pub mod rom;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export key types at crate root for convenience
pub use cgram::{GlyphCache, CGRAM_SLOTS};
pub use driver::{Error, Hd44780};
pub use protocol::{Mode, NibbleBus};
