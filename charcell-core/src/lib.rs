//! Board-agnostic types for character-cell display rendering
//!
//! This crate contains the data model shared by the Charcell display
//! drivers, with no dependency on any specific bus or controller:
//!
//! - [`Glyph`] - an immutable 5x8 pixel pattern in controller row format
//! - [`Bitmap`] - a packed monochrome frame buffer with cell extraction
//! - [`FontTable`] - exact-match reverse index from pattern to codepoint
//! - [`DisplayConfig`] - display geometry and bus parameters

#![no_std]
#![deny(unsafe_code)]

pub mod bitmap;
pub mod config;
pub mod font;
pub mod glyph;

pub use bitmap::Bitmap;
pub use config::DisplayConfig;
pub use font::{FontError, FontTable};
pub use glyph::{Glyph, CELL_HEIGHT, CELL_WIDTH};
