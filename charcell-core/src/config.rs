//! Display configuration
//!
//! Geometry is expressed in pixels; the character grid is derived from the
//! fixed 5x8 cell size. Defaults match the reference hardware, a 2-line
//! 16-character OLED module on an I2C expander backpack.

use crate::glyph::{CELL_HEIGHT, CELL_WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display geometry and bus parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Display height in pixels
    pub rows: u16,
    /// Display width in pixels
    pub cols: u16,
    /// Bus device address
    pub bus_address: u8,
    /// Bus channel/port number
    pub bus_port: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 80,
            bus_address: 0x3F,
            bus_port: 1,
        }
    }
}

impl DisplayConfig {
    /// Override the pixel height
    pub fn with_rows(mut self, rows: u16) -> Self {
        self.rows = rows;
        self
    }

    /// Override the pixel width
    pub fn with_cols(mut self, cols: u16) -> Self {
        self.cols = cols;
        self
    }

    /// Override the bus device address
    pub fn with_bus_address(mut self, address: u8) -> Self {
        self.bus_address = address;
        self
    }

    /// Override the bus channel/port
    pub fn with_bus_port(mut self, port: u8) -> Self {
        self.bus_port = port;
        self
    }

    /// Character rows the pixel height covers (excess pixels ignored)
    pub fn rows_cells(&self) -> u8 {
        (self.rows as usize / CELL_HEIGHT) as u8
    }

    /// Character columns the pixel width covers (excess pixels ignored)
    pub fn cols_cells(&self) -> u8 {
        (self.cols as usize / CELL_WIDTH) as u8
    }
}
