//! Shared fixtures for host-run driver tests

use core::cell::RefCell;

use charcell_hal::ByteBus;
use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::cmd;

/// Raw transaction log capacity (a full-frame render plus headroom)
pub const LOG_CAPACITY: usize = 8192;

/// Bus that records every byte placed on it
///
/// Interior mutability lets tests inspect and clear the log while the
/// driver still borrows the bus.
#[derive(Default)]
pub struct RecordingBus {
    writes: RefCell<Vec<u8, LOG_CAPACITY>>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far
    pub fn clear(&self) {
        self.writes.borrow_mut().clear();
    }

    /// Copy of the raw transaction stream
    pub fn raw(&self) -> Vec<u8, LOG_CAPACITY> {
        self.writes.borrow().clone()
    }

    /// Reassemble logical `(byte, character_mode)` writes from the log
    ///
    /// Only valid for logs captured after the 4-bit preamble, where every
    /// nibble is three transactions and nibbles pair up high-first.
    pub fn logical(&self) -> Vec<(u8, bool), 1024> {
        decode_logical(&self.writes.borrow())
    }
}

/// Decode a raw post-preamble transaction stream into logical writes
pub fn decode_logical(raw: &[u8]) -> Vec<(u8, bool), 1024> {
    let mut nibbles: Vec<u8, 2048> = Vec::new();
    for chunk in raw.chunks(3) {
        // chunk = [assert, assert|EN, assert]; the first byte carries
        // the nibble and RS bits
        nibbles.push(chunk[0]).unwrap();
    }

    let mut out = Vec::new();
    for pair in nibbles.chunks(2) {
        let (hi, lo) = (pair[0], pair[1]);
        let byte = (hi & 0xF0) | (lo >> 4);
        out.push((byte, hi & cmd::RS != 0)).unwrap();
    }
    out
}

/// Pair each DDRAM address command with the character written at it
///
/// CGRAM upload rows are character-mode writes too, so tests that care
/// about what landed in which cell should go through this instead of
/// filtering on the RS bit.
pub fn cell_writes(logical: &[(u8, bool)]) -> Vec<(u8, u8), 128> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < logical.len() {
        let (byte, rs) = logical[i];
        if !rs && byte & cmd::SET_DDRAM_ADDR != 0 {
            if let Some(&(data, true)) = logical.get(i + 1) {
                out.push((byte & 0x7F, data)).unwrap();
                i += 2;
                continue;
            }
        }
        i += 1;
    }
    out
}

impl ByteBus for &RecordingBus {
    type Error = core::convert::Infallible;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.writes.borrow_mut().push(byte).unwrap();
        Ok(())
    }
}

/// Delay that completes immediately
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
