//! 4-bit nibble link to the controller
//!
//! In 4-bit mode the controller receives each logical byte as two nibble
//! transfers on the upper data lines, high nibble strictly first - the
//! reversed order yields a corrupted command on real hardware. Each
//! nibble transfer asserts the data lines plus the register-select bit,
//! then pulses the enable line high and low again with the mandated
//! minimum timings.
//!
//! Constructing a [`NibbleBus`] runs the mode-switch preamble: the
//! controller's power-on state is unknown (it may already be in 4-bit
//! mode from a previous run), so the "function set 8-bit" nibble is sent
//! three times to converge it into 8-bit mode before 4-bit mode is
//! committed. Only after that preamble are two-nibble logical writes
//! meaningful.

use charcell_hal::ByteBus;
use embedded_hal::delay::DelayNs;

use crate::cmd;

/// Enable pulse width in microseconds (datasheet minimum is 450ns)
pub const ENABLE_PULSE_US: u32 = 5;

/// Settle after driving the bus lines
pub const BUS_SETTLE_US: u32 = 100;

/// Settle after a completed logical command
pub const COMMAND_SETTLE_US: u32 = 60;

/// Spacing between mode-switch nibbles during the init preamble
pub const MODE_SWITCH_US: u32 = 2;

/// Settle after the clear command issued during initialization
pub const INIT_CLEAR_US: u32 = 4000;

/// Settle after the clear command in steady state
pub const CLEAR_SETTLE_US: u32 = 2000;

/// Settle after return-home
pub const HOME_SETTLE_US: u32 = 2000;

/// Stabilization before a bulk CGRAM preload burst
pub const CGRAM_PRELOAD_US: u32 = 10_000;

/// Register select for a logical write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Instruction register (RS low)
    Command,
    /// Data register (RS high) - DDRAM/CGRAM contents
    Character,
}

impl Mode {
    const fn rs_bits(self) -> u8 {
        match self {
            Mode::Command => 0,
            Mode::Character => cmd::RS,
        }
    }
}

/// The 4-bit link: a byte bus plus the controller's timing rules
pub struct NibbleBus<B, D> {
    bus: B,
    delay: D,
}

impl<B, D> NibbleBus<B, D>
where
    B: ByteBus,
    D: DelayNs,
{
    /// Take ownership of the bus and run the 4-bit mode preamble
    ///
    /// A bus failure here is fatal; the controller state is unknown and
    /// the link must not be used.
    pub fn new(bus: B, delay: D) -> Result<Self, B::Error> {
        let mut link = Self { bus, delay };

        // Flush the expander lines to a known-low state
        for _ in 0..4 {
            link.write_nibble(0x00)?;
        }
        link.delay.delay_us(MODE_SWITCH_US);

        // Converge into 8-bit mode regardless of power-on state; sent
        // three times in case the controller woke up mid-nibble
        for _ in 0..3 {
            link.write_nibble(0x03)?;
            link.delay.delay_us(MODE_SWITCH_US);
        }

        // Commit 4-bit mode; from here every command is two nibbles
        link.write_nibble(0x02)?;
        link.delay.delay_us(COMMAND_SETTLE_US);

        Ok(link)
    }

    /// Write one logical byte as two nibble transfers, high nibble first
    pub fn write(&mut self, byte: u8, mode: Mode) -> Result<(), B::Error> {
        let rs = mode.rs_bits();
        self.write_nibble(rs | (byte & 0xF0))?;
        self.write_nibble(rs | (byte << 4))?;
        Ok(())
    }

    /// Block for `us` microseconds (command-specific settle times)
    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Release the bus and delay instances
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Assert `bits` on the bus lines and clock them in with an E pulse
    fn write_nibble(&mut self, bits: u8) -> Result<(), B::Error> {
        self.bus.write_byte(bits)?;
        self.delay.delay_us(BUS_SETTLE_US);
        self.pulse_enable(bits)
    }

    fn pulse_enable(&mut self, bits: u8) -> Result<(), B::Error> {
        self.bus.write_byte(bits | cmd::EN)?;
        self.delay.delay_us(ENABLE_PULSE_US);
        self.bus.write_byte(bits & !cmd::EN)?;
        self.delay.delay_us(ENABLE_PULSE_US);
        Ok(())
    }
}
