//! Byte-wide bus transport
//!
//! Provides the [`ByteBus`] trait the display drivers write through, plus
//! an adapter for I2C port expanders (PCF8574 and friends) which is how
//! these displays are usually wired up.

/// Single-byte bus transport
///
/// One call places one byte on the bus lines. For an expander-backed
/// HD44780 the byte carries the data nibble in the upper bits and the
/// RS/RW/E control signals in the lower bits; this trait does not care
/// about that layout, it only moves bytes.
pub trait ByteBus {
    /// Error type for bus transactions
    type Error;

    /// Drive the bus lines with `byte`
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

// Forwarding impls so drivers can borrow a bus instead of consuming it
impl<T: ByteBus + ?Sized> ByteBus for &mut T {
    type Error = T::Error;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        T::write_byte(self, byte)
    }
}

/// Bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// 7-bit device address on the bus
    pub address: u8,
    /// Bus channel/port number (e.g. `/dev/i2c-1` on a Pi)
    pub port: u8,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            address: 0x3F, // Common PCF8574A backpack address
            port: 1,
        }
    }
}

/// [`ByteBus`] over any [`embedded_hal::i2c::I2c`] implementation
///
/// Every byte becomes a single-byte I2C write to a fixed device address,
/// which is exactly what a PCF8574-style expander expects.
pub struct I2cByteBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cByteBus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Wrap an I2C instance targeting the device at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address this bus writes to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying I2C instance
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> ByteBus for I2cByteBus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Error = I2C::Error;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[byte])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bus_config() {
        let config = BusConfig::default();
        assert_eq!(config.address, 0x3F);
        assert_eq!(config.port, 1);
    }

    struct CountingBus {
        writes: u32,
        last: u8,
    }

    impl ByteBus for CountingBus {
        type Error = core::convert::Infallible;

        fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
            self.writes += 1;
            self.last = byte;
            Ok(())
        }
    }

    #[test]
    fn test_mut_ref_forwarding() {
        let mut bus = CountingBus { writes: 0, last: 0 };

        fn drive<B: ByteBus>(bus: &mut B) -> Result<(), B::Error> {
            bus.write_byte(0xA5)
        }

        drive(&mut (&mut bus)).unwrap();
        assert_eq!(bus.writes, 1);
        assert_eq!(bus.last, 0xA5);
    }
}
