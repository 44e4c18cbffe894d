//! Charcell Hardware Abstraction Layer
//!
//! This crate defines the bus transport abstraction used by the Charcell
//! display drivers. Character-cell controllers of the HD44780 family are
//! typically reached through a narrow bus - an I2C port expander whose
//! eight output lines carry the controller's 4-bit data bus plus the
//! RS/RW/E control signals. The driver only ever needs to place one byte
//! on those lines at a time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Display driver (charcell-hd44780)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  charcell-hal (this crate - ByteBus)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  I2cByteBus   │       │  test mocks   │
//! │ (expander)    │       │  (recording)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! Timing is not part of this crate: drivers take an
//! [`embedded_hal::delay::DelayNs`] alongside the bus so settle delays can
//! be faked out in host tests.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;

// Re-export key traits at crate root for convenience
pub use bus::{BusConfig, ByteBus, I2cByteBus};
