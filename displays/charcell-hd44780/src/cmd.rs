//! HD44780 command bytes and flag bits
//!
//! Exact values from the controller datasheet. A logical command is one
//! command byte OR'd with its flags; the `MODE_POWER_SET` register exists
//! only on the OLED variants of the controller family.

// Commands
pub const CLEAR_DISPLAY: u8 = 0x01;
pub const RETURN_HOME: u8 = 0x02;
pub const ENTRY_MODE_SET: u8 = 0x04;
pub const DISPLAY_CONTROL: u8 = 0x08;
pub const CURSOR_SHIFT: u8 = 0x10;
pub const MODE_POWER_SET: u8 = 0x13;
pub const FUNCTION_SET: u8 = 0x20;
pub const SET_CGRAM_ADDR: u8 = 0x40;
pub const SET_DDRAM_ADDR: u8 = 0x80;

// Flags for ENTRY_MODE_SET
pub const ENTRY_LEFT: u8 = 0x02;
pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;

// Flags for DISPLAY_CONTROL (off states are the cleared bits)
pub const DISPLAY_ON: u8 = 0x04;
pub const CURSOR_ON: u8 = 0x02;
pub const BLINK_ON: u8 = 0x01;

// Flags for MODE_POWER_SET (OLED variants)
pub const GRAPHIC_MODE: u8 = 0x08;
pub const CHARACTER_MODE: u8 = 0x00;
pub const INTERNAL_POWER_ON: u8 = 0x04;

// Flags for FUNCTION_SET
pub const MODE_8BIT: u8 = 0x10;
pub const MODE_4BIT: u8 = 0x00;
pub const LINES_2: u8 = 0x08;
pub const LINES_1: u8 = 0x00;
pub const DOTS_5X10: u8 = 0x04;
pub const DOTS_5X8: u8 = 0x00;
pub const FONT_ENG_JAP: u8 = 0x00;
pub const FONT_EUR1: u8 = 0x01;
pub const FONT_RUS: u8 = 0x02;
pub const FONT_EUR2: u8 = 0x03;

// Control line bits as wired on the bus expander
pub const EN: u8 = 0x04;
pub const RW: u8 = 0x02;
pub const RS: u8 = 0x01;
