//! Character-ROM translation
//!
//! The controller's character generator ROM (western-European page) does
//! not line up with Latin-1: a handful of codepoints sit at different
//! native indices and many are simply absent. This table maps an input
//! codepoint to the ROM index that actually draws it; `-1` marks an
//! unsupported codepoint, which forces the caller down the custom-glyph
//! path instead of emitting garbage.
//!
//! Indices 0-7 are the CGRAM slots and map to themselves, so cache
//! codepoints pass through translation unchanged.

/// Marker for codepoints the ROM cannot draw
const UNSUPPORTED: i16 = -1;

#[rustfmt::skip]
const CHARACTER_ROM: [i16; 256] = [
      0,  1,  2,  3,  4,  5,  6,  7,255, -1, -1, -1, -1, -1, -1, -1, //   0
     -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //  16
     32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, //  32
     48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, //  48
     64, 65, 66, 67, 68, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79, //  64
     80, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 97, 93, 94, 95, //  80
     96, 97, 98, 99,100,101,102,103,104,105,106,107,108,109,110,111, //  96
    112,113,114,115,116,117,118,119,120,121,122, -1,124,125,126,127, // 112
     -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, // 128
     -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, // 144
     32,234,236,237, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, // 160
    223, -1, -1, -1, -1,228, -1,176, -1, -1, -1, -1, -1, -1, -1, -1, // 176
     -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, // 192
     -1, 78, -1, -1, -1, -1, -1,235, -1, -1, -1, -1, -1, -1, -1,226, // 208
     -1, -1, -1, -1,225, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, // 224
     -1,238, -1, -1, -1, -1,239,253, -1, -1, -1, -1,245, -1, -1, -1, // 240
];

/// Native ROM index drawing `codepoint`, or `None` if unsupported
pub fn native_index(codepoint: u8) -> Option<u8> {
    match CHARACTER_ROM[codepoint as usize] {
        UNSUPPORTED => None,
        native => Some(native as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_ascii_is_identity() {
        for cp in 32..=90u8 {
            assert_eq!(native_index(cp), Some(cp));
        }
        assert_eq!(native_index(b'a'), Some(b'a'));
        assert_eq!(native_index(b'~'), Some(b'~'));
    }

    #[test]
    fn test_cgram_slots_pass_through() {
        for slot in 0..8u8 {
            assert_eq!(native_index(slot), Some(slot));
        }
    }

    #[test]
    fn test_remapped_codepoints() {
        // Backslash is absent from the ROM page
        assert_eq!(native_index(92), Some(97));
        // N-tilde draws as plain N
        assert_eq!(native_index(209), Some(78));
        // Degree sign and division sign live at ROM-specific indices
        assert_eq!(native_index(176), Some(223));
        assert_eq!(native_index(247), Some(253));
    }

    #[test]
    fn test_unsupported_is_none() {
        assert_eq!(native_index(b'{'), None);
        assert_eq!(native_index(9), None);
        assert_eq!(native_index(128), None);
        assert_eq!(native_index(255), None);
    }
}
