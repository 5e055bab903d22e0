//! Default 7-segment font for TM1638 display boards.
//!
//! Segment layout (bit 7 is the decimal point):
//!
//! ```text
//!    --a--
//!   |     |
//!   f     b
//!   |     |
//!    --g--
//!   |     |
//!   e     c
//!   |     |
//!    --d--  .dp
//! ```

use crate::CharacterFont;

const SEG_A: u8 = 0b_0000_0001;
const SEG_B: u8 = 0b_0000_0010;
const SEG_C: u8 = 0b_0000_0100;
const SEG_D: u8 = 0b_0000_1000;
const SEG_E: u8 = 0b_0001_0000;
const SEG_F: u8 = 0b_0010_0000;
const SEG_G: u8 = 0b_0100_0000;
const SEG_DP: u8 = 0b_1000_0000;

/// The font shipped with the boards: digits, most Latin letters (in the case
/// that reads best on seven segments) and a handful of symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tm1638Font;

impl Tm1638Font {
    /// Look up the glyph for `c`.
    pub const fn lookup(c: char) -> Option<u8> {
        let bits = match c {
            ' ' => 0,
            '0' | 'O' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
            '1' | 'I' => SEG_B | SEG_C,
            '2' | 'Z' | 'z' => SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
            '3' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
            '4' => SEG_B | SEG_C | SEG_F | SEG_G,
            '5' | 'S' | 's' => SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
            '6' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
            '7' => SEG_A | SEG_B | SEG_C,
            '8' | 'B' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
            '9' | 'g' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
            'A' | 'a' => SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
            'b' => SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
            'C' => SEG_A | SEG_D | SEG_E | SEG_F,
            'c' => SEG_D | SEG_E | SEG_G,
            'D' | 'd' => SEG_B | SEG_C | SEG_D | SEG_E | SEG_G,
            'E' | 'e' => SEG_A | SEG_D | SEG_E | SEG_F | SEG_G,
            'F' | 'f' => SEG_A | SEG_E | SEG_F | SEG_G,
            'G' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_F,
            'H' => SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
            'h' => SEG_C | SEG_E | SEG_F | SEG_G,
            'i' => SEG_C,
            'J' | 'j' => SEG_B | SEG_C | SEG_D | SEG_E,
            'L' | 'l' => SEG_D | SEG_E | SEG_F,
            'N' | 'n' => SEG_C | SEG_E | SEG_G,
            'o' => SEG_C | SEG_D | SEG_E | SEG_G,
            'P' | 'p' => SEG_A | SEG_B | SEG_E | SEG_F | SEG_G,
            'q' => SEG_A | SEG_B | SEG_C | SEG_F | SEG_G,
            'R' | 'r' => SEG_E | SEG_G,
            't' => SEG_D | SEG_E | SEG_F | SEG_G,
            'U' => SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
            'u' | 'v' => SEG_C | SEG_D | SEG_E,
            'Y' | 'y' => SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
            '-' => SEG_G,
            '_' => SEG_D,
            '=' => SEG_D | SEG_G,
            '.' => SEG_DP,
            '!' => SEG_B | SEG_C | SEG_DP,
            '"' => SEG_B | SEG_F,
            '\'' => SEG_F,
            '(' | '[' => SEG_A | SEG_D | SEG_E | SEG_F,
            ')' | ']' => SEG_A | SEG_B | SEG_C | SEG_D,
            '?' => SEG_A | SEG_B | SEG_E | SEG_G | SEG_DP,
            '°' => SEG_A | SEG_B | SEG_F | SEG_G,
            _ => return None,
        };
        Some(bits)
    }
}

impl CharacterFont for Tm1638Font {
    #[inline]
    fn glyph(&self, c: char) -> Option<u8> {
        Self::lookup(c)
    }
}
