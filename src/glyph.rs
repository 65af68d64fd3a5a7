//! The character glyph table.
//!
//! Each glyph is an 8-bit pattern where bit *i* lights logical segment *i* of a
//! character position. Bits 0..=6 are the familiar seven-segment strokes A..=G;
//! bit 7 is the extra stroke this glass adds (used by letters such as `I`, `K`,
//! `M`, `T`, and `W`). Which physical segment a logical segment lands on is a
//! property of the position, see [`PositionRoute`](crate::panel::PositionRoute).

use crate::{Error, Result};

/// First character with a glyph (space).
pub const FIRST_CHARACTER: char = ' ';

/// Last character with a glyph (tilde).
pub const LAST_CHARACTER: char = '~';

/// Number of glyphs, one per printable ASCII character.
pub const GLYPH_COUNT: usize = 95;

/// Logical segment bits of a character position.
pub struct Segments;

impl Segments {
    /// Top stroke.
    pub const SEG_A: u8 = 0b_0000_0001;
    /// Upper right stroke.
    pub const SEG_B: u8 = 0b_0000_0010;
    /// Lower right stroke.
    pub const SEG_C: u8 = 0b_0000_0100;
    /// Bottom stroke.
    pub const SEG_D: u8 = 0b_0000_1000;
    /// Lower left stroke.
    pub const SEG_E: u8 = 0b_0001_0000;
    /// Upper left stroke.
    pub const SEG_F: u8 = 0b_0010_0000;
    /// Middle stroke.
    pub const SEG_G: u8 = 0b_0100_0000;
    /// Extra stroke.
    pub const SEG_H: u8 = 0b_1000_0000;

    /// Blank position.
    pub const SPACE: u8 = 0b_0000_0000;
}

/// Glyphs for `' '..='~'`, indexed by `character - 0x20`.
///
/// `#` cannot be drawn on seven strokes, so its slot holds a degree sign for
/// temperature read-outs.
pub const GLYPHS: [u8; GLYPH_COUNT] = [
    0b_0000_0000, // space
    0b_0000_0000, // !
    0b_0010_0010, // "
    0b_0110_0011, // # (drawn as a degree sign)
    0b_0000_0000, // $
    0b_0000_0000, // %
    0b_0100_0100, // &
    0b_0010_0000, // '
    0b_0000_0000, // (
    0b_0000_0000, // )
    0b_0000_0000, // *
    0b_1100_0000, // +
    0b_0001_0000, // ,
    0b_0100_0000, // -
    0b_0000_0100, // .
    0b_0001_0010, // /
    0b_0011_1111, // 0
    0b_0000_0110, // 1
    0b_0101_1011, // 2
    0b_0100_1111, // 3
    0b_0110_0110, // 4
    0b_0110_1101, // 5
    0b_0111_1101, // 6
    0b_0000_0111, // 7
    0b_0111_1111, // 8
    0b_0110_1111, // 9
    0b_0000_0000, // :
    0b_0000_0000, // ;
    0b_0101_1000, // <
    0b_0100_1000, // =
    0b_0100_1100, // >
    0b_0101_0011, // ?
    0b_1111_1111, // @
    0b_0111_0111, // A
    0b_0111_1111, // B
    0b_0011_1001, // C
    0b_0011_1111, // D
    0b_0111_1001, // E
    0b_0111_0001, // F
    0b_0011_1101, // G
    0b_0111_0110, // H
    0b_1000_1001, // I
    0b_0000_1110, // J
    0b_1110_1010, // K
    0b_0011_1000, // L
    0b_1011_0111, // M
    0b_0011_0111, // N
    0b_0011_1111, // O
    0b_0111_0011, // P
    0b_0110_0111, // Q
    0b_1111_0111, // R
    0b_0110_1101, // S
    0b_1000_0001, // T
    0b_0011_1110, // U
    0b_0011_1110, // V
    0b_1011_1110, // W
    0b_0111_1110, // X
    0b_0110_1110, // Y
    0b_0001_1011, // Z
    0b_0011_1001, // [
    0b_0010_0100, // backslash
    0b_0000_1111, // ]
    0b_0010_0110, // ^
    0b_0000_1000, // _
    0b_0000_0010, // `
    0b_0101_1111, // a
    0b_0111_1100, // b
    0b_0101_1000, // c
    0b_0101_1110, // d
    0b_0111_1011, // e
    0b_0111_0001, // f
    0b_0110_1111, // g
    0b_0111_0100, // h
    0b_0001_0000, // i
    0b_0100_0010, // j
    0b_1110_1010, // k
    0b_0011_0000, // l
    0b_1011_0111, // m
    0b_0101_0100, // n
    0b_0101_1100, // o
    0b_0111_0011, // p
    0b_0110_0111, // q
    0b_0101_0000, // r
    0b_0110_1101, // s
    0b_0111_1000, // t
    0b_0110_0010, // u
    0b_0110_0010, // v
    0b_1011_1110, // w
    0b_0111_1110, // x
    0b_0110_1110, // y
    0b_0001_1011, // z
    0b_0011_1001, // {
    0b_0011_0000, // |
    0b_0000_1111, // }
    0b_0000_0001, // ~
];

/// Returns the segment pattern for `character`.
///
/// # Errors
///
/// Returns [`Error::OutOfRangeCharacter`] for anything outside printable ASCII.
pub fn glyph_of(character: char) -> Result<u8> {
    u32::from(character)
        .checked_sub(u32::from(FIRST_CHARACTER))
        .and_then(|offset| usize::try_from(offset).ok())
        .and_then(|index| GLYPHS.get(index))
        .copied()
        .ok_or(Error::OutOfRangeCharacter(character))
}

/// Returns `true` if `character` has a glyph.
#[must_use]
pub const fn is_printable(character: char) -> bool {
    matches!(character, FIRST_CHARACTER..=LAST_CHARACTER)
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_printable_ascii() {
        assert_eq!(
            u32::from(LAST_CHARACTER) - u32::from(FIRST_CHARACTER) + 1,
            GLYPH_COUNT as u32
        );
        for character in FIRST_CHARACTER..=LAST_CHARACTER {
            assert!(glyph_of(character).is_ok(), "missing glyph for {character:?}");
            assert!(is_printable(character));
        }
    }

    #[test]
    fn test_out_of_range_characters() {
        assert_eq!(glyph_of('\u{1}'), Err(Error::OutOfRangeCharacter('\u{1}')));
        assert_eq!(glyph_of('\u{7f}'), Err(Error::OutOfRangeCharacter('\u{7f}')));
        assert_eq!(glyph_of('é'), Err(Error::OutOfRangeCharacter('é')));
        assert!(!is_printable('\n'));
    }

    #[test]
    fn test_digits() {
        let zero = Segments::SEG_A
            | Segments::SEG_B
            | Segments::SEG_C
            | Segments::SEG_D
            | Segments::SEG_E
            | Segments::SEG_F;
        assert_eq!(glyph_of('0'), Ok(zero));
        assert_eq!(glyph_of('0').map(|bits| bits & Segments::SEG_G), Ok(0));
        assert_eq!(glyph_of('1'), Ok(Segments::SEG_B | Segments::SEG_C));
        assert_eq!(
            glyph_of('7'),
            Ok(Segments::SEG_A | Segments::SEG_B | Segments::SEG_C)
        );
        assert_eq!(glyph_of('8'), Ok(0b_0111_1111));
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(glyph_of(' '), Ok(Segments::SPACE));
        assert_eq!(glyph_of('-'), Ok(Segments::SEG_G));
        assert_eq!(glyph_of('_'), Ok(Segments::SEG_D));
        assert_eq!(glyph_of('&'), Ok(Segments::SEG_C | Segments::SEG_G));
        assert_eq!(
            glyph_of('#'),
            Ok(Segments::SEG_A | Segments::SEG_B | Segments::SEG_F | Segments::SEG_G)
        );
        assert_eq!(glyph_of('K'), Ok(0b_1110_1010));
        assert_eq!(glyph_of('@'), Ok(0b_1111_1111));
    }
}
