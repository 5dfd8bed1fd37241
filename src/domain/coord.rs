//! Board coordinates.
//!
//! A square is stored as a linear offset in rank-major order:
//! `offset = rank_index * 8 + file_index`, so a1 = 0, h1 = 7, a2 = 8 and
//! h8 = 63. This matches the backend's piece-array layout; every conversion
//! between offsets, (x, y) pairs and labels goes through this module.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, de::Visitor};

/// A square on the board, identified by its offset into the flat
/// 64-element piece array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Create a square from a flat array offset. Offsets outside 0..64 are
    /// a programming error; all offsets come from iterating the fixed
    /// ranges or from the trusted backend.
    pub fn from_offset(offset: usize) -> Square {
        debug_assert!(offset < Self::COUNT);
        Square(offset as u8)
    }

    /// Create a square from file and rank indices (both 0..8, a1 = (0, 0)).
    pub fn from_xy(x: u8, y: u8) -> Square {
        debug_assert!(x < 8 && y < 8);
        Square(y * 8 + x)
    }

    /// Parse a label like "e4". Returns `None` for anything outside a1..h8.
    pub fn from_label(label: &str) -> Option<Square> {
        let bytes = label.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        let file = bytes[0];
        let rank = bytes[1];

        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }

        Some(Square::from_xy(file - b'a', rank - b'1'))
    }

    pub fn offset(&self) -> usize {
        self.0 as usize
    }

    /// File and rank indices, both in 0..8.
    pub fn xy(&self) -> (u8, u8) {
        (self.0 % 8, self.0 / 8)
    }

    /// File letter 'a'..='h'.
    pub fn file_char(&self) -> char {
        (b'a' + self.0 % 8) as char
    }

    /// Rank digit 1..=8.
    pub fn rank_digit(&self) -> u8 {
        self.0 / 8 + 1
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_digit())
    }
}

impl Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

struct SquareVisitor;

impl<'de> Visitor<'de> for SquareVisitor {
    type Value = Square;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a square label in the form '{file}{rank}' (e.g. 'e4')")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Square::from_label(v)
            .ok_or_else(|| serde::de::Error::invalid_value(serde::de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(SquareVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_anchors() {
        assert_eq!(0, Square::from_label("a1").unwrap().offset());
        assert_eq!(7, Square::from_label("h1").unwrap().offset());
        assert_eq!(8, Square::from_label("a2").unwrap().offset());
        assert_eq!(21, Square::from_label("f3").unwrap().offset());
        assert_eq!(63, Square::from_label("h8").unwrap().offset());
    }

    #[test]
    fn offset_round_trip() {
        for offset in 0..Square::COUNT {
            let square = Square::from_offset(offset);
            assert_eq!(offset, square.offset());
            assert_eq!(Some(square), Square::from_label(&square.to_string()));
        }
    }

    #[test]
    fn xy_round_trip() {
        for x in 0..8 {
            for y in 0..8 {
                let square = Square::from_xy(x, y);
                assert_eq!((x, y), square.xy());
            }
        }
    }

    #[test]
    fn label_parts() {
        let e4 = Square::from_label("e4").unwrap();
        assert_eq!('e', e4.file_char());
        assert_eq!(4, e4.rank_digit());
        assert_eq!("e4", e4.to_string());
    }

    #[test]
    fn rejects_invalid_labels() {
        assert_eq!(None, Square::from_label(""));
        assert_eq!(None, Square::from_label("e"));
        assert_eq!(None, Square::from_label("e44"));
        assert_eq!(None, Square::from_label("i4"));
        assert_eq!(None, Square::from_label("e9"));
        assert_eq!(None, Square::from_label("E4"));
        assert_eq!(None, Square::from_label("44"));
    }

    #[test]
    fn serde_as_label() {
        let square = Square::from_label("c6").unwrap();
        assert_eq!("\"c6\"", serde_json::to_string(&square).unwrap());
        assert_eq!(square, serde_json::from_str::<Square>("\"c6\"").unwrap());
        assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
    }
}
