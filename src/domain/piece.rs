//! Piece identity.
//!
//! The backend names pieces with strings like "WhiteRook". Parsing and
//! formatting of that form happens here, at the serde boundary; everything
//! else works with the tagged values.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, de::Visitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn name(&self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: PieceColor,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Parse the wire form, e.g. "BlackKnight".
    pub fn from_name(name: &str) -> Option<Piece> {
        let (color, kind_name) = if let Some(rest) = name.strip_prefix("White") {
            (PieceColor::White, rest)
        } else if let Some(rest) = name.strip_prefix("Black") {
            (PieceColor::Black, rest)
        } else {
            return None;
        };

        let kind = match kind_name {
            "Pawn" => PieceKind::Pawn,
            "Rook" => PieceKind::Rook,
            "Knight" => PieceKind::Knight,
            "Bishop" => PieceKind::Bishop,
            "Queen" => PieceKind::Queen,
            "King" => PieceKind::King,
            _ => return None,
        };

        Some(Piece::new(color, kind))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.color.name())?;
        f.write_str(self.kind.name())
    }
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

struct PieceVisitor;

impl<'de> Visitor<'de> for PieceVisitor {
    type Value = Piece;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a piece name in the form '{color}{kind}' (e.g. 'WhiteRook')")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Piece::from_name(v)
            .ok_or_else(|| serde::de::Error::invalid_value(serde::de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(PieceVisitor)
    }
}
