//! Board state as delivered by the backend.
//!
//! A snapshot is authoritative and complete: the client never edits one,
//! it only swaps the whole value for the next delivery.

use serde::{Deserialize, Serialize};

use super::coord::Square;
use super::piece::{Piece, PieceColor};

/// A full description of the board at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// 64 entries, indexed by square offset.
    pub pieces: Vec<Option<Piece>>,
    pub turn: PieceColor,
    pub white_checked: bool,
    pub black_checked: bool,
    #[serde(default)]
    pub winner: Option<PieceColor>,
}

impl BoardSnapshot {
    /// Resolve the piece on a square through the offset mapping.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(square.offset()).copied().flatten()
    }

    pub fn checked(&self, color: PieceColor) -> bool {
        match color {
            PieceColor::White => self.white_checked,
            PieceColor::Black => self.black_checked,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

/// A backend-certified move. Submitted back verbatim when the user picks
/// its destination; the client never builds one itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// The occupied square this move clears, when it captures. Usually
    /// `to`, but distinct for en passant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<Square>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::piece::PieceKind;

    fn payload() -> String {
        // Shape of a real backend delivery: a 64-element array with piece
        // names, plus metadata in camelCase.
        let mut cells = vec!["null".to_string(); 64];
        cells[0] = "\"WhiteRook\"".to_string();
        cells[12] = "\"WhitePawn\"".to_string();
        cells[60] = "\"BlackKing\"".to_string();
        format!(
            "{{\"pieces\":[{}],\"turn\":\"Black\",\"whiteChecked\":false,\"blackChecked\":true,\"winner\":null}}",
            cells.join(",")
        )
    }

    #[test]
    fn deserializes_wire_payload() {
        let snapshot: BoardSnapshot = serde_json::from_str(&payload()).unwrap();

        assert_eq!(PieceColor::Black, snapshot.turn);
        assert!(!snapshot.white_checked);
        assert!(snapshot.black_checked);
        assert!(snapshot.checked(PieceColor::Black));
        assert_eq!(None, snapshot.winner);
        assert!(!snapshot.is_over());
    }

    #[test]
    fn piece_at_goes_through_offsets() {
        let snapshot: BoardSnapshot = serde_json::from_str(&payload()).unwrap();

        assert_eq!(
            Some(Piece::new(PieceColor::White, PieceKind::Rook)),
            snapshot.piece_at(Square::from_label("a1").unwrap())
        );
        assert_eq!(
            Some(Piece::new(PieceColor::White, PieceKind::Pawn)),
            snapshot.piece_at(Square::from_label("e2").unwrap())
        );
        assert_eq!(
            Some(Piece::new(PieceColor::Black, PieceKind::King)),
            snapshot.piece_at(Square::from_label("e8").unwrap())
        );
        assert_eq!(None, snapshot.piece_at(Square::from_label("d4").unwrap()));
    }

    #[test]
    fn missing_winner_field_defaults_to_none() {
        let json = payload().replace(",\"winner\":null", "");
        let snapshot: BoardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(None, snapshot.winner);
    }

    #[test]
    fn move_serde() {
        let mv = Move {
            from: Square::from_label("e2").unwrap(),
            to: Square::from_label("e4").unwrap(),
            capture: None,
        };
        assert_eq!(
            "{\"from\":\"e2\",\"to\":\"e4\"}",
            serde_json::to_string(&mv).unwrap()
        );

        let parsed: Move =
            serde_json::from_str("{\"from\":\"d5\",\"to\":\"e6\",\"capture\":\"e5\"}").unwrap();
        assert_eq!(Square::from_label("e5"), parsed.capture);
    }
}
