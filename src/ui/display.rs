//! Render-model generation for the board grid.
//!
//! Transforms a snapshot plus the current selection into display-ready
//! rows: rank 8 first for top-to-bottom drawing, files a..h within each
//! row. Piece resolution always goes through the square's offset mapping;
//! a raw sequence index is never treated as a visual position.

use crate::domain::{BoardSnapshot, Move, SelectionState, Square};
use crate::ui::view_models::{RenderRow, RenderSquare};

/// Build the full 8×8 grid for one render pass.
pub fn build_grid(snapshot: &BoardSnapshot, selection: &SelectionState) -> Vec<RenderRow> {
    let (origin, candidates): (Option<Square>, &[Move]) = match selection {
        SelectionState::Idle => (None, &[]),
        SelectionState::Selected { origin, candidates } => (Some(*origin), candidates),
    };

    (0..8u8)
        .rev()
        .map(|y| RenderRow {
            rank: y + 1,
            squares: (0..8u8)
                .map(|x| {
                    let square = Square::from_xy(x, y);
                    let candidate = candidates.iter().find(|mv| mv.to == square);
                    RenderSquare {
                        square,
                        piece: snapshot.piece_at(square),
                        selected: origin == Some(square),
                        candidate: candidate.is_some(),
                        captures: candidate.is_some_and(|mv| mv.capture.is_some()),
                    }
                })
                .collect(),
        })
        .collect()
}
