//! View models for rendering the board grid.
//!
//! These types are DTOs that prepare game state for display. They live in
//! the UI layer, not the domain layer, and are rebuilt on every render
//! pass, never mutated in place.

use crate::domain::{Piece, Square};

/// One drawable square of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSquare {
    pub square: Square,
    pub piece: Option<Piece>,
    /// This square is the current selection origin.
    pub selected: bool,
    /// A candidate move ends here.
    pub candidate: bool,
    /// The candidate ending here captures something.
    pub captures: bool,
}

/// One displayed rank: 8 squares in file order a..h.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRow {
    pub rank: u8,
    pub squares: Vec<RenderSquare>,
}
