//! Theme constants and colors for the board UI.

use gpui::{Rgba, rgb};

use crate::domain::Square;

// Layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const PIECE_SCALE: f32 = 0.98; // piece size relative to square

// Initial panel sizes
pub const INITIAL_BOARD_PANEL: f32 = 540.0;
pub const INITIAL_SIDE_PANEL: f32 = 280.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xEFD9B5;
pub const DARK_SQUARE: u32 = 0xB48764;
pub const SELECTED_SQUARE: u32 = 0xF6F18E;
pub const CANDIDATE_DOT: u32 = 0x7A8B52;
pub const CAPTURE_RING: u32 = 0xC0564A;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const CARD_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const TEXT_OK: u32 = 0x4ade80;
pub const TEXT_ALERT: u32 = 0xf87171;

/// Get the base color for a board square. a1 is dark.
pub fn square_color(square: Square) -> Rgba {
    let (x, y) = square.xy();
    if (x + y) % 2 == 1 {
        rgb(LIGHT_SQUARE)
    } else {
        rgb(DARK_SQUARE)
    }
}
