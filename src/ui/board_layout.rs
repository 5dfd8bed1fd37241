//! Board layout calculations - sizing and pixel-to-square mapping.

use gpui::{Pixels, Size, px};

use crate::domain::Square;
use crate::ui::theme::{BOARD_PADDING, PIECE_SCALE};

/// Handles all layout calculations for the board panel
#[derive(Clone, Copy, Debug)]
pub struct BoardLayout {
    pub panel_size: Size<Pixels>,
}

impl BoardLayout {
    pub fn new(panel_size: Size<Pixels>) -> Self {
        Self { panel_size }
    }

    /// Calculate square size from measured panel dimensions
    pub fn square_size(&self) -> f32 {
        let panel_width: f32 = self.panel_size.width.into();
        let panel_height: f32 = self.panel_size.height.into();
        let available_width = panel_width - BOARD_PADDING * 2.0;
        let available_height = panel_height - BOARD_PADDING * 2.0;
        (available_width.min(available_height) / 8.0).max(30.0)
    }

    /// Calculate piece size based on square size
    pub fn piece_size(&self) -> f32 {
        self.square_size() * PIECE_SCALE
    }

    /// Get the total size of the board (8 squares)
    pub fn board_total_size(&self) -> f32 {
        self.square_size() * 8.0
    }

    /// Map a position relative to the board panel to a square, if it lands
    /// on the board. The top display row is rank 8.
    pub fn pos_to_square(&self, x: f32, y: f32) -> Option<Square> {
        let board_x = x - BOARD_PADDING;
        let board_y = y - BOARD_PADDING;

        if board_x < 0.0 || board_y < 0.0 {
            return None;
        }

        let square_size = self.square_size();
        let col = (board_x / square_size) as usize;
        let row = (board_y / square_size) as usize;

        if row < 8 && col < 8 {
            Some(Square::from_xy(col as u8, 7 - row as u8))
        } else {
            None
        }
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(Size {
            width: px(540.0),
            height: px(600.0),
        })
    }
}
