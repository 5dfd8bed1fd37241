//! Square rendering component.

use crate::ui::components::render_piece;
use crate::ui::theme::{CANDIDATE_DOT, CAPTURE_RING, SELECTED_SQUARE, square_color};
use crate::ui::view_models::RenderSquare;
use gpui::{div, prelude::*, px, rgb};

/// Render a single board square from its render model
pub fn render_square(square: &RenderSquare, square_size: f32, piece_size: f32) -> impl IntoElement + use<> {
    let bg = if square.selected {
        rgb(SELECTED_SQUARE)
    } else {
        square_color(square.square)
    };

    div()
        .flex_shrink_0() // never shrink - maintain aspect ratio
        .relative()
        .size(px(square_size))
        .bg(bg)
        .flex()
        .items_center()
        .justify_center()
        .when_some(square.piece, |el, piece| {
            el.child(render_piece(piece, piece_size))
        })
        .when(square.candidate, |el| {
            // Dot on quiet destinations, ring where the move captures.
            let marker = if square.captures {
                div()
                    .size(px(square_size * 0.9))
                    .rounded_full()
                    .border_4()
                    .border_color(rgb(CAPTURE_RING))
            } else {
                div()
                    .size(px(square_size * 0.3))
                    .rounded_full()
                    .bg(rgb(CANDIDATE_DOT))
            };

            el.child(
                div()
                    .absolute()
                    .top_0()
                    .left_0()
                    .size_full()
                    .flex()
                    .items_center()
                    .justify_center()
                    .child(marker),
            )
        })
}
