//! Side panel - game status and the commands that bypass the board.

use gpui::{App, Entity, div, prelude::*, px, rgb};
use gpui_component::button::{Button, ButtonVariants};

use crate::domain::PieceColor;
use crate::models::GameModel;
use crate::ui::theme::{
    BOARD_PADDING, BORDER_COLOR, CARD_BG, PANEL_BG, TEXT_ALERT, TEXT_OK, TEXT_PRIMARY,
    TEXT_SECONDARY,
};

/// Positions reachable without playing the moves out.
const PRESET_POSITIONS: &[(&str, &str, &str)] = &[
    (
        "preset-italian",
        "Italian opening",
        "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    ),
    (
        "preset-rook-endgame",
        "Rook endgame",
        "8/8/8/4k3/8/8/4K3/4R3 w - - 0 1",
    ),
];

/// Render the status panel for a given game model.
pub fn render_control_panel(model: &Entity<GameModel>, cx: &App) -> impl IntoElement {
    let game = model.read(cx);
    let backend_alive = game.backend_alive();
    let turn = game.turn();
    let in_check = game.snapshot().is_some_and(|s| s.checked(s.turn));
    let waiting = game.is_waiting();
    let last_error = game.last_error().map(|e| e.to_string());

    let model_undo = model.clone();
    let model_new_game = model.clone();

    let (status_text, status_color) = if backend_alive {
        ("Connected", TEXT_OK)
    } else {
        ("Engine gone", TEXT_ALERT)
    };

    let turn_text = match turn {
        Some(PieceColor::White) => "White to move",
        Some(PieceColor::Black) => "Black to move",
        None => "No position yet",
    };

    let card = div()
        .flex_1()
        .min_h_0()
        .flex()
        .flex_col()
        .bg(rgb(CARD_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        // Header with title and connection state
        .child(
            div()
                .flex_shrink_0()
                .flex()
                .items_center()
                .justify_between()
                .px_4()
                .py_2()
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child(
                    div()
                        .text_color(rgb(TEXT_PRIMARY))
                        .font_weight(gpui::FontWeight::SEMIBOLD)
                        .child("Game"),
                )
                .child(
                    div()
                        .text_xs()
                        .text_color(rgb(status_color))
                        .child(status_text),
                ),
        )
        // Status lines
        .child(
            div()
                .flex_shrink_0()
                .flex()
                .flex_col()
                .gap_1()
                .px_4()
                .py_3()
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child(div().text_color(rgb(TEXT_PRIMARY)).child(turn_text))
                .when(in_check, |el| {
                    el.child(div().text_sm().text_color(rgb(TEXT_ALERT)).child("Check"))
                })
                .when(waiting, |el| {
                    el.child(
                        div()
                            .text_xs()
                            .text_color(rgb(TEXT_SECONDARY))
                            .child("Waiting for the engine..."),
                    )
                })
                .when_some(last_error, |el, error| {
                    el.child(
                        div()
                            .text_xs()
                            .text_color(rgb(TEXT_ALERT))
                            .child(format!("Rejected: {}", error)),
                    )
                }),
        )
        // Game controls
        .child(
            div()
                .flex_shrink_0()
                .flex()
                .items_center()
                .gap_2()
                .px_4()
                .py_3()
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child(
                    Button::new("new-game")
                        .label("New Game")
                        .primary()
                        .compact()
                        .on_click(move |_, _, cx| {
                            model_new_game.update(cx, |game, cx| game.new_game(cx));
                        }),
                )
                .child(Button::new("undo").label("Undo").compact().on_click(
                    move |_, _, cx| {
                        model_undo.update(cx, |game, cx| game.undo(cx));
                    },
                )),
        )
        // Preset positions
        .child(
            div()
                .flex_1()
                .min_h_0()
                .flex()
                .flex_col()
                .gap_2()
                .px_4()
                .py_3()
                .child(
                    div()
                        .text_xs()
                        .text_color(rgb(TEXT_SECONDARY))
                        .child("Set up a position"),
                )
                .children(PRESET_POSITIONS.iter().map(|(id, label, fen)| {
                    let model_preset = model.clone();
                    Button::new(*id).label(*label).compact().on_click(
                        move |_, _, cx| {
                            model_preset.update(cx, |game, cx| game.apply_position(fen, cx));
                        },
                    )
                })),
        );

    div()
        .size_full()
        .flex()
        .flex_col()
        .overflow_hidden()
        .bg(rgb(PANEL_BG))
        .p(px(BOARD_PADDING))
        .child(card)
}
