//! Board view - draws the grid from the render model and routes clicks.

use gpui::{
    AnyElement, Context, Entity, MouseButton, MouseDownEvent, Pixels, Subscription, Window,
    canvas, div, prelude::*, px, rgb, rgba,
};
use gpui_component::button::{Button, ButtonVariants};
use gpui_component::resizable::{h_resizable, resizable_panel};

use crate::domain::PieceColor;
use crate::models::GameModel;
use crate::ui::board_layout::BoardLayout;
use crate::ui::components::render_square;
use crate::ui::display::build_grid;
use crate::ui::theme::{
    BOARD_PADDING, BORDER_COLOR, CARD_BG, INITIAL_BOARD_PANEL, INITIAL_SIDE_PANEL, PANEL_BG,
    TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::ui::views::render_control_panel;

const OVERLAY_SCRIM: u32 = 0x000000aa;

/// The main board view observing a GameModel
pub struct BoardView {
    model: Entity<GameModel>,
    layout: BoardLayout,
    _subscription: Subscription,
}

impl BoardView {
    pub fn new(model: Entity<GameModel>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&model, |_, _, cx| cx.notify());
        Self {
            model,
            layout: BoardLayout::default(),
            _subscription,
        }
    }
}

impl Render for BoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let model = self.model.clone();
        let model_click = model.clone();
        let view_measure = cx.entity().clone();

        let layout = self.layout;
        let square_size = layout.square_size();
        let piece_size = layout.piece_size();
        let board_total_size = layout.board_total_size();

        let game = self.model.read(cx);
        let winner = game.winner();

        // Rebuild the render model from the latest snapshot each pass.
        let board: AnyElement = match game.snapshot() {
            Some(snapshot) => {
                let grid = build_grid(snapshot, game.selection());
                div()
                    .flex_shrink_0()
                    .flex()
                    .flex_col()
                    .w(px(board_total_size))
                    .h(px(board_total_size))
                    .overflow_hidden()
                    .rounded_md()
                    .children(grid.into_iter().map(|row| {
                        div().flex().flex_shrink_0().children(
                            row.squares
                                .into_iter()
                                .map(|square| render_square(&square, square_size, piece_size)),
                        )
                    }))
                    .into_any_element()
            }
            None => div()
                .w(px(board_total_size))
                .h(px(board_total_size))
                .flex()
                .items_center()
                .justify_center()
                .text_color(rgb(TEXT_SECONDARY))
                .child("Waiting for the engine...")
                .into_any_element(),
        };

        // Terminal outcome blocks the board until a new game starts.
        let outcome_overlay = winner.map(|winner| {
            let model_new_game = model.clone();
            let headline = match winner {
                PieceColor::White => "White wins",
                PieceColor::Black => "Black wins",
            };

            div()
                .absolute()
                .top_0()
                .left_0()
                .size_full()
                .flex()
                .items_center()
                .justify_center()
                .bg(rgba(OVERLAY_SCRIM))
                .child(
                    div()
                        .flex()
                        .flex_col()
                        .items_center()
                        .gap_4()
                        .p_8()
                        .bg(rgb(CARD_BG))
                        .border_1()
                        .border_color(rgb(BORDER_COLOR))
                        .rounded_md()
                        .child(
                            div()
                                .text_2xl()
                                .font_weight(gpui::FontWeight::BOLD)
                                .text_color(rgb(TEXT_PRIMARY))
                                .child(headline),
                        )
                        .child(
                            Button::new("new-game-overlay")
                                .label("New Game")
                                .primary()
                                .on_click(move |_, _, cx| {
                                    model_new_game.update(cx, |game, cx| game.new_game(cx));
                                }),
                        ),
                )
        });

        let board_panel_content = div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .p(px(BOARD_PADDING))
            .child(board)
            // Every click funnels through the same square mapping; the
            // model decides what, if anything, it means.
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    let pos = ev.position;
                    if let Some(square) = layout.pos_to_square(pos.x.into(), pos.y.into()) {
                        model_click.update(cx, |game, cx| game.click_square(square, cx));
                    }
                },
            )
            .when_some(outcome_overlay, |el, overlay| el.child(overlay));

        // Canvas to measure actual panel size
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                view_measure.update(cx, |view, cx| {
                    if view.layout.panel_size != bounds.size {
                        view.layout.panel_size = bounds.size;
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        // Wrap board panel content with measuring canvas
        let board_panel_with_measure = div()
            .relative()
            .size_full()
            .child(measure_canvas)
            .child(board_panel_content);

        let side_panel_content = render_control_panel(&model, cx);

        // Main resizable layout
        div().size_full().child(
            h_resizable("board-layout")
                .child(
                    resizable_panel()
                        .size(px(INITIAL_BOARD_PANEL))
                        .size_range(px(320.)..px(1200.))
                        .child(board_panel_with_measure),
                )
                .child(
                    resizable_panel()
                        .size(px(INITIAL_SIDE_PANEL))
                        .size_range(px(150.)..Pixels::MAX)
                        .child(side_panel_content),
                ),
        )
    }
}
