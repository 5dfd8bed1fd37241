mod board_view;
mod control_panel;

pub use board_view::BoardView;
pub use control_panel::render_control_panel;
