//! Application setup and window creation.

use std::path::PathBuf;

use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;
use tracing::error;

use crate::models::{BackendModel, GameModel};
use crate::ui::views::BoardView;

/// Create the models, start the backend, and open the main window
pub fn run(backend_path: PathBuf, cx: &mut App) {
    gpui_component::init(cx);

    let backend = cx.new(|_| BackendModel::new());
    backend.update(cx, |model, cx| {
        if let Err(e) = model.start(&backend_path, cx) {
            // The window still opens; the side panel shows the dead link.
            error!(error = %e, "failed to start backend");
        }
    });

    let model = cx.new(|cx| GameModel::new(backend, cx));

    let bounds = Bounds::centered(None, size(px(900.0), px(600.0)), cx);
    cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| BoardView::new(model, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    )
    .unwrap();
}
