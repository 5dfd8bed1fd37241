//! GPUI entities owning mutable application state.

pub mod backend;
pub mod game;

pub use backend::{BackendEvent, BackendModel};
pub use game::{GameModel, START_POSITION};
