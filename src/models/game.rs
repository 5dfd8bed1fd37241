//! Game state model - the application layer for the board client.
//!
//! Wraps the selection state machine, forwards its outgoing commands to
//! the backend model, and feeds backend events back into it. Views observe
//! this entity and rebuild their render model from it on every pass.

use gpui::{Context, Entity, Subscription};

use crate::domain::{BoardSnapshot, GameSession, Outgoing, PieceColor, SelectionState, Square};
use crate::models::backend::{BackendEvent, BackendModel};

/// Standard starting position, sent on "new game".
pub const START_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The main game model containing all interaction state
pub struct GameModel {
    session: GameSession,
    backend: Entity<BackendModel>,
    backend_alive: bool,
    _subscription: Subscription,
}

impl GameModel {
    /// Create the model and request the initial board. The backend entity
    /// must already be started.
    pub fn new(backend: Entity<BackendModel>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.subscribe(&backend, Self::on_backend_event);
        let backend_alive = backend.read(cx).is_running();

        let mut session = GameSession::new();
        if let Some(out) = session.fetch_board() {
            backend.read(cx).send(&out);
        }

        Self {
            session,
            backend,
            backend_alive,
            _subscription,
        }
    }

    /// The click-intent entry point wired to the board view.
    pub fn click_square(&mut self, square: Square, cx: &mut Context<Self>) {
        // Once the game is decided the outcome overlay owns input.
        if self.session.snapshot().is_some_and(|s| s.is_over()) {
            return;
        }

        if let Some(out) = self.session.click(square) {
            self.send(out, cx);
        }
        cx.notify();
    }

    /// Revert one ply.
    pub fn undo(&mut self, cx: &mut Context<Self>) {
        if let Some(out) = self.session.undo() {
            self.send(out, cx);
        }
        cx.notify();
    }

    /// Replace the whole position from FEN text.
    pub fn apply_position(&mut self, fen: &str, cx: &mut Context<Self>) {
        if let Some(out) = self.session.apply_position(fen) {
            self.send(out, cx);
        }
        cx.notify();
    }

    /// Start over from the standard starting position.
    pub fn new_game(&mut self, cx: &mut Context<Self>) {
        self.apply_position(START_POSITION, cx);
    }

    pub fn snapshot(&self) -> Option<&BoardSnapshot> {
        self.session.snapshot()
    }

    pub fn selection(&self) -> &SelectionState {
        self.session.selection()
    }

    pub fn is_waiting(&self) -> bool {
        self.session.is_waiting()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.session.last_error()
    }

    pub fn backend_alive(&self) -> bool {
        self.backend_alive
    }

    pub fn turn(&self) -> Option<PieceColor> {
        self.session.snapshot().map(|s| s.turn)
    }

    pub fn winner(&self) -> Option<PieceColor> {
        self.session.snapshot().and_then(|s| s.winner)
    }

    fn on_backend_event(
        &mut self,
        _backend: Entity<BackendModel>,
        event: &BackendEvent,
        cx: &mut Context<Self>,
    ) {
        match event {
            BackendEvent::Reply(reply) => self.session.handle_reply(reply.clone()),
            BackendEvent::Update(board) => self.session.apply_update(board.clone()),
            BackendEvent::Exited => self.backend_alive = false,
        }
        cx.notify();
    }

    fn send(&self, outgoing: Outgoing, cx: &mut Context<Self>) {
        self.backend.read(cx).send(&outgoing);
    }
}
