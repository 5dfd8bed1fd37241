//! Selection state machine.
//!
//! `GameSession` owns the interaction state: the current selection with its
//! backend-certified candidate moves, the last delivered snapshot, and the
//! single call in flight. It does no I/O itself: clicks and replies come
//! in, commands to send come out, so the whole protocol can be exercised
//! in tests with scripted replies. The gpui model layer wires the returned
//! commands to the backend process.
//!
//! Candidates are always the backend's most recent answer for the selected
//! square, never computed here. Legality of anything is the backend's call;
//! a rejected command simply leaves the pre-call state in place.

use tracing::{debug, warn};

use super::board::{BoardSnapshot, Move};
use super::coord::Square;
use super::protocol::{Command, Reply, ReplyPayload};

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    Idle,
    Selected {
        origin: Square,
        candidates: Vec<Move>,
    },
}

/// What the one pending reply is expected to resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PendingKind {
    Board,
    Moves { origin: Square },
    Exec,
    Fen,
    Undo,
}

#[derive(Debug)]
struct PendingCall {
    id: u64,
    kind: PendingKind,
}

/// A command ready to go out, tagged with its correlation id.
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub id: u64,
    pub command: Command,
}

pub struct GameSession {
    selection: SelectionState,
    snapshot: Option<BoardSnapshot>,
    pending: Option<PendingCall>,
    last_error: Option<String>,
    next_id: u64,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            selection: SelectionState::Idle,
            snapshot: None,
            pending: None,
            last_error: None,
            next_id: 1,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn snapshot(&self) -> Option<&BoardSnapshot> {
        self.snapshot.as_ref()
    }

    /// Whether a call is in flight. Clicks are ignored until it resolves.
    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Request the full board, used for the initial fetch.
    pub fn fetch_board(&mut self) -> Option<Outgoing> {
        if self.pending.is_some() {
            return None;
        }
        Some(self.issue(PendingKind::Board, Command::GetBoard))
    }

    /// Interpret a click on `square` per the current selection.
    ///
    /// Returns the command to send, if the click results in one. Which
    /// squares are selectable is not decided here: any square may be
    /// clicked, and the backend's candidate answer settles what happens.
    pub fn click(&mut self, square: Square) -> Option<Outgoing> {
        if self.pending.is_some() {
            debug!(%square, "ignoring click while a call is in flight");
            return None;
        }

        match &self.selection {
            SelectionState::Selected { origin, .. } if *origin == square => {
                // Deselect by reclick, no backend round-trip.
                self.selection = SelectionState::Idle;
                None
            }
            SelectionState::Selected { candidates, .. } => {
                match candidates.iter().find(|mv| mv.to == square).cloned() {
                    // Submit the backend's own move value, untouched.
                    Some(mv) => Some(self.issue(PendingKind::Exec, Command::ExecMove { mv })),
                    // Neither origin nor candidate: treat as a fresh
                    // selection attempt.
                    None => Some(self.request_moves(square)),
                }
            }
            SelectionState::Idle => Some(self.request_moves(square)),
        }
    }

    /// Replace the whole position from FEN text. Any selection is invalid
    /// the moment this is issued, success or not.
    pub fn apply_position(&mut self, fen: &str) -> Option<Outgoing> {
        if self.pending.is_some() {
            return None;
        }
        self.selection = SelectionState::Idle;
        Some(self.issue(
            PendingKind::Fen,
            Command::ApplyFen {
                fen: fen.to_string(),
            },
        ))
    }

    /// Revert one ply. Resets the selection on invocation, like
    /// [`apply_position`](Self::apply_position).
    pub fn undo(&mut self) -> Option<Outgoing> {
        if self.pending.is_some() {
            return None;
        }
        self.selection = SelectionState::Idle;
        Some(self.issue(PendingKind::Undo, Command::Undo))
    }

    /// Take a pushed snapshot. Last write wins; the selection is managed
    /// only by the transition rules, never by snapshot content.
    pub fn apply_update(&mut self, snapshot: BoardSnapshot) {
        self.snapshot = Some(snapshot);
    }

    /// Resolve the pending call with a reply from the backend.
    pub fn handle_reply(&mut self, reply: Reply) {
        let pending = match self.pending.take() {
            Some(pending) if pending.id == reply.id => pending,
            Some(pending) => {
                warn!(
                    id = reply.id,
                    expected = pending.id,
                    "discarding reply for a different call"
                );
                self.pending = Some(pending);
                return;
            }
            None => {
                warn!(id = reply.id, "discarding reply with no call in flight");
                return;
            }
        };

        match reply.into_payload() {
            Err(error) => {
                // Pre-call state stays in place: no selection change, no
                // snapshot replacement.
                warn!(%error, "backend rejected command");
                self.last_error = Some(error);
            }
            Ok(payload) => {
                self.last_error = None;
                match (pending.kind, payload) {
                    (PendingKind::Board, ReplyPayload::Board(board)) => {
                        self.snapshot = Some(board);
                    }
                    (PendingKind::Moves { origin }, ReplyPayload::Moves(moves)) => {
                        // An empty answer means "nothing selectable here",
                        // whether the square is empty or just immobile.
                        self.selection = if moves.is_empty() {
                            SelectionState::Idle
                        } else {
                            SelectionState::Selected {
                                origin,
                                candidates: moves,
                            }
                        };
                    }
                    (PendingKind::Exec, _) => {
                        // The move landed; the new board arrives via push.
                        self.selection = SelectionState::Idle;
                    }
                    (PendingKind::Fen, _) | (PendingKind::Undo, _) => {}
                    (kind, _) => {
                        warn!(?kind, "reply payload does not match the call");
                    }
                }
            }
        }
    }

    fn request_moves(&mut self, square: Square) -> Outgoing {
        self.issue(
            PendingKind::Moves { origin: square },
            Command::GetMoves { coord: square },
        )
    }

    fn issue(&mut self, kind: PendingKind, command: Command) -> Outgoing {
        let id = self.next_id;
        self.next_id += 1;
        self.pending = Some(PendingCall { id, kind });
        Outgoing { id, command }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::piece::PieceColor;

    fn sq(label: &str) -> Square {
        Square::from_label(label).unwrap()
    }

    fn mv(from: &str, to: &str) -> Move {
        Move {
            from: sq(from),
            to: sq(to),
            capture: None,
        }
    }

    fn board(turn: PieceColor) -> BoardSnapshot {
        BoardSnapshot {
            pieces: vec![None; 64],
            turn,
            white_checked: false,
            black_checked: false,
            winner: None,
        }
    }

    fn moves_reply(id: u64, moves: Vec<Move>) -> Reply {
        Reply {
            id,
            error: None,
            board: None,
            moves: Some(moves),
        }
    }

    fn ack_reply(id: u64) -> Reply {
        Reply {
            id,
            error: None,
            board: None,
            moves: None,
        }
    }

    fn error_reply(id: u64, error: &str) -> Reply {
        Reply {
            id,
            error: Some(error.to_string()),
            board: None,
            moves: None,
        }
    }

    /// Drive the session into `Selected` with the given candidates.
    fn select(session: &mut GameSession, origin: &str, candidates: Vec<Move>) {
        let out = session.click(sq(origin)).expect("click should issue a call");
        assert_eq!(Command::GetMoves { coord: sq(origin) }, out.command);
        session.handle_reply(moves_reply(out.id, candidates));
    }

    #[test]
    fn initial_fetch_stores_snapshot() {
        let mut session = GameSession::new();
        let out = session.fetch_board().unwrap();
        assert_eq!(Command::GetBoard, out.command);
        assert!(session.is_waiting());

        session.handle_reply(Reply {
            id: out.id,
            error: None,
            board: Some(board(PieceColor::White)),
            moves: None,
        });

        assert!(!session.is_waiting());
        assert_eq!(PieceColor::White, session.snapshot().unwrap().turn);
    }

    #[test]
    fn empty_answer_keeps_idle() {
        let mut session = GameSession::new();
        let out = session.click(sq("e3")).unwrap();
        assert_eq!(Command::GetMoves { coord: sq("e3") }, out.command);

        session.handle_reply(moves_reply(out.id, vec![]));

        assert_eq!(&SelectionState::Idle, session.selection());
        assert!(!session.is_waiting());
    }

    #[test]
    fn non_empty_answer_selects() {
        let mut session = GameSession::new();
        select(&mut session, "e2", vec![mv("e2", "e3"), mv("e2", "e4")]);

        match session.selection() {
            SelectionState::Selected { origin, candidates } => {
                assert_eq!(sq("e2"), *origin);
                assert_eq!(2, candidates.len());
            }
            other => panic!("expected a selection, got {other:?}"),
        }
    }

    #[test]
    fn candidate_click_submits_exactly_that_move() {
        let mut session = GameSession::new();
        let candidate = mv("e2", "e4");
        select(&mut session, "e2", vec![candidate.clone()]);

        let out = session.click(sq("e4")).unwrap();
        assert_eq!(Command::ExecMove { mv: candidate }, out.command);

        session.handle_reply(ack_reply(out.id));
        assert_eq!(&SelectionState::Idle, session.selection());
    }

    #[test]
    fn reclick_origin_deselects_without_a_call() {
        let mut session = GameSession::new();
        select(&mut session, "e2", vec![mv("e2", "e4")]);

        assert_eq!(None, session.click(sq("e2")));
        assert_eq!(&SelectionState::Idle, session.selection());
        assert!(!session.is_waiting());
    }

    #[test]
    fn off_candidate_click_requests_moves_not_exec() {
        let mut session = GameSession::new();
        select(&mut session, "e2", vec![mv("e2", "e4")]);

        let out = session.click(sq("d7")).unwrap();
        assert_eq!(Command::GetMoves { coord: sq("d7") }, out.command);

        // Empty answer abandons the old selection entirely.
        session.handle_reply(moves_reply(out.id, vec![]));
        assert_eq!(&SelectionState::Idle, session.selection());
    }

    #[test]
    fn off_candidate_click_can_reselect() {
        let mut session = GameSession::new();
        select(&mut session, "e2", vec![mv("e2", "e4")]);

        let out = session.click(sq("d2")).unwrap();
        session.handle_reply(moves_reply(out.id, vec![mv("d2", "d4")]));

        match session.selection() {
            SelectionState::Selected { origin, candidates } => {
                assert_eq!(sq("d2"), *origin);
                assert_eq!(vec![mv("d2", "d4")], *candidates);
            }
            other => panic!("expected a selection, got {other:?}"),
        }
    }

    #[test]
    fn apply_position_resets_selection_on_invocation() {
        let mut session = GameSession::new();
        select(&mut session, "e2", vec![mv("e2", "e4")]);

        let out = session.apply_position("8/8/8/8/8/8/8/K6k w - - 0 1").unwrap();
        assert_eq!(&SelectionState::Idle, session.selection());

        // Reset holds regardless of outcome.
        session.handle_reply(error_reply(out.id, "bad fen"));
        assert_eq!(&SelectionState::Idle, session.selection());
        assert_eq!(Some("bad fen"), session.last_error());
    }

    #[test]
    fn undo_resets_selection_on_invocation() {
        let mut session = GameSession::new();
        select(&mut session, "e2", vec![mv("e2", "e4")]);

        let out = session.undo().unwrap();
        assert_eq!(Command::Undo, out.command);
        assert_eq!(&SelectionState::Idle, session.selection());

        session.handle_reply(ack_reply(out.id));
        assert_eq!(&SelectionState::Idle, session.selection());
    }

    #[test]
    fn failed_exec_keeps_pre_call_state() {
        let mut session = GameSession::new();
        session.apply_update(board(PieceColor::White));
        select(&mut session, "e2", vec![mv("e2", "e4")]);

        let out = session.click(sq("e4")).unwrap();
        session.handle_reply(error_reply(out.id, "not your turn"));

        // Still selected, snapshot untouched.
        assert!(matches!(
            session.selection(),
            SelectionState::Selected { origin, .. } if *origin == sq("e2")
        ));
        assert_eq!(PieceColor::White, session.snapshot().unwrap().turn);
        assert_eq!(Some("not your turn"), session.last_error());
    }

    #[test]
    fn clicks_are_ignored_while_waiting() {
        let mut session = GameSession::new();
        let out = session.click(sq("e2")).unwrap();

        assert_eq!(None, session.click(sq("d2")));
        assert_eq!(None, session.undo());
        assert_eq!(None, session.fetch_board());

        session.handle_reply(moves_reply(out.id, vec![mv("e2", "e4")]));
        assert!(!session.is_waiting());
    }

    #[test]
    fn push_replaces_snapshot_independent_of_in_flight_call() {
        let mut session = GameSession::new();
        session.apply_update(board(PieceColor::White));

        let out = session.click(sq("e2")).unwrap();
        session.apply_update(board(PieceColor::Black));

        assert_eq!(PieceColor::Black, session.snapshot().unwrap().turn);
        assert!(session.is_waiting());

        // The delayed reply still resolves normally afterwards.
        session.handle_reply(moves_reply(out.id, vec![mv("e2", "e4")]));
        assert!(matches!(
            session.selection(),
            SelectionState::Selected { .. }
        ));
    }

    #[test]
    fn mismatched_reply_is_discarded() {
        let mut session = GameSession::new();
        let out = session.click(sq("e2")).unwrap();

        session.handle_reply(moves_reply(out.id + 7, vec![mv("e2", "e4")]));

        assert!(session.is_waiting());
        assert_eq!(&SelectionState::Idle, session.selection());

        session.handle_reply(moves_reply(out.id, vec![mv("e2", "e4")]));
        assert!(matches!(
            session.selection(),
            SelectionState::Selected { .. }
        ));
    }

    #[test]
    fn unsolicited_reply_is_discarded() {
        let mut session = GameSession::new();
        session.handle_reply(moves_reply(42, vec![mv("e2", "e4")]));
        assert_eq!(&SelectionState::Idle, session.selection());
    }
}
