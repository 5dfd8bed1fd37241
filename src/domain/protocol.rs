//! Wire protocol spoken with the backend process.
//!
//! One JSON object per line in both directions. Requests carry a
//! correlation id; the backend answers with the same id, or emits an
//! unsolicited `update` push carrying a fresh board. These are the typed
//! payloads and their line encoding; process I/O lives in the models layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::{BoardSnapshot, Move};
use super::coord::Square;

/// Commands the client can issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum Command {
    GetBoard,
    GetMoves {
        coord: Square,
    },
    ExecMove {
        #[serde(rename = "move")]
        mv: Move,
    },
    ApplyFen {
        fen: String,
    },
    Undo,
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    id: u64,
    #[serde(flatten)]
    command: &'a Command,
}

/// Encode one request line (no trailing newline).
pub fn encode_line(id: u64, command: &Command) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&Request { id, command })?)
}

/// Anything the backend may write on a line.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Incoming {
    Push(PushEvent),
    Reply(Reply),
}

/// An unsolicited delivery; `event` is always "update" today.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    pub event: String,
    pub board: BoardSnapshot,
}

/// An answer to a request, matched to it by id.
#[derive(Debug, Clone, Deserialize)]
pub struct Reply {
    pub id: u64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub board: Option<BoardSnapshot>,
    #[serde(default)]
    pub moves: Option<Vec<Move>>,
}

/// The data a successful reply resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyPayload {
    Board(BoardSnapshot),
    Moves(Vec<Move>),
    Ack,
}

impl Reply {
    pub fn into_payload(self) -> Result<ReplyPayload, String> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if let Some(board) = self.board {
            return Ok(ReplyPayload::Board(board));
        }
        if let Some(moves) = self.moves {
            return Ok(ReplyPayload::Moves(moves));
        }
        Ok(ReplyPayload::Ack)
    }
}

pub fn parse_line(line: &str) -> Result<Incoming, ProtocolError> {
    Ok(serde_json::from_str(line)?)
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed backend line: {0}")]
    Malformed(#[from] serde_json::Error),
}
