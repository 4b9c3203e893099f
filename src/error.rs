use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{PlayerId, Side, Square};

/// Errors decoding the numeric board encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid cell code {0}")]
    InvalidCode(u8),

    #[error("invalid cell code {code} at ({row}, {col})")]
    InvalidCell { row: u8, col: u8, code: u8 },
}

/// Rejections from the rules state machine.
///
/// All of these leave the match untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("match has not been started")]
    NotStarted,

    #[error("game is already over")]
    GameOver,

    #[error("no piece at source position {0}")]
    EmptySource(Square),

    /// The origin holds a piece of the side not on turn.
    #[error("not your turn - it is {expected}'s turn")]
    WrongTurn { expected: Side },

    /// Destination not in the recomputed legal set for the origin.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },
}

/// Machine-readable error category, for transport to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotStarted,
    GameOver,
    EmptySource,
    WrongTurn,
    IllegalMove,
}

/// Kind plus human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub detail: String,
}

impl MatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotStarted => ErrorKind::NotStarted,
            Self::GameOver => ErrorKind::GameOver,
            Self::EmptySource(_) => ErrorKind::EmptySource,
            Self::WrongTurn { .. } => ErrorKind::WrongTurn,
            Self::IllegalMove { .. } => ErrorKind::IllegalMove,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            detail: self.to_string(),
        }
    }
}

/// Errors rebuilding a match from a persisted record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("token {0} is neither the dark nor the light player")]
    UnknownPlayer(PlayerId),

    #[error("pending capture square {0} holds no piece of the side on turn that can capture")]
    InvalidChain(Square),

    #[error("inconsistent match flags: {0}")]
    InconsistentFlags(&'static str),

    #[error("record data too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("invalid record magic")]
    BadMagic,

    #[error("unsupported record version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u32, actual: u32 },

    #[error("record payload length mismatch: header says {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Checksum { expected: u32, actual: u32 },

    #[error("malformed record JSON")]
    Json(#[from] serde_json::Error),
}
