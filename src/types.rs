use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{BOARD_SIZE, Cell};

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Returns `None` when either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Checked construction from signed coordinates produced by direction arithmetic.
    pub fn from_signed(row: i32, col: i32) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::new(row, col)
    }

    pub fn offset(self, dr: i32, dc: i32) -> Option<Self> {
        Self::from_signed(self.row as i32 + dr, self.col as i32 + dc)
    }

    pub(crate) fn signed(self) -> (i32, i32) {
        (self.row as i32, self.col as i32)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the two colours. Dark always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Dark,
    Light,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => f.write_str("dark"),
            Self::Light => f.write_str("light"),
        }
    }
}

/// Opaque player token owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Match identity assigned by the store. The engine only echoes it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Square of the jumped piece when this move is a capture.
    pub captured: Option<Square>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Append-only move log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// Piece as it stood on the origin square, before any promotion.
    pub piece: Cell,
    pub captured: bool,
    pub promoted: bool,
}

/// Consequences of a successfully applied move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub captured: Option<Square>,
    pub promoted: bool,
    /// Contract:
    /// - `true` when the same piece must keep jumping; the turn has not passed.
    /// - `false` when the turn passed (or the game ended).
    pub has_more_captures: bool,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}
