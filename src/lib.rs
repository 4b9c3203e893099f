pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod movegen;
pub mod record;
pub mod service;
pub mod store;
pub mod types;
pub mod wasm;

pub use board::{Board, Cell};
pub use config::{ForcedCapture, RuleConfig, StalemateRule};
pub use error::{BoardError, ErrorKind, ErrorReport, MatchError, RecordError};
pub use game::{Match, MatchStatus};
pub use record::{MatchRecord, MatchState};
pub use types::{MatchId, Move, MoveOutcome, MoveRecord, PlayerId, Side, Square};
