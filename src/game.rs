use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, playable_squares};
use crate::config::{ForcedCapture, RuleConfig, StalemateRule};
use crate::error::{MatchError, RecordError};
use crate::movegen;
use crate::record::{MatchRecord, MatchState};
use crate::types::{MatchId, Move, MoveOutcome, MoveRecord, PlayerId, Side, Square};

/// Lifecycle phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Created, wager not yet locked.
    Pending,
    /// Wager locked, moves accepted.
    Active,
    /// Terminal. Never left.
    Over,
}

/// Rules state machine for one game of English draughts.
///
/// Owns its board exclusively. No internal locking: callers serialize
/// mutations of a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    id: Option<MatchId>,
    dark: PlayerId,
    light: PlayerId,
    board: Board,
    turn: Side,
    winner: Option<Side>,
    wager: u64,
    wager_locked: bool,
    started: bool,
    over: bool,
    history: Vec<MoveRecord>,
    /// Landing square of a capture that must be continued by the same piece.
    chain: Option<Square>,
    rules: RuleConfig,
}

impl Match {
    pub fn new(dark: PlayerId, light: PlayerId, wager: u64) -> Self {
        Self::with_rules(dark, light, wager, RuleConfig::default())
    }

    pub fn with_rules(dark: PlayerId, light: PlayerId, wager: u64, rules: RuleConfig) -> Self {
        Self {
            id: None,
            dark,
            light,
            board: Board::new(),
            turn: Side::Dark,
            winner: None,
            wager,
            wager_locked: false,
            started: false,
            over: false,
            history: Vec::new(),
            chain: None,
            rules,
        }
    }

    pub fn id(&self) -> Option<MatchId> {
        self.id
    }

    pub fn set_id(&mut self, id: MatchId) {
        self.id = Some(id);
    }

    pub fn player(&self, side: Side) -> &PlayerId {
        match side {
            Side::Dark => &self.dark,
            Side::Light => &self.light,
        }
    }

    pub fn side_of(&self, player: &PlayerId) -> Option<Side> {
        if *player == self.dark {
            Some(Side::Dark)
        } else if *player == self.light {
            Some(Side::Light)
        } else {
            None
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn current_player(&self) -> &PlayerId {
        self.player(self.turn)
    }

    /// Turn-ownership check for callers. Always `false` once the game is over.
    pub fn is_player_turn(&self, player: &PlayerId) -> bool {
        !self.over && *self.current_player() == *player
    }

    pub fn winning_side(&self) -> Option<Side> {
        self.winner
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.map(|side| self.player(side))
    }

    pub fn wager(&self) -> u64 {
        self.wager
    }

    pub fn is_wager_locked(&self) -> bool {
        self.wager_locked
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn status(&self) -> MatchStatus {
        if self.over {
            MatchStatus::Over
        } else if self.started {
            MatchStatus::Active
        } else {
            MatchStatus::Pending
        }
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn rules(&self) -> RuleConfig {
        self.rules
    }

    /// Square the mover must keep jumping from, if a capture chain is open.
    pub fn pending_capture(&self) -> Option<Square> {
        self.chain
    }

    /// Locks the wager and opens the match for moves.
    /// Returns `false` if it was already started.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.wager_locked = true;
        info!(
            "match {:?} started: {} (dark) vs {} (light), wager {}",
            self.id, self.dark, self.light, self.wager
        );
        true
    }

    /// Legal moves for the piece on `(row, col)` with the current side to move.
    ///
    /// A piece that can capture only lists its captures. Whether another
    /// piece's capture also blocks this one depends on [`RuleConfig::forced_capture`].
    pub fn legal_moves(&self, row: u8, col: u8) -> Vec<Move> {
        match Square::new(row, col) {
            Some(from) => self.moves_from(from),
            None => Vec::new(),
        }
    }

    /// Every legal move for the side to move, forced capture applied board-wide.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        match self.chain {
            Some(from) => movegen::square_captures(&self.board, self.turn, from),
            None => movegen::side_moves(&self.board, self.turn),
        }
    }

    pub fn apply_move(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> Result<MoveOutcome, MatchError> {
        if !self.started {
            return Err(MatchError::NotStarted);
        }
        if self.over {
            return Err(MatchError::GameOver);
        }

        let from = Square::new(from_row, from_col).ok_or(MatchError::EmptySource(Square {
            row: from_row,
            col: from_col,
        }))?;
        let piece = self.board.at(from);
        if piece.is_empty() {
            return Err(MatchError::EmptySource(from));
        }
        if !piece.belongs_to(self.turn) {
            return Err(MatchError::WrongTurn {
                expected: self.turn,
            });
        }

        let to = Square {
            row: to_row,
            col: to_col,
        };
        let Some(mv) = self.moves_from(from).into_iter().find(|mv| mv.to == to) else {
            debug!("rejected move {from} -> {to} for {}", self.turn);
            return Err(MatchError::IllegalMove { from, to });
        };

        self.board.put(from, Cell::Empty);
        self.board.put(to, piece);
        if let Some(captured) = mv.captured {
            self.board.put(captured, Cell::Empty);
        }
        let (row, col) = to.signed();
        let promoted = self.board.promote(row, col);

        self.history.push(MoveRecord {
            from,
            to,
            piece,
            captured: mv.is_capture(),
            promoted,
        });

        let has_more_captures = mv.is_capture()
            && !promoted
            && !movegen::square_captures(&self.board, self.turn, to).is_empty();

        if has_more_captures {
            self.chain = Some(to);
        } else {
            self.chain = None;
            self.turn = self.turn.opponent();
        }
        debug!(
            "applied {from} -> {to} (capture: {}, promoted: {promoted}, chain: {has_more_captures})",
            mv.is_capture()
        );

        self.check_win_condition();

        Ok(MoveOutcome {
            captured: mv.captured,
            promoted,
            has_more_captures: has_more_captures && !self.over,
            game_over: self.over,
            winner: self.winner().cloned(),
        })
    }

    /// Ends the match if a side has no pieces, or the side on turn cannot move.
    /// Returns whether the match is over.
    pub fn check_win_condition(&mut self) -> bool {
        if self.over {
            return true;
        }

        let (dark, light) = self.board.count();
        if dark == 0 {
            self.finish(Some(Side::Light));
        } else if light == 0 {
            self.finish(Some(Side::Dark));
        } else if self.all_legal_moves().is_empty() {
            let winner = match self.rules.stalemate {
                StalemateRule::Loss => Some(self.turn.opponent()),
                StalemateRule::Draw => None,
            };
            self.finish(winner);
        }

        self.over
    }

    pub fn state(&self) -> MatchState {
        MatchState {
            id: self.id,
            dark_player: self.dark.clone(),
            light_player: self.light.clone(),
            board: self.board,
            current_player: self.current_player().clone(),
            winner: self.winner().cloned(),
            wager: self.wager,
            wager_locked: self.wager_locked,
            started: self.started,
            over: self.over,
            move_count: self.history.len(),
        }
    }

    pub fn to_record(&self) -> MatchRecord {
        MatchRecord {
            id: self.id,
            dark_player: self.dark.clone(),
            light_player: self.light.clone(),
            board: self.board,
            current_player: self.current_player().clone(),
            winner: self.winner().cloned(),
            wager: self.wager,
            wager_locked: self.wager_locked,
            started: self.started,
            over: self.over,
            move_history: self.history.clone(),
            pending_capture: self.chain,
            rules: self.rules,
        }
    }

    /// Rebuilds a match from a persisted record. The result behaves exactly
    /// like the match the record was taken from.
    pub fn from_record(record: MatchRecord) -> Result<Self, RecordError> {
        let side_of = |player: &PlayerId| {
            if *player == record.dark_player {
                Ok(Side::Dark)
            } else if *player == record.light_player {
                Ok(Side::Light)
            } else {
                Err(RecordError::UnknownPlayer(player.clone()))
            }
        };

        let turn = side_of(&record.current_player)?;
        let winner = record.winner.as_ref().map(side_of).transpose()?;

        if record.winner.is_some() && !record.over {
            return Err(RecordError::InconsistentFlags("winner set on an unfinished match"));
        }
        if record.wager_locked != record.started {
            return Err(RecordError::InconsistentFlags("wager lock does not match start"));
        }
        if record.over && !record.started {
            return Err(RecordError::InconsistentFlags("finished match was never started"));
        }
        if let Some(sq) = record.pending_capture {
            if record.over {
                return Err(RecordError::InconsistentFlags("capture chain open on a finished match"));
            }
            if movegen::square_captures(&record.board, turn, sq).is_empty() {
                return Err(RecordError::InvalidChain(sq));
            }
        }

        Ok(Self {
            id: record.id,
            dark: record.dark_player,
            light: record.light_player,
            board: record.board,
            turn,
            winner,
            wager: record.wager,
            wager_locked: record.wager_locked,
            started: record.started,
            over: record.over,
            history: record.move_history,
            chain: record.pending_capture,
            rules: record.rules,
        })
    }

    fn moves_from(&self, from: Square) -> Vec<Move> {
        match self.chain {
            Some(chain) if chain != from => Vec::new(),
            Some(_) => movegen::square_captures(&self.board, self.turn, from),
            None => {
                let moves = movegen::square_moves(&self.board, self.turn, from);
                if self.rules.forced_capture == ForcedCapture::BoardWide
                    && moves.first().is_some_and(|mv| !mv.is_capture())
                    && self.side_can_capture()
                {
                    Vec::new()
                } else {
                    moves
                }
            }
        }
    }

    fn side_can_capture(&self) -> bool {
        playable_squares()
            .iter()
            .any(|&sq| !movegen::square_captures(&self.board, self.turn, sq).is_empty())
    }

    fn finish(&mut self, winner: Option<Side>) {
        self.over = true;
        self.winner = winner;
        self.chain = None;
        match winner {
            Some(side) => info!("match {:?} over: {} ({side}) wins", self.id, self.player(side)),
            None => info!("match {:?} over: drawn by blockade", self.id),
        }
    }
}

#[cfg(test)]
impl Match {
    fn set_board_for_test(&mut self, board: Board, turn: Side) {
        self.board = board;
        self.turn = turn;
        self.over = false;
        self.winner = None;
        self.chain = None;
    }
}
