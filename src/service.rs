//! Host-side orchestration: load a match, check who is asking, apply, save.
//!
//! Turn ownership is checked here, before the engine sees the move.

use log::debug;
use thiserror::Error;

use crate::config::RuleConfig;
use crate::error::{MatchError, RecordError};
use crate::game::Match;
use crate::record::MatchState;
use crate::store::MatchRepository;
use crate::types::{MatchId, Move, MoveOutcome, PlayerId};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("match {0} not found")]
    NotFound(MatchId),

    #[error("player {player} is not in match {id}")]
    NotInMatch { id: MatchId, player: PlayerId },

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("stored match is unreadable")]
    Record(#[from] RecordError),
}

pub struct MatchService<R> {
    repository: R,
    rules: RuleConfig,
}

impl<R: MatchRepository> MatchService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_rules(repository, RuleConfig::default())
    }

    pub fn with_rules(repository: R, rules: RuleConfig) -> Self {
        Self { repository, rules }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn create_match(&mut self, dark: PlayerId, light: PlayerId, wager: u64) -> MatchState {
        let id = self.repository.next_id();
        let mut game = Match::with_rules(dark, light, wager, self.rules);
        game.set_id(id);
        self.repository.save_match(id, game.to_record());
        game.state()
    }

    pub fn start_match(&mut self, id: MatchId) -> Result<MatchState, ServiceError> {
        let mut game = self.load(id)?;
        if game.start() {
            self.repository.save_match(id, game.to_record());
        }
        Ok(game.state())
    }

    pub fn state(&self, id: MatchId) -> Result<MatchState, ServiceError> {
        Ok(self.load(id)?.state())
    }

    pub fn legal_moves(&self, id: MatchId, row: u8, col: u8) -> Result<Vec<Move>, ServiceError> {
        Ok(self.load(id)?.legal_moves(row, col))
    }

    pub fn submit_move(
        &mut self,
        id: MatchId,
        player: &PlayerId,
        from: (u8, u8),
        to: (u8, u8),
    ) -> Result<MoveOutcome, ServiceError> {
        let mut game = self.load(id)?;

        let Some(side) = game.side_of(player) else {
            return Err(ServiceError::NotInMatch {
                id,
                player: player.clone(),
            });
        };
        if game.is_over() {
            return Err(MatchError::GameOver.into());
        }
        if !game.is_player_turn(player) {
            debug!("match {id}: {player} ({side}) moved out of turn");
            return Err(MatchError::WrongTurn {
                expected: game.turn(),
            }
            .into());
        }

        let outcome = game.apply_move(from.0, from.1, to.0, to.1)?;
        self.repository.save_match(id, game.to_record());
        Ok(outcome)
    }

    fn load(&self, id: MatchId) -> Result<Match, ServiceError> {
        let record = self
            .repository
            .find_match(id)
            .ok_or(ServiceError::NotFound(id))?;
        Ok(Match::from_record(record)?)
    }
}
