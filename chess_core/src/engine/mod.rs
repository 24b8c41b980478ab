use crate::logic::board::{Board, BoardCoordinate, Player};
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod search;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: BoardCoordinate,
    pub to: BoardCoordinate,
}

impl Move {
    #[must_use]
    pub const fn new(from: BoardCoordinate, to: BoardCoordinate) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub score: i32,
    pub time_ms: u64,
}

/// Static scoring of a position. Positive favours the side that is not `human`.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, human: Player) -> i32;
}

pub trait Searcher {
    /// Picks a move for `ai`, who must be the side to move.
    ///
    /// The state is mutated during the search and restored before returning.
    /// `None` when the game is already decided.
    fn search(&mut self, game_state: &mut GameState, ai: Player) -> Option<(Move, SearchStats)>;
}
