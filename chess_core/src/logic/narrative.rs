//! Game narration kept apart from the rules engine.
//!
//! The game state notifies the [`Narrator`] after every real move and every
//! undo of a real move; simulated moves played by the search never reach it.

use crate::engine::Move;
use crate::logic::board::{Board, Player};
use crate::logic::game::GameStatus;
use crate::logic::piece::PieceKind;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeCounters {
    pub moves_played: u32,
    pub checks_delivered: u32,
    pub knight_moves: u32,
    /// Moves after which white still had every piece it started with.
    pub white_intact_turns: u32,
    pub black_intact_turns: u32,
}

/// What the narrator is told about a move that was just played.
pub struct MoveEvent<'a> {
    pub mv: Move,
    pub mover: Player,
    pub kind: PieceKind,
    pub gives_check: bool,
    pub board: &'a Board,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrator {
    counters: NarrativeCounters,
    starting_pieces: [usize; 2],
    snapshots: Vec<NarrativeCounters>,
}

impl Narrator {
    #[must_use]
    pub fn new(board: &Board) -> Self {
        Self {
            counters: NarrativeCounters::default(),
            starting_pieces: [
                board.piece_count(Player::White),
                board.piece_count(Player::Black),
            ],
            snapshots: Vec::new(),
        }
    }

    #[must_use]
    pub const fn counters(&self) -> &NarrativeCounters {
        &self.counters
    }

    pub fn move_applied(&mut self, event: &MoveEvent<'_>) {
        self.snapshots.push(self.counters);

        let counters = &mut self.counters;
        counters.moves_played += 1;
        if event.gives_check {
            counters.checks_delivered += 1;
        }
        if event.kind == PieceKind::Knight {
            counters.knight_moves += 1;
        }
        if event.board.piece_count(Player::White) >= self.starting_pieces[Player::White.index()] {
            counters.white_intact_turns += 1;
        }
        if event.board.piece_count(Player::Black) >= self.starting_pieces[Player::Black.index()] {
            counters.black_intact_turns += 1;
        }

        if log::log_enabled!(log::Level::Info) {
            info!(
                "After move #{} ({} {} {} -> {}) the pieces on the board are: {}",
                counters.moves_played,
                event.mover,
                event.kind.name(),
                event.mv.from,
                event.mv.to,
                describe_pieces(event.board)
            );
            if event.gives_check {
                info!("{} gives check", event.mover);
            }
        }
    }

    /// Rolls the counters back to where they were before the last real move.
    pub fn move_undone(&mut self) {
        if let Some(previous) = self.snapshots.pop() {
            self.counters = previous;
        }
    }

    pub fn game_over(&self, status: GameStatus) {
        match status {
            GameStatus::WhiteLost => info!("PLAYER_2 (black) won."),
            GameStatus::BlackLost => info!("PLAYER_1 (white) won."),
            GameStatus::Stalemate => info!("Stalemate."),
            GameStatus::InProgress => {}
        }
    }

    pub fn log_summary(&self) {
        let c = &self.counters;
        info!("The amount of checks that were in the game: {}", c.checks_delivered);
        info!("The number of moves the knights made: {}", c.knight_moves);
        info!(
            "The number of turns that all the pieces of the white color survived is: {}",
            c.white_intact_turns
        );
        info!(
            "The number of turns that all the pieces of the black color survived is: {}",
            c.black_intact_turns
        );
    }
}

/// Human-readable list of every piece, row-major.
#[must_use]
pub fn describe_pieces(board: &Board) -> String {
    board
        .pieces()
        .map(|piece| piece.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
