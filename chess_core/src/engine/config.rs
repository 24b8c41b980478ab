use crate::logic::piece::PieceKind;
use serde::{Deserialize, Serialize};

pub const VAL_PAWN: i32 = 10;
pub const VAL_KNIGHT: i32 = 30;
pub const VAL_BISHOP: i32 = 30;
pub const VAL_ROOK: i32 = 50;
pub const VAL_QUEEN: i32 = 100;
pub const VAL_KING: i32 = 1000;

/// Score of a decided game; dwarfs any material total.
pub const WIN_SCORE: i32 = 5_000_000;
pub const STALEMATE_SCORE: i32 = 100;
/// Initial alpha-beta window half-width; wider than any reachable score.
pub const SEARCH_BOUND: i32 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_pawn: i32,
    pub val_knight: i32,
    pub val_bishop: i32,
    pub val_rook: i32,
    pub val_queen: i32,
    pub val_king: i32,

    // Search Parameters
    pub depth: u8,
    pub alpha_beta: bool, // false: plain minimax, same result, more nodes
    pub win_score: i32,
    pub stalemate_score: i32,
    pub search_bound: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_pawn: VAL_PAWN,
            val_knight: VAL_KNIGHT,
            val_bishop: VAL_BISHOP,
            val_rook: VAL_ROOK,
            val_queen: VAL_QUEEN,
            val_king: VAL_KING,

            depth: 3,
            alpha_beta: true,
            win_score: WIN_SCORE,
            stalemate_score: STALEMATE_SCORE,
            search_bound: SEARCH_BOUND,
        }
    }
}

impl EngineConfig {
    /// Reads a config from JSON; missing fields keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    #[must_use]
    pub const fn piece_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.val_pawn,
            PieceKind::Knight => self.val_knight,
            PieceKind::Bishop => self.val_bishop,
            PieceKind::Rook => self.val_rook,
            PieceKind::Queen => self.val_queen,
            PieceKind::King => self.val_king,
        }
    }
}
