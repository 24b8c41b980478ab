use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Player};
use std::sync::Arc;

/// Pure material count; no piece-square or mobility terms.
pub struct MaterialEvaluator {
    config: Arc<EngineConfig>,
}

impl MaterialEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board, human: Player) -> i32 {
        board
            .pieces()
            .map(|piece| {
                let value = self.config.piece_value(piece.kind);
                if piece.player == human {
                    -value
                } else {
                    value
                }
            })
            .sum()
    }
}
