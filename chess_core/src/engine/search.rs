use crate::engine::config::EngineConfig;
use crate::engine::eval::MaterialEvaluator;
use crate::engine::{Evaluator, Move, SearchStats, Searcher};
use crate::logic::board::Player;
use crate::logic::game::{GameState, GameStatus};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

/// Result of a minimax node. Only the root call ever produces a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Value(i32),
    BestMove { mv: Move, score: i32 },
}

impl SearchOutcome {
    #[must_use]
    pub const fn score(self) -> i32 {
        match self {
            Self::Value(score) | Self::BestMove { score, .. } => score,
        }
    }

    #[must_use]
    pub const fn best_move(self) -> Option<Move> {
        match self {
            Self::BestMove { mv, .. } => Some(mv),
            Self::Value(_) => None,
        }
    }
}

/// Depth-limited minimax with alpha-beta pruning over a live [`GameState`].
///
/// Scores are from the engine's side: positive is good for the player the
/// engine is choosing a move for, whichever colour that is.
pub struct MinimaxEngine {
    config: Arc<EngineConfig>,
    evaluator: MaterialEvaluator,
    ai: Player,
    nodes_searched: u32,
}

impl MinimaxEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: MaterialEvaluator::new(config.clone()),
            config,
            ai: Player::Black,
            nodes_searched: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = MaterialEvaluator::new(config.clone());
        self.config = config;
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn nodes_searched(&self) -> u32 {
        self.nodes_searched
    }

    /// Root call. `color` is the side to move; the engine plays `color` when
    /// `maximizing`, otherwise its opponent.
    ///
    /// Returns [`SearchOutcome::BestMove`] unless the position is already
    /// decided or `depth` is zero, in which case only a value comes back.
    pub fn select_move(
        &mut self,
        state: &mut GameState,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
        color: Player,
    ) -> SearchOutcome {
        self.ai = if maximizing { color } else { color.opposite() };
        self.nodes_searched = 0;
        self.minimax(state, depth, alpha, beta, maximizing, color, true)
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        to_move: Player,
        root: bool,
    ) -> SearchOutcome {
        self.nodes_searched += 1;

        match state.checkmate_stalemate_checker() {
            GameStatus::InProgress => {}
            GameStatus::Stalemate => return SearchOutcome::Value(self.config.stalemate_score),
            status if status == GameStatus::lost_by(self.ai) => {
                return SearchOutcome::Value(-self.config.win_score)
            }
            _ => return SearchOutcome::Value(self.config.win_score),
        }

        if depth == 0 {
            let human = self.ai.opposite();
            return SearchOutcome::Value(self.evaluator.evaluate(state.board(), human));
        }

        debug_assert_eq!(to_move, state.whose_turn(), "search lost track of the side to move");

        let mut best_value = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_move = None;

        for mv in state.get_all_legal_moves(to_move) {
            let value = {
                let mut child = state
                    .simulate(mv)
                    .expect("legal moves always start on an occupied square");
                self.minimax(
                    &mut child,
                    depth - 1,
                    alpha,
                    beta,
                    !maximizing,
                    to_move.opposite(),
                    false,
                )
                .score()
            };

            if maximizing {
                if value > best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                alpha = alpha.max(value);
            } else {
                if value < best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                beta = beta.min(value);
            }

            if self.config.alpha_beta && beta <= alpha {
                break;
            }
        }

        match best_move {
            Some(mv) if root => SearchOutcome::BestMove {
                mv,
                score: best_value,
            },
            _ => SearchOutcome::Value(best_value),
        }
    }
}

impl Searcher for MinimaxEngine {
    fn search(&mut self, game_state: &mut GameState, ai: Player) -> Option<(Move, SearchStats)> {
        if game_state.whose_turn() != ai {
            warn!("asked to move for {ai} while {} is on move", game_state.whose_turn());
            return None;
        }

        let start = Instant::now();
        let depth = self.config.depth;
        let bound = self.config.search_bound;
        let outcome = self.select_move(game_state, depth, -bound, bound, true, ai);

        let SearchOutcome::BestMove { mv, score } = outcome else {
            debug!("no move for {ai}: position value {}", outcome.score());
            return None;
        };

        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            score,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        debug!(
            "{ai} plays {mv} (score {score}, depth {depth}, {} nodes, {} ms)",
            stats.nodes, stats.time_ms
        );
        Some((mv, stats))
    }
}
