use chess_core::engine::config::EngineConfig;
use chess_core::engine::search::MinimaxEngine;
use chess_core::engine::Searcher;
use chess_core::logic::board::{BoardCoordinate, Player};
use chess_core::logic::game::{GameState, GameStatus};
use chess_core::logic::rules::MoveError;
use std::sync::Arc;

fn play_fools_mate() -> GameState {
    let mut game = GameState::new();
    let line = [((1, 2), (2, 2)), ((6, 3), (4, 3)), ((1, 1), (3, 1)), ((7, 4), (3, 0))];
    for (from, to) in line {
        game.try_move_at(from, to).unwrap();
    }
    game
}

#[test]
fn test_fools_mate_ends_the_game() {
    let game = play_fools_mate();
    assert_eq!(game.checkmate_stalemate_checker(), GameStatus::WhiteLost);
    assert_eq!(game.checkmate_stalemate_checker().winner(), Some(Player::Black));

    let (in_check, attacker) =
        game.check_for_check(game.get_current_player_king_location(), Player::Black);
    assert!(in_check);
    assert_eq!(attacker, BoardCoordinate::new(3, 0));
}

#[test]
fn test_no_moves_after_mate() {
    let mut game = play_fools_mate();
    assert!(game.get_all_legal_moves(Player::White).is_empty());
    assert_eq!(game.try_move_at((1, 4), (2, 4)), Err(MoveError::GameOver));

    let mut engine = MinimaxEngine::new(Arc::new(EngineConfig::default()));
    assert!(engine.search(&mut game, Player::White).is_none());
}

#[test]
fn test_undo_reopens_the_game() {
    let mut game = play_fools_mate();
    assert!(game.undo_move());
    assert_eq!(game.checkmate_stalemate_checker(), GameStatus::InProgress);
    assert_eq!(game.whose_turn(), Player::Black);
    assert_eq!(game.narrative().moves_played, 3);
}
