use crate::engine::Move;
use crate::logic::board::{Board, BoardCoordinate, BoardView, Player};
use crate::logic::narrative::{describe_pieces, MoveEvent, NarrativeCounters, Narrator};
use crate::logic::piece::{Piece, PieceKind};
use crate::logic::rules::{
    castling_targets, classify_move, en_passant_target, find_checker, is_square_attacked,
    perform_move, revert_move, validate_kings, MoveError, PositionError, SpecialMove,
};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    WhiteLost,
    BlackLost,
    Stalemate,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    #[must_use]
    pub const fn lost_by(player: Player) -> Self {
        match player {
            Player::White => Self::WhiteLost,
            Player::Black => Self::BlackLost,
        }
    }

    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Self::WhiteLost => Some(Player::Black),
            Self::BlackLost => Some(Player::White),
            Self::Stalemate | Self::InProgress => None,
        }
    }
}

/// Everything needed to take a move back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    /// The moving piece as it stood before the move.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub special: SpecialMove,
    pub prev_king_locations: [BoardCoordinate; 2],
    pub prev_next_id: u16,
    pub simulated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Player,
    move_log: Vec<MoveRecord>,
    king_locations: [BoardCoordinate; 2],
    narrator: Narrator,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        let board = Board::new();
        let king_locations = [
            BoardCoordinate { row: 0, col: 3 },
            BoardCoordinate { row: 7, col: 3 },
        ];
        Self {
            narrator: Narrator::new(&board),
            board,
            turn: Player::White,
            move_log: Vec::new(),
            king_locations,
        }
    }

    /// Starts a game from an arbitrary position with `turn` to move.
    ///
    /// The side not on move must not be in check; its king would be capturable.
    pub fn from_board(board: Board, turn: Player) -> Result<Self, PositionError> {
        let king_locations = validate_kings(&board)?;
        let idle = turn.opposite();
        if is_square_attacked(&board, king_locations[idle.index()], turn) {
            return Err(PositionError::OpponentInCheck(idle));
        }
        Ok(Self {
            narrator: Narrator::new(&board),
            board,
            turn,
            move_log: Vec::new(),
            king_locations,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn whose_turn(&self) -> Player {
        self.turn
    }

    #[must_use]
    pub fn move_log(&self) -> &[MoveRecord] {
        &self.move_log
    }

    #[must_use]
    pub const fn narrative(&self) -> &NarrativeCounters {
        self.narrator.counters()
    }

    #[must_use]
    pub const fn get_number_of_moves_the_knights_made(&self) -> u32 {
        self.narrator.counters().knight_moves
    }

    /// Writes the end-of-game counters to the log.
    pub fn log_summary(&self) {
        self.narrator.log_summary();
    }

    /// # Panics
    /// If the cached square no longer holds `player`'s king.
    #[must_use]
    pub fn king_location(&self, player: Player) -> BoardCoordinate {
        let king = self.king_locations[player.index()];
        assert!(
            self.board
                .piece_at(king)
                .is_some_and(|p| p.kind == PieceKind::King && p.player == player),
            "king cache for {player} points at {king}, which holds no {player} king"
        );
        king
    }

    #[must_use]
    pub fn get_current_player_king_location(&self) -> BoardCoordinate {
        self.king_location(self.turn)
    }

    #[must_use]
    pub fn is_valid_piece(&self, row: usize, col: usize) -> bool {
        BoardCoordinate::new(row, col).is_some_and(|pos| self.board.piece_at(pos).is_some())
    }

    /// `None` both for an empty square and for a square off the board;
    /// use [`GameState::is_valid_piece`] or [`BoardCoordinate::new`] to tell them apart.
    #[must_use]
    pub fn get_piece(&self, row: usize, col: usize) -> Option<Piece> {
        BoardCoordinate::new(row, col).and_then(|pos| self.board.piece_at(pos))
    }

    #[must_use]
    pub fn get_pieces_on_the_board(&self) -> String {
        describe_pieces(&self.board)
    }

    fn last_double_step(&self) -> Option<BoardCoordinate> {
        self.move_log
            .last()
            .filter(|record| record.special == SpecialMove::DoubleStep)
            .map(|record| record.mv.to)
    }

    /// Legal destinations for the piece on `square`, empty if there is none.
    #[must_use]
    pub fn get_valid_moves(&self, square: BoardCoordinate) -> Vec<BoardCoordinate> {
        let Some(piece) = self.board.piece_at(square) else {
            return Vec::new();
        };

        let mut candidates = piece.candidate_moves(&self.board);
        match piece.kind {
            PieceKind::King => candidates.extend(castling_targets(&self.board, &piece)),
            PieceKind::Pawn => {
                candidates.extend(en_passant_target(&self.board, &piece, self.last_double_step()));
            }
            _ => {}
        }

        candidates.retain(|&to| self.leaves_king_safe(&piece, to));
        candidates
    }

    /// Plays the move on a scratch board and checks the mover's king.
    fn leaves_king_safe(&self, piece: &Piece, to: BoardCoordinate) -> bool {
        let special = classify_move(&self.board, piece, to, PieceKind::Queen);
        let mut scratch = self.board.clone();
        perform_move(&mut scratch, piece.position, to, special);

        let king = if piece.kind == PieceKind::King {
            to
        } else {
            self.king_locations[piece.player.index()]
        };
        !is_square_attacked(&scratch, king, piece.player.opposite())
    }

    /// All legal moves of `color`, scanning the board row by row.
    #[must_use]
    pub fn get_all_legal_moves(&self, color: Player) -> Vec<Move> {
        self.board
            .pieces_of(color)
            .flat_map(|piece| {
                self.get_valid_moves(piece.position)
                    .into_iter()
                    .map(move |to| Move::new(piece.position, to))
            })
            .collect()
    }

    #[must_use]
    pub fn has_any_legal_move(&self, color: Player) -> bool {
        self.board
            .pieces_of(color)
            .any(|piece| !self.get_valid_moves(piece.position).is_empty())
    }

    /// Applies a move without checking legality; pawns reaching the last rank become queens.
    ///
    /// `simulate` keeps the narrator out of it. Undo works the same either way.
    pub fn move_piece(
        &mut self,
        from: BoardCoordinate,
        to: BoardCoordinate,
        simulate: bool,
    ) -> Result<(), MoveError> {
        self.move_piece_promoting(from, to, PieceKind::Queen, simulate)
    }

    /// # Panics
    /// If the move captures a king, which legal play never does.
    pub fn move_piece_promoting(
        &mut self,
        from: BoardCoordinate,
        to: BoardCoordinate,
        promotion: PieceKind,
        simulate: bool,
    ) -> Result<(), MoveError> {
        if !promotion.is_promotion_target() {
            return Err(MoveError::InvalidPromotion);
        }
        let piece = self.board.piece_at(from).ok_or(MoveError::NoPieceAtSource)?;

        let special = classify_move(&self.board, &piece, to, promotion);
        let prev_next_id = self.board.next_id();
        let prev_king_locations = self.king_locations;
        let captured = perform_move(&mut self.board, from, to, special);
        assert!(
            captured.map_or(true, |p| p.kind != PieceKind::King),
            "move {from} -> {to} captured a king"
        );

        if piece.kind == PieceKind::King {
            self.king_locations[piece.player.index()] = to;
        }
        let mv = Move::new(from, to);
        self.move_log.push(MoveRecord {
            mv,
            piece,
            captured,
            special,
            prev_king_locations,
            prev_next_id,
            simulated: simulate,
        });
        self.turn = self.turn.opposite();

        if !simulate {
            let gives_check = self.is_in_check(self.turn);
            self.narrator.move_applied(&MoveEvent {
                mv,
                mover: piece.player,
                kind: piece.kind,
                gives_check,
                board: &self.board,
            });
            let status = self.checkmate_stalemate_checker();
            if status.is_over() {
                self.narrator.game_over(status);
                self.narrator.log_summary();
            }
        }
        Ok(())
    }

    /// Validated entry point for human moves. Nothing changes on error.
    pub fn try_move(&mut self, from: BoardCoordinate, to: BoardCoordinate) -> Result<(), MoveError> {
        self.try_move_promoting(from, to, PieceKind::Queen)
    }

    /// Like [`GameState::try_move`] for raw `(row, col)` input such as clicks.
    pub fn try_move_at(&mut self, from: (usize, usize), to: (usize, usize)) -> Result<(), MoveError> {
        let from = BoardCoordinate::new(from.0, from.1).ok_or(MoveError::OutOfBounds)?;
        let to = BoardCoordinate::new(to.0, to.1).ok_or(MoveError::OutOfBounds)?;
        self.try_move(from, to)
    }

    pub fn try_move_promoting(
        &mut self,
        from: BoardCoordinate,
        to: BoardCoordinate,
        promotion: PieceKind,
    ) -> Result<(), MoveError> {
        if !promotion.is_promotion_target() {
            return Err(MoveError::InvalidPromotion);
        }
        if self.checkmate_stalemate_checker().is_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self.board.piece_at(from).ok_or(MoveError::NoPieceAtSource)?;
        if piece.player != self.turn {
            return Err(MoveError::NotYourTurn);
        }
        if !self.get_valid_moves(from).contains(&to) {
            return Err(MoveError::IllegalMove);
        }
        self.move_piece_promoting(from, to, promotion, false)
    }

    /// Takes back the last move. Returns `false` and leaves everything alone when there is none.
    pub fn undo_move(&mut self) -> bool {
        let Some(record) = self.move_log.pop() else {
            return false;
        };

        revert_move(
            &mut self.board,
            record.piece,
            record.mv.to,
            record.captured,
            record.special,
            record.prev_next_id,
        );
        self.king_locations = record.prev_king_locations;
        self.turn = self.turn.opposite();
        if !record.simulated {
            self.narrator.move_undone();
        }
        true
    }

    /// Plays `mv` as a simulated move that is taken back when the guard drops.
    pub fn simulate(&mut self, mv: Move) -> Result<SimulatedMove<'_>, MoveError> {
        self.move_piece(mv.from, mv.to, true)?;
        Ok(SimulatedMove { state: self })
    }

    /// Whether `attacking_player` could capture on `king_location`, and from where.
    #[must_use]
    pub fn check_for_check(
        &self,
        king_location: BoardCoordinate,
        attacking_player: Player,
    ) -> (bool, Option<BoardCoordinate>) {
        let attacker = find_checker(&self.board, king_location, attacking_player);
        (attacker.is_some(), attacker)
    }

    #[must_use]
    pub fn is_in_check(&self, player: Player) -> bool {
        is_square_attacked(&self.board, self.king_location(player), player.opposite())
    }

    /// Decides the game from the point of view of the side to move.
    #[must_use]
    pub fn checkmate_stalemate_checker(&self) -> GameStatus {
        let side = self.turn;
        if self.has_any_legal_move(side) {
            GameStatus::InProgress
        } else if self.is_in_check(side) {
            GameStatus::lost_by(side)
        } else {
            GameStatus::Stalemate
        }
    }
}

/// A simulated move that is undone when this guard goes out of scope.
///
/// Calling `undo_move` through the guard would unbalance the log; don't.
pub struct SimulatedMove<'a> {
    state: &'a mut GameState,
}

impl Deref for SimulatedMove<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.state
    }
}

impl DerefMut for SimulatedMove<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.state
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        self.state.undo_move();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> BoardCoordinate {
        BoardCoordinate::new(row, col).unwrap()
    }

    #[test]
    fn test_undo_move() {
        let mut game = GameState::new();
        let initial = game.clone();

        game.move_piece(sq(1, 4), sq(3, 4), false).unwrap();
        assert_eq!(game.move_log().len(), 1);
        assert_eq!(game.whose_turn(), Player::Black);
        assert!(game.get_piece(1, 4).is_none());
        assert!(game.is_valid_piece(3, 4));

        assert!(game.undo_move());
        assert_eq!(game, initial);
    }

    #[test]
    fn test_undo_capture() {
        let mut game = GameState::new();
        game.move_piece(sq(1, 4), sq(3, 4), false).unwrap();
        game.move_piece(sq(6, 3), sq(4, 3), false).unwrap();
        game.move_piece(sq(3, 4), sq(4, 3), false).unwrap();

        let last = game.move_log().last().unwrap();
        assert_eq!(last.captured.map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(game.board().piece_count(Player::Black), 15);

        assert!(game.undo_move());
        assert_eq!(game.move_log().len(), 2);
        assert_eq!(game.whose_turn(), Player::White);
        let restored = game.get_piece(4, 3).unwrap();
        assert_eq!(restored.player, Player::Black);
        assert_eq!(restored.kind, PieceKind::Pawn);
        assert_eq!(game.get_piece(3, 4).unwrap().player, Player::White);
    }

    #[test]
    fn test_undo_on_empty_log_is_noop() {
        let mut game = GameState::new();
        let initial = game.clone();
        assert!(!game.undo_move());
        assert_eq!(game, initial);
        assert_eq!(game.get_current_player_king_location(), sq(0, 3));
    }

    #[test]
    fn test_opening_has_twenty_moves() {
        let game = GameState::new();
        assert_eq!(game.get_all_legal_moves(Player::White).len(), 20);
        assert_eq!(game.get_all_legal_moves(Player::Black).len(), 20);
        assert_eq!(game.checkmate_stalemate_checker(), GameStatus::InProgress);
    }

    #[test]
    fn test_legal_moves_follow_board_order() {
        let game = GameState::new();
        let moves = game.get_all_legal_moves(Player::White);
        assert_eq!(moves[0], Move::new(sq(0, 1), sq(2, 2)));
        assert_eq!(moves[1], Move::new(sq(0, 1), sq(2, 0)));
        assert_eq!(moves[2], Move::new(sq(0, 6), sq(2, 7)));
        assert_eq!(moves[4], Move::new(sq(1, 0), sq(2, 0)));
        assert_eq!(moves[5], Move::new(sq(1, 0), sq(3, 0)));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_the_line() {
        let mut board = Board::empty();
        board.add_piece(0, 3, PieceKind::King, Player::White);
        board.add_piece(2, 3, PieceKind::Knight, Player::White);
        board.add_piece(7, 3, PieceKind::Rook, Player::Black);
        board.add_piece(7, 7, PieceKind::King, Player::Black);
        let game = GameState::from_board(board, Player::White).unwrap();

        assert!(game.get_valid_moves(sq(2, 3)).is_empty());
        assert!(game
            .get_all_legal_moves(Player::White)
            .iter()
            .all(|mv| mv.from == sq(0, 3)));
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let mut board = Board::empty();
        board.add_piece(0, 3, PieceKind::King, Player::White);
        board.add_piece(7, 2, PieceKind::Rook, Player::Black);
        board.add_piece(7, 7, PieceKind::King, Player::Black);
        let game = GameState::from_board(board, Player::White).unwrap();

        let moves = game.get_valid_moves(sq(0, 3));
        assert!(!moves.contains(&sq(0, 2)));
        assert!(!moves.contains(&sq(1, 2)));
        assert!(moves.contains(&sq(1, 3)));
    }

    #[test]
    fn test_check_for_check_reports_attacker() {
        let mut board = Board::empty();
        board.add_piece(0, 3, PieceKind::King, Player::White);
        board.add_piece(2, 4, PieceKind::Knight, Player::Black);
        board.add_piece(7, 7, PieceKind::King, Player::Black);
        let game = GameState::from_board(board, Player::White).unwrap();

        assert_eq!(
            game.check_for_check(game.get_current_player_king_location(), Player::Black),
            (true, Some(sq(2, 4)))
        );
        assert_eq!(
            game.check_for_check(game.king_location(Player::Black), Player::White),
            (false, None)
        );
    }

    #[test]
    fn test_stalemate_detected() {
        let mut board = Board::empty();
        board.add_piece(0, 0, PieceKind::King, Player::White);
        board.add_piece(2, 2, PieceKind::King, Player::Black);
        board.add_piece(7, 1, PieceKind::Rook, Player::Black);
        let mut game = GameState::from_board(board, Player::Black).unwrap();

        // Rook to (1, 1) covers (0, 1) and (1, 0); the black king guards the rook.
        game.move_piece(sq(7, 1), sq(1, 1), false).unwrap();
        assert!(!game.is_in_check(Player::White));
        assert!(game.get_all_legal_moves(Player::White).is_empty());
        assert_eq!(game.checkmate_stalemate_checker(), GameStatus::Stalemate);
    }

    #[test]
    fn test_checkmate_detected() {
        let mut board = Board::empty();
        board.add_piece(0, 0, PieceKind::King, Player::White);
        board.add_piece(2, 1, PieceKind::King, Player::Black);
        board.add_piece(7, 7, PieceKind::Rook, Player::Black);
        let mut game = GameState::from_board(board, Player::Black).unwrap();

        game.move_piece(sq(7, 7), sq(0, 7), false).unwrap();
        assert!(game.is_in_check(Player::White));
        assert_eq!(game.checkmate_stalemate_checker(), GameStatus::WhiteLost);
        assert_eq!(GameStatus::WhiteLost.winner(), Some(Player::Black));
    }

    #[test]
    fn test_try_move_rejects_without_mutation() {
        let mut game = GameState::new();
        let initial = game.clone();

        assert_eq!(game.try_move(sq(1, 4), sq(4, 4)), Err(MoveError::IllegalMove));
        assert_eq!(game.try_move(sq(6, 4), sq(5, 4)), Err(MoveError::NotYourTurn));
        assert_eq!(game.try_move(sq(3, 3), sq(4, 3)), Err(MoveError::NoPieceAtSource));
        assert_eq!(game.try_move_at((8, 0), (2, 0)), Err(MoveError::OutOfBounds));
        assert_eq!(
            game.try_move_promoting(sq(1, 4), sq(2, 4), PieceKind::King),
            Err(MoveError::InvalidPromotion)
        );
        assert_eq!(game, initial);

        assert_eq!(game.try_move_at((1, 4), (3, 4)), Ok(()));
        assert_eq!(game.whose_turn(), Player::Black);
    }

    #[test]
    fn test_get_piece_distinguishes_empty_from_off_board() {
        let game = GameState::new();
        assert!(game.get_piece(4, 4).is_none());
        assert!(!game.is_valid_piece(4, 4));
        assert!(!game.is_valid_piece(9, 9));
        assert!(BoardCoordinate::new(4, 4).is_some());
        assert!(BoardCoordinate::new(9, 9).is_none());
    }

    #[test]
    fn test_castling_moves_rook_and_undoes() {
        let mut board = Board::empty();
        board.add_piece(0, 3, PieceKind::King, Player::White);
        board.add_piece(0, 0, PieceKind::Rook, Player::White);
        board.add_piece(0, 7, PieceKind::Rook, Player::White);
        board.add_piece(7, 3, PieceKind::King, Player::Black);
        let mut game = GameState::from_board(board, Player::White).unwrap();
        let initial = game.clone();

        let moves = game.get_valid_moves(sq(0, 3));
        assert!(moves.contains(&sq(0, 1)));
        assert!(moves.contains(&sq(0, 5)));

        game.try_move(sq(0, 3), sq(0, 5)).unwrap();
        assert_eq!(game.get_piece(0, 5).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(game.get_piece(0, 4).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(game.get_piece(0, 7).is_none());
        assert_eq!(game.king_location(Player::White), sq(0, 5));

        assert!(game.undo_move());
        assert_eq!(game, initial);
    }

    #[test]
    fn test_en_passant_capture_and_undo() {
        let mut game = GameState::new();
        game.try_move(sq(1, 4), sq(3, 4)).unwrap();
        game.try_move(sq(6, 0), sq(5, 0)).unwrap();
        game.try_move(sq(3, 4), sq(4, 4)).unwrap();
        game.try_move(sq(6, 5), sq(4, 5)).unwrap();
        let before = game.clone();

        assert!(game.get_valid_moves(sq(4, 4)).contains(&sq(5, 5)));
        game.try_move(sq(4, 4), sq(5, 5)).unwrap();
        assert!(game.get_piece(4, 5).is_none());
        assert_eq!(game.board().piece_count(Player::Black), 15);

        assert!(game.undo_move());
        assert_eq!(game, before);
    }

    #[test]
    fn test_en_passant_expires_after_one_move() {
        let mut game = GameState::new();
        game.try_move(sq(1, 4), sq(3, 4)).unwrap();
        game.try_move(sq(6, 0), sq(5, 0)).unwrap();
        game.try_move(sq(3, 4), sq(4, 4)).unwrap();
        game.try_move(sq(6, 5), sq(4, 5)).unwrap();
        game.try_move(sq(1, 0), sq(2, 0)).unwrap();
        game.try_move(sq(5, 0), sq(4, 0)).unwrap();
        assert!(!game.get_valid_moves(sq(4, 4)).contains(&sq(5, 5)));
    }

    #[test]
    fn test_promotion_and_undo() {
        let mut board = Board::empty();
        board.add_piece(0, 3, PieceKind::King, Player::White);
        board.add_piece(6, 0, PieceKind::Pawn, Player::White);
        board.add_piece(7, 7, PieceKind::King, Player::Black);
        let mut game = GameState::from_board(board, Player::White).unwrap();
        let initial = game.clone();

        game.try_move_promoting(sq(6, 0), sq(7, 0), PieceKind::Knight).unwrap();
        assert_eq!(game.get_piece(7, 0).map(|p| p.kind), Some(PieceKind::Knight));

        assert!(game.undo_move());
        assert_eq!(game, initial);

        game.move_piece(sq(6, 0), sq(7, 0), true).unwrap();
        assert_eq!(game.get_piece(7, 0).map(|p| p.kind), Some(PieceKind::Queen));
    }

    #[test]
    fn test_simulated_move_is_undone_on_drop() {
        let mut game = GameState::new();
        let initial = game.clone();
        {
            let child = game.simulate(Move::new(sq(1, 3), sq(3, 3))).unwrap();
            assert_eq!(child.whose_turn(), Player::Black);
            assert_eq!(child.move_log().len(), 1);
        }
        assert_eq!(game, initial);
    }

    #[test]
    fn test_narrator_ignores_simulated_moves_and_rolls_back() {
        let mut game = GameState::new();
        game.move_piece(sq(0, 1), sq(2, 2), false).unwrap();
        assert_eq!(game.get_number_of_moves_the_knights_made(), 1);
        assert_eq!(game.narrative().moves_played, 1);
        assert_eq!(game.narrative().white_intact_turns, 1);

        game.move_piece(sq(7, 1), sq(5, 2), true).unwrap();
        assert_eq!(game.narrative().knight_moves, 1);
        game.undo_move();

        game.undo_move();
        assert_eq!(*game.narrative(), NarrativeCounters::default());
    }

    #[test]
    fn test_from_board_requires_one_king_each() {
        let mut board = Board::empty();
        board.add_piece(0, 3, PieceKind::King, Player::White);
        assert_eq!(
            GameState::from_board(board, Player::White).unwrap_err(),
            PositionError::MissingKing(Player::Black)
        );
    }

    #[test]
    fn test_from_board_rejects_capturable_king() {
        let mut board = Board::empty();
        board.add_piece(0, 3, PieceKind::King, Player::White);
        board.add_piece(5, 3, PieceKind::Rook, Player::White);
        board.add_piece(7, 3, PieceKind::King, Player::Black);
        assert_eq!(
            GameState::from_board(board.clone(), Player::White).unwrap_err(),
            PositionError::OpponentInCheck(Player::Black)
        );

        // Same position with black on move is an ordinary check.
        let game = GameState::from_board(board, Player::Black).unwrap();
        assert!(game.is_in_check(Player::Black));
        assert!(game
            .get_all_legal_moves(Player::Black)
            .iter()
            .all(|mv| mv.to.col != 3));
    }

    #[test]
    fn test_reset_restores_opening() {
        let mut game = GameState::new();
        game.move_piece(sq(1, 4), sq(3, 4), false).unwrap();
        game.reset();
        assert_eq!(game, GameState::new());
    }
}
