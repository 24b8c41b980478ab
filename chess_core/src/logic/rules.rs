use crate::logic::board::{Board, BoardCoordinate, BoardView, Player};
use crate::logic::piece::{Piece, PieceKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("square is off the board")]
    OutOfBounds,
    #[error("no piece on the source square")]
    NoPieceAtSource,
    #[error("that piece belongs to the side not on move")]
    NotYourTurn,
    #[error("move is not legal in this position")]
    IllegalMove,
    #[error("pawns can only promote to a knight, bishop, rook or queen")]
    InvalidPromotion,
    #[error("the game is already over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("{0} has no king")]
    MissingKing(Player),
    #[error("{0} has more than one king")]
    TooManyKings(Player),
    #[error("{0} is in check but not on move")]
    OpponentInCheck(Player),
}

/// Side effects of a move beyond relocating one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialMove {
    None,
    DoubleStep,
    EnPassant { captured_at: BoardCoordinate },
    Castle {
        rook_from: BoardCoordinate,
        rook_to: BoardCoordinate,
    },
    Promotion { into: PieceKind },
}

/// Works out which special rule, if any, a move of `piece` to `to` triggers.
#[must_use]
pub fn classify_move(
    board: &Board,
    piece: &Piece,
    to: BoardCoordinate,
    promotion: PieceKind,
) -> SpecialMove {
    let from = piece.position;
    match piece.kind {
        PieceKind::King if from.col.abs_diff(to.col) == 2 => {
            castle_rook_squares(piece.player, from, to).map_or(SpecialMove::None, |(rook_from, rook_to)| {
                SpecialMove::Castle { rook_from, rook_to }
            })
        }
        PieceKind::Pawn if to.row == piece.player.promotion_row() => {
            SpecialMove::Promotion { into: promotion }
        }
        PieceKind::Pawn if from.row.abs_diff(to.row) == 2 => SpecialMove::DoubleStep,
        PieceKind::Pawn if from.col != to.col && board.piece_at(to).is_none() => {
            match BoardCoordinate::new(from.row, to.col) {
                Some(captured_at) => SpecialMove::EnPassant { captured_at },
                None => SpecialMove::None,
            }
        }
        _ => SpecialMove::None,
    }
}

/// Rook origin and destination for a king stepping two columns along its back rank.
fn castle_rook_squares(
    player: Player,
    king_from: BoardCoordinate,
    king_to: BoardCoordinate,
) -> Option<(BoardCoordinate, BoardCoordinate)> {
    let row = player.back_row();
    if king_from.row != row || king_to.row != row {
        return None;
    }
    if king_to.col < king_from.col {
        Some((BoardCoordinate::new(row, 0)?, king_to.offset(0, 1)?))
    } else {
        Some((BoardCoordinate::new(row, 7)?, king_to.offset(0, -1)?))
    }
}

/// Applies `special` together with the plain relocation and returns the captured piece.
///
/// The board's piece-id counter advances on promotion; callers that want to
/// revert the move must remember it beforehand.
pub fn perform_move(
    board: &mut Board,
    from: BoardCoordinate,
    to: BoardCoordinate,
    special: SpecialMove,
) -> Option<Piece> {
    let mut captured = board.relocate(from, to);
    match special {
        SpecialMove::EnPassant { captured_at } => {
            captured = board.take(captured_at);
        }
        SpecialMove::Castle { rook_from, rook_to } => {
            board.relocate(rook_from, rook_to);
        }
        SpecialMove::Promotion { into } => {
            if let Some(pawn) = board.take(to) {
                board.place(to, into, pawn.player);
            }
        }
        SpecialMove::None | SpecialMove::DoubleStep => {}
    }
    captured
}

/// Reverses [`perform_move`]. `moved` is the moving piece as it was before the move.
pub fn revert_move(
    board: &mut Board,
    moved: Piece,
    to: BoardCoordinate,
    captured: Option<Piece>,
    special: SpecialMove,
    next_id: u16,
) {
    board.take(to);
    board.put(moved);
    if let SpecialMove::Castle { rook_from, rook_to } = special {
        if let Some(mut rook) = board.take(rook_to) {
            rook.position = rook_from;
            rook.moves_made -= 1;
            board.put(rook);
        }
    }
    if let Some(piece) = captured {
        board.put(piece);
    }
    board.set_next_id(next_id);
}

/// True iff any piece of `by` threatens `target`, whatever stands on it.
#[must_use]
pub fn is_square_attacked(board: &Board, target: BoardCoordinate, by: Player) -> bool {
    board
        .pieces_of(by)
        .any(|piece| piece.attacks(board).contains(&target))
}

/// First piece of `attacker` (row-major) that could capture on `king_location`.
#[must_use]
pub fn find_checker(
    board: &Board,
    king_location: BoardCoordinate,
    attacker: Player,
) -> Option<BoardCoordinate> {
    board
        .pieces_of(attacker)
        .find(|piece| piece.capture_moves(board).contains(&king_location))
        .map(|piece| piece.position)
}

/// Checks whether `player`'s king is attacked on `board`.
#[must_use]
pub fn is_in_check(board: &Board, player: Player) -> bool {
    board
        .king_squares(player)
        .into_iter()
        .any(|king| is_square_attacked(board, king, player.opposite()))
}

/// Castling destinations currently open to the king on `king`.
///
/// Covers everything except the destination square being attacked, which the
/// regular self-check filter rejects.
#[must_use]
pub fn castling_targets(board: &Board, king: &Piece) -> Vec<BoardCoordinate> {
    let mut targets = Vec::with_capacity(2);
    let row = king.player.back_row();
    if king.kind != PieceKind::King || king.has_moved() || king.position.row != row {
        return targets;
    }
    let enemy = king.player.opposite();
    if is_square_attacked(board, king.position, enemy) {
        return targets;
    }

    for rook_col in [0, 7] {
        let Some(rook_sq) = BoardCoordinate::new(row, rook_col) else {
            continue;
        };
        let rook_ready = board.piece_at(rook_sq).is_some_and(|rook| {
            rook.kind == PieceKind::Rook && rook.player == king.player && !rook.has_moved()
        });
        if !rook_ready {
            continue;
        }

        let (low, high) = if rook_col < king.position.col {
            (rook_col + 1, king.position.col)
        } else {
            (king.position.col + 1, rook_col)
        };
        let path_clear = (low..high).all(|col| {
            BoardCoordinate::new(row, col).is_some_and(|pos| board.piece_at(pos).is_none())
        });
        if !path_clear {
            continue;
        }

        let step: isize = if rook_col < king.position.col { -1 } else { 1 };
        let (Some(passing), Some(landing)) = (
            king.position.offset(0, step),
            king.position.offset(0, 2 * step),
        ) else {
            continue;
        };
        if !is_square_attacked(board, passing, enemy) {
            targets.push(landing);
        }
    }
    targets
}

/// Square a pawn on `pawn` may capture en passant onto, given the last move played.
#[must_use]
pub fn en_passant_target(
    board: &Board,
    pawn: &Piece,
    last_double_step: Option<BoardCoordinate>,
) -> Option<BoardCoordinate> {
    if pawn.kind != PieceKind::Pawn {
        return None;
    }
    let victim_sq = last_double_step?;
    if victim_sq.row != pawn.position.row || victim_sq.col.abs_diff(pawn.position.col) != 1 {
        return None;
    }
    let victim = board.piece_at(victim_sq)?;
    if victim.kind != PieceKind::Pawn || victim.player == pawn.player {
        return None;
    }
    let landing = victim_sq.offset(pawn.forward(), 0)?;
    board.piece_at(landing).is_none().then_some(landing)
}

/// Confirms the one-king-per-side invariant.
pub fn validate_kings(board: &Board) -> Result<[BoardCoordinate; 2], PositionError> {
    let mut kings = [BoardCoordinate { row: 0, col: 0 }; 2];
    for player in [Player::White, Player::Black] {
        match board.king_squares(player).as_slice() {
            [] => return Err(PositionError::MissingKing(player)),
            [only] => kings[player.index()] = *only,
            _ => return Err(PositionError::TooManyKings(player)),
        }
    }
    Ok(kings)
}
