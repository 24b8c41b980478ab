use crate::logic::board::{BoardCoordinate, BoardView, Player};
use serde::{Deserialize, Serialize};
use std::fmt;

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, 1),
    (2, -1),
];

const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const QUEEN_DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Lowercase letter used in board diagrams.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Kinds a pawn may turn into on the last rank.
    #[must_use]
    pub const fn is_promotion_target(self) -> bool {
        matches!(self, Self::Knight | Self::Bishop | Self::Rook | Self::Queen)
    }
}

/// Identity of a single piece instance, stable for its whole life on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub player: Player,
    pub position: BoardCoordinate,
    pub id: PieceId,
    pub moves_made: u16,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, player: Player, position: BoardCoordinate, id: PieceId) -> Self {
        Self {
            kind,
            player,
            position,
            id,
            moves_made: 0,
        }
    }

    #[must_use]
    pub const fn has_moved(&self) -> bool {
        self.moves_made > 0
    }

    /// Empty squares this piece can reach. Check safety is left to the game state.
    pub fn peaceful_moves(&self, board: &impl BoardView) -> Vec<BoardCoordinate> {
        match self.kind {
            PieceKind::Pawn => self.pawn_pushes(board),
            PieceKind::Knight => self.step_moves(board, &KNIGHT_OFFSETS, false),
            PieceKind::King => self.step_moves(board, &KING_OFFSETS, false),
            PieceKind::Bishop => self.slide_moves(board, &BISHOP_DIRECTIONS, false),
            PieceKind::Rook => self.slide_moves(board, &ROOK_DIRECTIONS, false),
            PieceKind::Queen => self.slide_moves(board, &QUEEN_DIRECTIONS, false),
        }
    }

    /// Squares held by an opposing piece that this piece can take.
    pub fn capture_moves(&self, board: &impl BoardView) -> Vec<BoardCoordinate> {
        match self.kind {
            PieceKind::Pawn => self
                .pawn_diagonals()
                .filter(|&target| self.is_enemy_at(board, target))
                .collect(),
            PieceKind::Knight => self.step_moves(board, &KNIGHT_OFFSETS, true),
            PieceKind::King => self.step_moves(board, &KING_OFFSETS, true),
            PieceKind::Bishop => self.slide_moves(board, &BISHOP_DIRECTIONS, true),
            PieceKind::Rook => self.slide_moves(board, &ROOK_DIRECTIONS, true),
            PieceKind::Queen => self.slide_moves(board, &QUEEN_DIRECTIONS, true),
        }
    }

    /// Every peaceful move followed by every capture.
    pub fn candidate_moves(&self, board: &impl BoardView) -> Vec<BoardCoordinate> {
        let mut moves = self.peaceful_moves(board);
        moves.extend(self.capture_moves(board));
        moves
    }

    /// Squares this piece threatens whatever stands on them.
    pub fn attacks(&self, board: &impl BoardView) -> Vec<BoardCoordinate> {
        let offsets: &[(isize, isize)] = match self.kind {
            PieceKind::Pawn => return self.pawn_diagonals().collect(),
            PieceKind::Knight => &KNIGHT_OFFSETS,
            PieceKind::King => &KING_OFFSETS,
            PieceKind::Bishop => return self.rays(board, &BISHOP_DIRECTIONS),
            PieceKind::Rook => return self.rays(board, &ROOK_DIRECTIONS),
            PieceKind::Queen => return self.rays(board, &QUEEN_DIRECTIONS),
        };
        offsets
            .iter()
            .filter_map(|&(dr, dc)| self.position.offset(dr, dc))
            .collect()
    }

    /// Row delta of a forward pawn step for this piece's owner.
    #[must_use]
    pub const fn forward(&self) -> isize {
        match self.player {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    fn is_enemy_at(&self, board: &impl BoardView, target: BoardCoordinate) -> bool {
        board
            .piece_at(target)
            .is_some_and(|other| other.player != self.player)
    }

    fn pawn_pushes(&self, board: &impl BoardView) -> Vec<BoardCoordinate> {
        let mut moves = Vec::with_capacity(2);
        let Some(one) = self.position.offset(self.forward(), 0) else {
            return moves;
        };
        if board.piece_at(one).is_some() {
            return moves;
        }
        moves.push(one);

        if self.position.row == self.player.pawn_row() {
            if let Some(two) = one.offset(self.forward(), 0) {
                if board.piece_at(two).is_none() {
                    moves.push(two);
                }
            }
        }
        moves
    }

    fn pawn_diagonals(&self) -> impl Iterator<Item = BoardCoordinate> + '_ {
        [-1, 1]
            .into_iter()
            .filter_map(move |dc| self.position.offset(self.forward(), dc))
    }

    fn step_moves(
        &self,
        board: &impl BoardView,
        offsets: &[(isize, isize)],
        captures: bool,
    ) -> Vec<BoardCoordinate> {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| self.position.offset(dr, dc))
            .filter(|&target| match board.piece_at(target) {
                None => !captures,
                Some(other) => captures && other.player != self.player,
            })
            .collect()
    }

    fn slide_moves(
        &self,
        board: &impl BoardView,
        directions: &[(isize, isize)],
        captures: bool,
    ) -> Vec<BoardCoordinate> {
        let mut moves = Vec::new();
        for &(dr, dc) in directions {
            let mut cursor = self.position.offset(dr, dc);
            while let Some(target) = cursor {
                match board.piece_at(target) {
                    None => {
                        if !captures {
                            moves.push(target);
                        }
                    }
                    Some(other) => {
                        if captures && other.player != self.player {
                            moves.push(target);
                        }
                        break;
                    }
                }
                cursor = target.offset(dr, dc);
            }
        }
        moves
    }

    fn rays(&self, board: &impl BoardView, directions: &[(isize, isize)]) -> Vec<BoardCoordinate> {
        let mut squares = Vec::new();
        for &(dr, dc) in directions {
            let mut cursor = self.position.offset(dr, dc);
            while let Some(target) = cursor {
                squares.push(target);
                if board.piece_at(target).is_some() {
                    break;
                }
                cursor = target.offset(dr, dc);
            }
        }
        squares
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} at {}", self.player, self.kind.name(), self.position)
    }
}
