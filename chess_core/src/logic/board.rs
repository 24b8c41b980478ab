use crate::logic::piece::{Piece, PieceId, PieceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 8;

/// Back rank from column 0 to column 7, identical for both sides.
const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::King,
    PieceKind::Queen,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    #[must_use]
    pub const fn back_row(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => BOARD_SIZE - 1,
        }
    }

    #[must_use]
    pub const fn pawn_row(self) -> usize {
        match self {
            Self::White => 1,
            Self::Black => BOARD_SIZE - 2,
        }
    }

    /// Row on which this side's pawns promote.
    #[must_use]
    pub const fn promotion_row(self) -> usize {
        self.opposite().back_row()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "white"),
            Self::Black => write!(f, "black"),
        }
    }
}

/// A square that is known to lie on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardCoordinate {
    pub row: usize,
    pub col: usize,
}

impl BoardCoordinate {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Self::new(
            self.row.checked_add_signed(d_row)?,
            self.col.checked_add_signed(d_col)?,
        )
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Self { row, col }))
    }
}

impl fmt::Display for BoardCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Read-only square lookup. Pieces only ever see the board through this.
pub trait BoardView {
    fn piece_at(&self, pos: BoardCoordinate) -> Option<Piece>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    next_id: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardView for Board {
    fn piece_at(&self, pos: BoardCoordinate) -> Option<Piece> {
        self.grid[pos.row][pos.col]
    }
}

impl Board {
    /// Standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
            next_id: 0,
        }
    }

    fn setup_initial_position(&mut self) {
        for player in [Player::White, Player::Black] {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                self.add_piece(player.back_row(), col, kind, player);
            }
            for col in 0..BOARD_SIZE {
                self.add_piece(player.pawn_row(), col, PieceKind::Pawn, player);
            }
        }
    }

    /// Creates a fresh piece on the square, replacing whatever stood there.
    ///
    /// # Panics
    /// If `row` or `col` is off the board.
    pub fn add_piece(&mut self, row: usize, col: usize, kind: PieceKind, player: Player) -> PieceId {
        let pos = BoardCoordinate::new(row, col)
            .unwrap_or_else(|| panic!("square ({row}, {col}) is off the board"));
        self.place(pos, kind, player)
    }

    pub fn place(&mut self, pos: BoardCoordinate, kind: PieceKind, player: Player) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.put(Piece::new(kind, player, pos, id));
        id
    }

    /// Puts an existing piece back on its recorded square.
    pub fn put(&mut self, piece: Piece) {
        self.grid[piece.position.row][piece.position.col] = Some(piece);
    }

    pub fn take(&mut self, pos: BoardCoordinate) -> Option<Piece> {
        self.grid[pos.row][pos.col].take()
    }

    #[must_use]
    pub fn get_piece(&self, pos: BoardCoordinate) -> Option<Piece> {
        self.piece_at(pos)
    }

    #[must_use]
    pub const fn next_id(&self) -> u16 {
        self.next_id
    }

    pub fn set_next_id(&mut self, next_id: u16) {
        self.next_id = next_id;
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().flatten().filter_map(|square| *square)
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |piece| piece.player == player)
    }

    #[must_use]
    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    /// Every king square of `player`; a legal position has exactly one.
    #[must_use]
    pub fn king_squares(&self, player: Player) -> Vec<BoardCoordinate> {
        self.pieces_of(player)
            .filter(|piece| piece.kind == PieceKind::King)
            .map(|piece| piece.position)
            .collect()
    }

    /// Moves the piece on `from` to `to`, returning whatever stood on `to`.
    pub fn relocate(&mut self, from: BoardCoordinate, to: BoardCoordinate) -> Option<Piece> {
        let mut piece = self.take(from)?;
        let captured = self.take(to);
        piece.position = to;
        piece.moves_made += 1;
        self.put(piece);
        captured
    }

    /// Compact diagram, row 7 at the top. Uppercase is white.
    #[must_use]
    pub fn to_diagram(&self) -> String {
        let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
        for row in (0..BOARD_SIZE).rev() {
            for col in 0..BOARD_SIZE {
                let ch = match self.grid[row][col] {
                    Some(piece) if piece.player == Player::White => {
                        piece.kind.letter().to_ascii_uppercase()
                    }
                    Some(piece) => piece.kind.letter(),
                    None => '.',
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_diagram())
    }
}
