//! Chess board representation
//!
//! The board is an 8x8 grid of optional pieces. Rank 0 is the first rank of
//! the placement string (Black's back rank), file 0 is the a-file. The board
//! stores placement only and knows nothing about the rules.

use super::error::{ChessError, ChessResult};
use std::fmt;
use std::ops::{Add, Not};

pub const BOARD_SIZE: u8 = 8;

/// A square on the board, always in bounds once constructed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    rank: u8,
    file: u8,
}

impl Location {
    /// Create a location, rejecting coordinates outside the grid.
    pub fn new(rank: i32, file: i32) -> ChessResult<Self> {
        if Self::in_bounds(rank, file) {
            Ok(Location {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            Err(ChessError::Bounds { rank, file })
        }
    }

    /// Square on `color`'s back rank. Files past the edge wrap around.
    #[inline]
    pub const fn home(color: Color, file: u8) -> Self {
        Location {
            rank: color.back_rank(),
            file: file % BOARD_SIZE,
        }
    }

    #[inline]
    pub const fn in_bounds(rank: i32, file: i32) -> bool {
        rank >= 0 && rank < BOARD_SIZE as i32 && file >= 0 && file < BOARD_SIZE as i32
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Row-major index in 0..64
    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * BOARD_SIZE as usize + self.file as usize
    }

    /// Step by a (rank, file) delta; `None` when the result leaves the board.
    #[inline]
    pub fn offset(self, d_rank: i8, d_file: i8) -> Option<Location> {
        let rank = self.rank as i32 + d_rank as i32;
        let file = self.file as i32 + d_file as i32;
        Location::new(rank, file).ok()
    }

    /// Iterate over all 64 locations, rank by rank.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Location { rank, file }))
    }

    /// Parse a square from algebraic notation (e.g., "e4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        if s.len() != 2 {
            return None;
        }
        let bytes = s.as_bytes();
        let file = bytes[0].wrapping_sub(b'a');
        let rank_digit = bytes[1].wrapping_sub(b'1');
        if file < BOARD_SIZE && rank_digit < BOARD_SIZE {
            Some(Location {
                rank: BOARD_SIZE - 1 - rank_digit,
                file,
            })
        } else {
            None
        }
    }

    /// Convert to algebraic notation
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file) as char;
        let rank = (b'0' + BOARD_SIZE - self.rank) as char;
        format!("{}{}", file, rank)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.rank, self.file)
    }
}

/// A unit step on the board in (rank, file) terms.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Direction {
    pub d_rank: i8,
    pub d_file: i8,
}

impl Direction {
    pub const N: Direction = Direction::new(-1, 0);
    pub const S: Direction = Direction::new(1, 0);
    pub const E: Direction = Direction::new(0, 1);
    pub const W: Direction = Direction::new(0, -1);
    pub const NE: Direction = Direction::new(-1, 1);
    pub const NW: Direction = Direction::new(-1, -1);
    pub const SE: Direction = Direction::new(1, 1);
    pub const SW: Direction = Direction::new(1, -1);

    pub const PARALLEL: [Direction; 4] = [Direction::N, Direction::S, Direction::E, Direction::W];
    pub const DIAGONAL: [Direction; 4] = [Direction::NE, Direction::NW, Direction::SE, Direction::SW];

    #[inline]
    pub const fn new(d_rank: i8, d_file: i8) -> Self {
        Direction { d_rank, d_file }
    }

    #[inline]
    pub const fn scaled(self, steps: i8) -> Self {
        Direction::new(self.d_rank * steps, self.d_file * steps)
    }
}

impl Add<Direction> for Location {
    type Output = Option<Location>;

    fn add(self, dir: Direction) -> Option<Location> {
        self.offset(dir.d_rank, dir.d_file)
    }
}

/// Piece color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank delta of a pawn push (White moves toward rank 0)
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Rank the king and rooks start on
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => BOARD_SIZE - 1,
            Color::Black => 0,
        }
    }

    /// Rank on which pawns promote
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        self.opposite().back_rank()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl Not for Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

/// Piece kind
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Kinds a pawn may promote to, in generation order
    pub const PROMOTABLE: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Material weight used by the search heuristic
    pub const fn weight(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }

    #[inline]
    pub const fn is_promotable(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Get the character representation of the piece kind
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse piece kind from character
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A piece standing on a square
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    /// Set once the piece has left its initial square
    pub moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece {
            color,
            kind,
            moved: false,
        }
    }

    /// Get the character representation (uppercase for white, lowercase for black)
    pub fn to_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a piece from character
    pub fn from_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }
}

/// Raw piece placement
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Create a new empty board
    pub fn empty() -> Self {
        Board::default()
    }

    /// Standard starting placement
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; BOARD_SIZE as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_rank() as usize;
            let pawns = (color.back_rank() as i8 + color.forward()) as usize;
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                board.squares[back][file] = Some(Piece::new(color, kind));
                board.squares[pawns][file] = Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board
    }

    /// Parse the placement field of a FEN string
    pub fn from_fen(placement: &str) -> ChessResult<Self> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE as usize {
            return Err(ChessError::Format(format!(
                "expected {} ranks, found {}",
                BOARD_SIZE,
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        for (rank, rank_data) in ranks.iter().enumerate() {
            let mut file: usize = 0;
            for c in rank_data.chars() {
                match c {
                    '1'..='8' => {
                        file += c as usize - '0' as usize;
                    }
                    _ => {
                        let piece = Piece::from_char(c).ok_or_else(|| {
                            ChessError::Format(format!("unknown piece '{}'", c))
                        })?;
                        if file >= BOARD_SIZE as usize {
                            return Err(ChessError::Format(format!(
                                "rank {} '{}' has more than {} squares",
                                rank, rank_data, BOARD_SIZE
                            )));
                        }
                        board.squares[rank][file] = Some(piece);
                        file += 1;
                    }
                }
            }
            if file != BOARD_SIZE as usize {
                return Err(ChessError::Format(format!(
                    "rank {} '{}' describes {} squares",
                    rank, rank_data, file
                )));
            }
        }
        Ok(board)
    }

    /// Serialize the placement as a FEN placement field
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for (rank, row) in self.squares.iter().enumerate() {
            let mut empty = 0;
            for square in row {
                match square {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank + 1 < BOARD_SIZE as usize {
                fen.push('/');
            }
        }
        fen
    }

    /// Put a new, unmoved piece on an empty square
    pub fn place(&mut self, location: Location, color: Color, kind: PieceKind) -> ChessResult<()> {
        let square = self.square_mut(location);
        if square.is_some() {
            return Err(ChessError::Occupied(location));
        }
        *square = Some(Piece::new(color, kind));
        Ok(())
    }

    /// Remove a piece from the board
    pub fn remove(&mut self, location: Location) -> Option<Piece> {
        let piece = self.square_mut(location).take();
        debug_assert!(piece.is_some(), "remove on empty square {}", location);
        piece
    }

    /// Move a piece from one square to another, marking it as moved.
    /// Whatever stood on `to` is overwritten.
    pub fn move_piece(&mut self, from: Location, to: Location) {
        if let Some(mut piece) = self.square_mut(from).take() {
            piece.moved = true;
            *self.square_mut(to) = Some(piece);
        } else {
            debug_assert!(false, "move_piece from empty square {}", from);
        }
    }

    /// Replace the kind of the piece on `location`, keeping color and moved flag
    pub fn promote(&mut self, location: Location, kind: PieceKind) {
        if let Some(piece) = self.square_mut(location) {
            piece.kind = kind;
        }
    }

    #[inline]
    pub fn piece_at(&self, location: Location) -> Option<Piece> {
        self.squares[location.rank as usize][location.file as usize]
    }

    /// Piece lookup by raw coordinates
    pub fn get(&self, rank: i32, file: i32) -> ChessResult<Option<Piece>> {
        Location::new(rank, file).map(|location| self.piece_at(location))
    }

    #[inline]
    pub fn is_occupied(&self, location: Location) -> bool {
        self.piece_at(location).is_some()
    }

    /// All pieces with their locations, optionally restricted to one color
    pub fn pieces(&self, color: Option<Color>) -> impl Iterator<Item = (Piece, Location)> + '_ {
        Location::all().filter_map(move |location| {
            self.piece_at(location)
                .filter(|piece| color.is_none_or(|c| piece.color == c))
                .map(|piece| (piece, location))
        })
    }

    /// Get the king location for a color
    pub fn king_location(&self, color: Color) -> Option<Location> {
        self.pieces(Some(color))
            .find(|(piece, _)| piece.kind == PieceKind::King)
            .map(|(_, location)| location)
    }

    pub fn clear(&mut self) {
        *self = Board::empty();
    }

    #[inline]
    fn square_mut(&mut self, location: Location) -> &mut Option<Piece> {
        &mut self.squares[location.rank as usize][location.file as usize]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}
