//! Game position and rules
//!
//! `Game` owns the board and the side to move. It turns the pseudo-legal
//! stream from the move generator into legal moves, derives castling and
//! answers check, checkmate and stalemate queries.
//!
//! Every "what if" question is answered on an independent copy of the board,
//! so nested lookahead never observes a sibling's trial moves.

use tracing::trace;

use crate::core::board::{Board, Color, Location, PieceKind};
use crate::core::error::{ChessError, ChessResult};
use crate::core::moves::{CastleSide, Move, MoveType};

use super::movegen::MoveGen;

pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Where a game stands for the side to move
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    /// The color to move has at least one legal move
    Active(Color),
    /// The color to move is checkmated
    Checkmate(Color),
    /// The color to move has no legal move and is not in check
    Stalemate(Color),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Active(_))
    }
}

/// A chess position: board plus active color
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    board: Board,
    active_color: Color,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create an empty board with White to move
    pub fn new() -> Self {
        Game {
            board: Board::empty(),
            active_color: Color::White,
        }
    }

    /// Create the standard starting position
    pub fn startpos() -> Self {
        Game {
            board: Board::standard(),
            active_color: Color::White,
        }
    }

    /// Parse a FEN-like string. Only the placement and the active color are
    /// read; castling, en passant and clock fields are accepted and ignored.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| ChessError::Format("empty string".to_string()))?;
        let board = Board::from_fen(placement)?;

        let active_color = match fields.next() {
            None => Color::White,
            Some(field) => match field {
                "w" | "W" => Color::White,
                "b" | "B" => Color::Black,
                other => {
                    return Err(ChessError::Format(format!(
                        "invalid side to move '{}'",
                        other
                    )));
                }
            },
        };

        Ok(Game {
            board,
            active_color,
        })
    }

    /// Placement field of the position
    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }

    /// Six-field FEN. Castling availability is derived from unmoved kings
    /// and rooks on their home squares.
    pub fn to_full_fen(&self) -> String {
        let mut castling = String::new();
        for (color, sides) in [
            (Color::White, ['K', 'Q']),
            (Color::Black, ['k', 'q']),
        ] {
            for (side, letter) in CastleSide::ALL.into_iter().zip(sides) {
                if self.castling_pieces_unmoved(color, side) {
                    castling.push(letter);
                }
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }
        let side = match self.active_color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {} {} - 0 1", self.board.to_fen(), side, castling)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn set_active_color(&mut self, color: Color) {
        self.active_color = color;
    }

    /// Place a new piece during setup
    pub fn add_piece(&mut self, location: Location, color: Color, kind: PieceKind) -> ChessResult<()> {
        self.board.place(location, color, kind)
    }

    /// Clear the board and give White the move
    pub fn reset(&mut self) {
        self.board.clear();
        self.active_color = Color::White;
    }

    /// Apply a move and pass the turn. The move is checked for internal
    /// consistency against the board before anything changes, so a rejected
    /// move leaves the position untouched. Legality is the caller's concern.
    pub fn execute_move(&mut self, mv: &Move) -> ChessResult<()> {
        apply_move(&mut self.board, mv)?;
        self.active_color = !self.active_color;
        Ok(())
    }

    /// The position after `mv`, leaving `self` untouched
    pub fn simulate(&self, mv: &Move) -> ChessResult<Game> {
        let mut next = self.clone();
        next.execute_move(mv)?;
        Ok(next)
    }

    /// Moves obeying piece geometry for `color`, ignoring check
    pub fn pseudo_legal_moves(&self, color: Color) -> Vec<Move> {
        MoveGen::pseudo_legal_moves(&self.board, color)
    }

    /// Moves of `color` that don't leave its own king attacked, castling included
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves: Vec<Move> = self
            .pseudo_legal_moves(color)
            .into_iter()
            .filter(|mv| self.is_move_safe(mv, color))
            .collect();
        moves.extend(self.castling_moves(color));
        moves
    }

    /// Like `!legal_moves(color).is_empty()` but stops at the first legal move
    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pseudo_legal_moves(color)
            .iter()
            .any(|mv| self.is_move_safe(mv, color))
            || !self.castling_moves(color).is_empty()
    }

    /// Try `mv` on a scratch copy of the board and check the mover's king
    fn is_move_safe(&self, mv: &Move, color: Color) -> bool {
        let mut trial = self.board.clone();
        match apply_move(&mut trial, mv) {
            Ok(()) => !king_attacked(&trial, color),
            Err(_) => false,
        }
    }

    /// Castling moves available to `color`
    pub fn castling_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for side in CastleSide::ALL {
            if !self.castling_pieces_unmoved(color, side) {
                continue;
            }
            if !castle_path_clear(&self.board, color, side) {
                trace!(?color, ?side, "castling blocked");
                continue;
            }

            // King's start, the square it crosses, and where it lands
            let path_attacked = (0..=2).any(|step| {
                let file = (KING_FILE as i8 + step * side.step()) as u8;
                self.is_square_attacked(Location::home(color, file), !color)
            });
            if path_attacked {
                trace!(?color, ?side, "castling path attacked");
                continue;
            }

            let squares = CastleSquares::new(color, side);
            moves.push(Move::castle(squares.king_from, squares.king_to, side));
        }
        moves
    }

    /// King on its home square and the side's rook on its home square, neither moved
    fn castling_pieces_unmoved(&self, color: Color, side: CastleSide) -> bool {
        let unmoved = |file: u8, kind: PieceKind| {
            self.board
                .piece_at(Location::home(color, file))
                .is_some_and(|p| p.color == color && p.kind == kind && !p.moved)
        };
        unmoved(KING_FILE, PieceKind::King) && unmoved(side.rook_file(), PieceKind::Rook)
    }

    /// Whether any piece of `by` attacks `location`
    pub fn is_square_attacked(&self, location: Location, by: Color) -> bool {
        MoveGen::is_attacked(&self.board, location, by)
    }

    /// Whether `color`'s king can be captured by the opponent
    pub fn is_in_check(&self, color: Color) -> bool {
        king_attacked(&self.board, color)
    }

    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// State of the game for the side to move
    pub fn status(&self) -> GameStatus {
        let color = self.active_color;
        if self.has_legal_moves(color) {
            GameStatus::Active(color)
        } else if self.is_in_check(color) {
            GameStatus::Checkmate(color)
        } else {
            GameStatus::Stalemate(color)
        }
    }
}

const KING_FILE: u8 = 4;

/// Home and landing squares of king and rook for one castle
struct CastleSquares {
    king_from: Location,
    king_to: Location,
    rook_from: Location,
    rook_to: Location,
}

impl CastleSquares {
    fn new(color: Color, side: CastleSide) -> Self {
        let step = side.step();
        CastleSquares {
            king_from: Location::home(color, KING_FILE),
            king_to: Location::home(color, (KING_FILE as i8 + 2 * step) as u8),
            rook_from: Location::home(color, side.rook_file()),
            rook_to: Location::home(color, (KING_FILE as i8 + step) as u8),
        }
    }
}

/// Every square strictly between the king's and the rook's home squares is empty
fn castle_path_clear(board: &Board, color: Color, side: CastleSide) -> bool {
    let rook_file = side.rook_file();
    let (low, high) = if rook_file < KING_FILE {
        (rook_file + 1, KING_FILE)
    } else {
        (KING_FILE + 1, rook_file)
    };
    (low..high).all(|file| !board.is_occupied(Location::home(color, file)))
}

fn king_attacked(board: &Board, color: Color) -> bool {
    board
        .king_location(color)
        .is_some_and(|king| MoveGen::is_attacked(board, king, !color))
}

fn invalid(mv: &Move, reason: &str) -> ChessError {
    ChessError::InvalidMove(format!("{} ({:?}): {}", mv, mv.kind, reason))
}

/// Check a capture target is really on the destination square
fn expect_target(board: &Board, mv: &Move, kind: PieceKind, mover: Color) -> ChessResult<()> {
    match board.piece_at(mv.end) {
        Some(p) if p.kind == kind && p.color != mover => Ok(()),
        Some(_) => Err(invalid(mv, "target does not match the destination")),
        None => Err(invalid(mv, "nothing to capture")),
    }
}

/// Validate `mv` against `board`, then apply it
fn apply_move(board: &mut Board, mv: &Move) -> ChessResult<()> {
    let mover = board
        .piece_at(mv.start)
        .ok_or_else(|| invalid(mv, "no piece on the start square"))?;

    match (mv.kind, mv.target, mv.castle, mv.promotion) {
        (MoveType::Passing, None, None, None) => {
            if board.is_occupied(mv.end) {
                return Err(invalid(mv, "destination is occupied"));
            }
            board.move_piece(mv.start, mv.end);
        }
        (MoveType::Capture, Some(target), None, None) => {
            expect_target(board, mv, target, mover.color)?;
            board.remove(mv.end);
            board.move_piece(mv.start, mv.end);
        }
        (MoveType::Castle, Some(PieceKind::Rook), Some(side), None) => {
            let squares = CastleSquares::new(mover.color, side);
            if mover.kind != PieceKind::King
                || mv.start != squares.king_from
                || mv.end != squares.king_to
            {
                return Err(invalid(mv, "king is not castling from its home square"));
            }
            let rook_home = board
                .piece_at(squares.rook_from)
                .is_some_and(|r| r.kind == PieceKind::Rook && r.color == mover.color);
            if !rook_home {
                return Err(invalid(mv, "no rook on its home square"));
            }
            if !castle_path_clear(board, mover.color, side) {
                return Err(invalid(mv, "pieces between king and rook"));
            }
            board.move_piece(squares.king_from, squares.king_to);
            board.move_piece(squares.rook_from, squares.rook_to);
        }
        (MoveType::Promotion, None, None, Some(kind)) if kind.is_promotable() => {
            if board.is_occupied(mv.end) {
                return Err(invalid(mv, "destination is occupied"));
            }
            board.move_piece(mv.start, mv.end);
            board.promote(mv.end, kind);
        }
        (MoveType::CaptureAndPromotion, Some(target), None, Some(kind)) if kind.is_promotable() => {
            expect_target(board, mv, target, mover.color)?;
            board.remove(mv.end);
            board.move_piece(mv.start, mv.end);
            board.promote(mv.end, kind);
        }
        _ => return Err(invalid(mv, "inconsistent move type and payload")),
    }
    Ok(())
}
