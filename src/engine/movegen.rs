//! Pseudo-legal move generation
//!
//! This module implements per-piece move generation:
//! - Precomputed target tables for knights and kings
//! - One shared ray walker for sliding pieces, parameterized by direction set
//! - Pawn pushes and captures with promotion expansion
//!
//! Nothing here knows about check. The generated moves respect piece geometry
//! and occupancy only.

use crate::core::board::{BOARD_SIZE, Board, Color, Direction, Location, PieceKind};
use crate::core::moves::Move;

/// Direction set a sliding piece may move along
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Slide {
    Parallel,
    Diagonal,
    Both,
}

impl Slide {
    const BOTH: [Direction; 8] = [
        Direction::N,
        Direction::S,
        Direction::E,
        Direction::W,
        Direction::NE,
        Direction::NW,
        Direction::SE,
        Direction::SW,
    ];

    pub const fn directions(self) -> &'static [Direction] {
        match self {
            Slide::Parallel => &Direction::PARALLEL,
            Slide::Diagonal => &Direction::DIAGONAL,
            Slide::Both => &Slide::BOTH,
        }
    }

    /// Direction set of a sliding piece kind; `None` for non-sliders
    pub const fn of(kind: PieceKind) -> Option<Slide> {
        match kind {
            PieceKind::Bishop => Some(Slide::Diagonal),
            PieceKind::Rook => Some(Slide::Parallel),
            PieceKind::Queen => Some(Slide::Both),
            _ => None,
        }
    }
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const SQUARES: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Generator for one piece kind: (board, location, kind, mover color, output)
type Generator = fn(&Board, Location, PieceKind, Color, &mut Vec<Move>);

/// Generators indexed by `PieceKind::index()`
const GENERATORS: [Generator; 6] = [
    pawn_moves,
    knight_moves,
    slider_moves,
    slider_moves,
    slider_moves,
    king_moves,
];

/// Precomputed in-bounds targets for leaping pieces
pub struct MoveGen {
    knight_targets: Vec<Vec<Location>>,
    king_targets: Vec<Vec<Location>>,
}

// Global move generator instance
static MOVEGEN: std::sync::OnceLock<MoveGen> = std::sync::OnceLock::new();

impl MoveGen {
    /// Get the global MoveGen instance
    pub fn instance() -> &'static MoveGen {
        MOVEGEN.get_or_init(MoveGen::init)
    }

    fn init() -> Self {
        let mut mg = MoveGen {
            knight_targets: vec![Vec::new(); SQUARES],
            king_targets: vec![Vec::new(); SQUARES],
        };
        for location in Location::all() {
            mg.knight_targets[location.index()] = Self::targets(location, &KNIGHT_OFFSETS);
            mg.king_targets[location.index()] = Self::targets(location, &KING_OFFSETS);
        }
        mg
    }

    fn targets(location: Location, offsets: &[(i8, i8)]) -> Vec<Location> {
        offsets
            .iter()
            .filter_map(|&(d_rank, d_file)| location.offset(d_rank, d_file))
            .collect()
    }

    /// Squares a knight on `location` jumps to
    #[inline]
    pub fn knight_targets(location: Location) -> &'static [Location] {
        &Self::instance().knight_targets[location.index()]
    }

    /// Squares a king on `location` steps to
    #[inline]
    pub fn king_targets(location: Location) -> &'static [Location] {
        &Self::instance().king_targets[location.index()]
    }

    /// Pseudo-legal moves of one piece, appended to `out`
    pub fn piece_moves(
        board: &Board,
        location: Location,
        kind: PieceKind,
        color: Color,
        out: &mut Vec<Move>,
    ) {
        GENERATORS[kind.index()](board, location, kind, color, out);
    }

    /// Pseudo-legal moves of every piece of `color`
    pub fn pseudo_legal_moves(board: &Board, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (piece, location) in board.pieces(Some(color)) {
            Self::piece_moves(board, location, piece.kind, color, &mut moves);
        }
        moves
    }

    /// Whether any piece of `by` attacks `target`.
    ///
    /// Works backwards from the target square, so pawn diagonals count even
    /// when `target` is empty.
    pub fn is_attacked(board: &Board, target: Location, by: Color) -> bool {
        if Self::knight_targets(target)
            .iter()
            .any(|&l| holds_attacker(board, l, by, &[PieceKind::Knight]))
        {
            return true;
        }
        if Self::king_targets(target)
            .iter()
            .any(|&l| holds_attacker(board, l, by, &[PieceKind::King]))
        {
            return true;
        }
        // A pawn of `by` attacks from one rank behind, relative to its own direction
        for d_file in [-1, 1] {
            if let Some(l) = target.offset(-by.forward(), d_file) {
                if holds_attacker(board, l, by, &[PieceKind::Pawn]) {
                    return true;
                }
            }
        }

        let rays = [
            (Direction::PARALLEL, [PieceKind::Rook, PieceKind::Queen]),
            (Direction::DIAGONAL, [PieceKind::Bishop, PieceKind::Queen]),
        ];
        for (directions, sliders) in rays {
            for dir in directions {
                if let Some(l) = first_occupied(board, target, dir) {
                    if holds_attacker(board, l, by, &sliders) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

fn holds_attacker(board: &Board, location: Location, by: Color, kinds: &[PieceKind]) -> bool {
    board
        .piece_at(location)
        .is_some_and(|p| p.color == by && kinds.contains(&p.kind))
}

/// First occupied square along a ray, excluding the origin
fn first_occupied(board: &Board, from: Location, dir: Direction) -> Option<Location> {
    let mut current = from;
    while let Some(next) = current + dir {
        if board.is_occupied(next) {
            return Some(next);
        }
        current = next;
    }
    None
}

/// Append a pawn move, expanded into one move per promotion kind on the last rank
fn push_pawn_move(mv: Move, color: Color, out: &mut Vec<Move>) {
    if mv.end.rank() == color.promotion_rank() {
        out.extend(PieceKind::PROMOTABLE.iter().map(|&kind| mv.promoted_to(kind)));
    } else {
        out.push(mv);
    }
}

fn pawn_moves(board: &Board, location: Location, _: PieceKind, color: Color, out: &mut Vec<Move>) {
    let front = color.forward();

    for d_file in [-1, 1] {
        if let Some(dest) = location.offset(front, d_file) {
            if let Some(target) = board.piece_at(dest) {
                if target.color != color {
                    push_pawn_move(Move::capture(location, dest, target.kind), color, out);
                }
            }
        }
    }

    let Some(one_ahead) = location.offset(front, 0) else {
        return;
    };
    if board.is_occupied(one_ahead) {
        return;
    }
    push_pawn_move(Move::passing(location, one_ahead), color, out);

    let has_moved = board.piece_at(location).is_some_and(|p| p.moved);
    if !has_moved {
        if let Some(two_ahead) = location.offset(2 * front, 0) {
            if !board.is_occupied(two_ahead) {
                push_pawn_move(Move::passing(location, two_ahead), color, out);
            }
        }
    }
}

/// Fixed-offset movement shared by knight and king
fn leaper_moves(
    board: &Board,
    location: Location,
    color: Color,
    targets: &[Location],
    out: &mut Vec<Move>,
) {
    for &dest in targets {
        match board.piece_at(dest) {
            None => out.push(Move::passing(location, dest)),
            Some(target) if target.color != color => {
                out.push(Move::capture(location, dest, target.kind))
            }
            Some(_) => {}
        }
    }
}

fn knight_moves(board: &Board, location: Location, _: PieceKind, color: Color, out: &mut Vec<Move>) {
    leaper_moves(board, location, color, MoveGen::knight_targets(location), out);
}

fn king_moves(board: &Board, location: Location, _: PieceKind, color: Color, out: &mut Vec<Move>) {
    leaper_moves(board, location, color, MoveGen::king_targets(location), out);
}

/// Walk every ray of `slide` outward until the edge or the first piece
pub fn slide_moves(
    board: &Board,
    location: Location,
    color: Color,
    slide: Slide,
    out: &mut Vec<Move>,
) {
    for &dir in slide.directions() {
        let mut current = location;
        while let Some(dest) = current + dir {
            match board.piece_at(dest) {
                None => out.push(Move::passing(location, dest)),
                Some(target) => {
                    if target.color != color {
                        out.push(Move::capture(location, dest, target.kind));
                    }
                    break;
                }
            }
            current = dest;
        }
    }
}

/// Shared generator for bishop, rook and queen
fn slider_moves(board: &Board, location: Location, kind: PieceKind, color: Color, out: &mut Vec<Move>) {
    if let Some(slide) = Slide::of(kind) {
        slide_moves(board, location, color, slide, out);
    }
}
