//! Move Generation Tests
//!
//! Pseudo-legal generation per piece kind and attack detection.

use minimax_chess::core::board::{Board, Color, Location, PieceKind};
use minimax_chess::core::moves::{Move, MoveType};
use minimax_chess::engine::game::{Game, STARTPOS};
use minimax_chess::engine::movegen::{MoveGen, Slide, slide_moves};
use std::collections::HashSet;

const POSITIONS: [&str; 6] = [
    STARTPOS,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R",
    "4R1k1/5ppp/8/8/8/8/8/7K",
    "7k/5Q2/6K1/8/8/8/8/8",
];

fn loc(rank: i32, file: i32) -> Location {
    Location::new(rank, file).unwrap()
}

fn destinations(moves: &[Move]) -> HashSet<Location> {
    moves.iter().map(|mv| mv.end).collect()
}

fn moves_of(board: &Board, at: Location) -> Vec<Move> {
    let piece = board.piece_at(at).unwrap();
    let mut out = Vec::new();
    MoveGen::piece_moves(board, at, piece.kind, piece.color, &mut out);
    out
}

// ============================================================================
// Leaper Tests
// ============================================================================

#[test]
fn test_knight_in_corner() {
    let mut game = Game::new();
    game.add_piece(loc(0, 0), Color::White, PieceKind::Knight).unwrap();

    let moves = game.legal_moves(Color::White);
    assert_eq!(moves.len(), 2);
    assert!(moves.iter().all(|mv| mv.kind == MoveType::Passing));
    assert_eq!(
        destinations(&moves),
        HashSet::from([loc(1, 2), loc(2, 1)])
    );
}

#[test]
fn test_knight_targets_table() {
    assert_eq!(MoveGen::knight_targets(loc(4, 4)).len(), 8);
    assert_eq!(MoveGen::knight_targets(loc(7, 7)).len(), 2);
    assert_eq!(MoveGen::king_targets(loc(4, 4)).len(), 8);
    assert_eq!(MoveGen::king_targets(loc(0, 0)).len(), 3);
    assert_eq!(MoveGen::king_targets(loc(0, 3)).len(), 5);
}

#[test]
fn test_king_captures_enemy_skips_friend() {
    let board = Board::from_fen("8/8/8/3pP3/4K3/8/8/8").unwrap();
    let moves = moves_of(&board, loc(4, 4));
    assert_eq!(moves.len(), 7);
    let captures: Vec<&Move> = moves.iter().filter(|mv| mv.is_capture()).collect();
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].end, loc(3, 3));
    assert_eq!(captures[0].target, Some(PieceKind::Pawn));
    assert!(!destinations(&moves).contains(&loc(3, 4)));
}

// ============================================================================
// Slider Tests
// ============================================================================

#[test]
fn test_bishop_stops_before_friendly_rook() {
    let mut board = Board::empty();
    board.place(loc(1, 1), Color::White, PieceKind::Bishop).unwrap();
    board.place(loc(6, 6), Color::White, PieceKind::Rook).unwrap();

    let moves = moves_of(&board, loc(1, 1));
    assert!(moves.iter().all(|mv| mv.kind == MoveType::Passing));
    assert_eq!(
        destinations(&moves),
        HashSet::from([
            loc(0, 0),
            loc(2, 2),
            loc(3, 3),
            loc(4, 4),
            loc(5, 5),
            loc(0, 2),
            loc(2, 0),
        ])
    );
    assert_eq!(moves.len(), 7);
}

#[test]
fn test_rook_ray_ends_at_first_piece() {
    let mut board = Board::empty();
    board.place(loc(4, 4), Color::White, PieceKind::Rook).unwrap();
    board.place(loc(4, 6), Color::Black, PieceKind::Pawn).unwrap();
    board.place(loc(2, 4), Color::White, PieceKind::Knight).unwrap();

    let moves = moves_of(&board, loc(4, 4));
    assert_eq!(moves.len(), 10);
    let captures: Vec<&Move> = moves.iter().filter(|mv| mv.is_capture()).collect();
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].end, loc(4, 6));
    assert!(!destinations(&moves).contains(&loc(4, 7)));
    assert!(!destinations(&moves).contains(&loc(2, 4)));
}

#[test]
fn test_queen_is_rook_plus_bishop() {
    let board = Board::from_fen("8/8/2p5/8/4Q3/5P2/8/8").unwrap();
    let at = loc(4, 4);
    let mut parallel = Vec::new();
    let mut diagonal = Vec::new();
    slide_moves(&board, at, Color::White, Slide::Parallel, &mut parallel);
    slide_moves(&board, at, Color::White, Slide::Diagonal, &mut diagonal);

    let queen = moves_of(&board, at);
    assert_eq!(queen.len(), parallel.len() + diagonal.len());
    let mut combined = destinations(&parallel);
    combined.extend(destinations(&diagonal));
    assert_eq!(destinations(&queen), combined);
}

#[test]
fn test_sliders_follow_their_direction_set() {
    let board = Board::from_fen("8/8/8/3P4/4Q2p/8/8/8").unwrap();
    let at = loc(4, 4);
    for kind in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        let mut generated = Vec::new();
        MoveGen::piece_moves(&board, at, kind, Color::White, &mut generated);
        let mut expected = Vec::new();
        slide_moves(&board, at, Color::White, Slide::of(kind).unwrap(), &mut expected);
        assert_eq!(generated, expected, "{:?}", kind);
    }
}

#[test]
fn test_slide_of_kind() {
    assert_eq!(Slide::of(PieceKind::Bishop), Some(Slide::Diagonal));
    assert_eq!(Slide::of(PieceKind::Rook), Some(Slide::Parallel));
    assert_eq!(Slide::of(PieceKind::Queen), Some(Slide::Both));
    assert_eq!(Slide::of(PieceKind::Knight), None);
    assert_eq!(Slide::Both.directions().len(), 8);
}

// ============================================================================
// Pawn Tests
// ============================================================================

#[test]
fn test_black_pawn_double_step() {
    let mut game = Game::new();
    game.add_piece(loc(0, 4), Color::Black, PieceKind::King).unwrap();
    game.add_piece(loc(7, 4), Color::White, PieceKind::King).unwrap();
    game.add_piece(loc(1, 6), Color::Black, PieceKind::Pawn).unwrap();

    let pawn_moves: Vec<Move> = game
        .legal_moves(Color::Black)
        .into_iter()
        .filter(|mv| mv.start == loc(1, 6))
        .collect();
    assert_eq!(pawn_moves.len(), 2);
    assert!(pawn_moves.iter().all(|mv| mv.kind == MoveType::Passing));
    assert_eq!(destinations(&pawn_moves), HashSet::from([loc(2, 6), loc(3, 6)]));
}

#[test]
fn test_pawn_double_step_needs_clear_path() {
    let board = Board::from_fen("8/8/8/8/8/4n3/4P3/8").unwrap();
    assert!(moves_of(&board, loc(6, 4)).is_empty());

    let board = Board::from_fen("8/8/8/8/4n3/8/4P3/8").unwrap();
    let moves = moves_of(&board, loc(6, 4));
    assert_eq!(destinations(&moves), HashSet::from([loc(5, 4)]));
}

#[test]
fn test_moved_pawn_single_step_only() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 w").unwrap();
    game.execute_move(&Move::passing(loc(6, 4), loc(5, 4))).unwrap();
    game.set_active_color(Color::White);

    let moves = moves_of(game.board(), loc(5, 4));
    assert_eq!(destinations(&moves), HashSet::from([loc(4, 4)]));
}

#[test]
fn test_pawn_captures_diagonal_only() {
    let board = Board::from_fen("8/8/8/3p1n2/4P3/8/8/8").unwrap();
    let moves = moves_of(&board, loc(4, 4));
    let captures: HashSet<Location> = moves
        .iter()
        .filter(|mv| mv.is_capture())
        .map(|mv| mv.end)
        .collect();
    assert_eq!(captures, HashSet::from([loc(3, 3), loc(3, 5)]));
}

#[test]
fn test_promotion_expands_into_four() {
    let board = Board::from_fen("1r6/P7/8/8/8/8/8/8").unwrap();
    let moves = moves_of(&board, loc(1, 0));
    assert_eq!(moves.len(), 8);

    let pushes: Vec<&Move> = moves
        .iter()
        .filter(|mv| mv.kind == MoveType::Promotion)
        .collect();
    let captures: Vec<&Move> = moves
        .iter()
        .filter(|mv| mv.kind == MoveType::CaptureAndPromotion)
        .collect();
    assert_eq!(pushes.len(), 4);
    assert_eq!(captures.len(), 4);

    let kinds: Vec<PieceKind> = pushes.iter().filter_map(|mv| mv.promotion).collect();
    assert_eq!(kinds, PieceKind::PROMOTABLE.to_vec());
    assert!(captures.iter().all(|mv| mv.target == Some(PieceKind::Rook)));
}

#[test]
fn test_black_promotes_on_last_rank() {
    let board = Board::from_fen("8/8/8/8/8/8/6p1/8").unwrap();
    let moves = moves_of(&board, loc(6, 6));
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|mv| mv.end == loc(7, 6) && mv.is_promotion()));
}

// ============================================================================
// Totality and Attack Tests
// ============================================================================

#[test]
fn test_startpos_counts() {
    let board = Board::from_fen(STARTPOS).unwrap();
    assert_eq!(MoveGen::pseudo_legal_moves(&board, Color::White).len(), 20);
    assert_eq!(MoveGen::pseudo_legal_moves(&board, Color::Black).len(), 20);
}

#[test]
fn test_never_targets_friendly_square() {
    for placement in POSITIONS {
        let board = Board::from_fen(placement).unwrap();
        for color in Color::ALL {
            for mv in MoveGen::pseudo_legal_moves(&board, color) {
                let mover = board.piece_at(mv.start).unwrap();
                assert_eq!(mover.color, color);
                if let Some(occupant) = board.piece_at(mv.end) {
                    assert_ne!(occupant.color, color, "{} in {}", mv, placement);
                    assert_eq!(mv.target, Some(occupant.kind));
                }
            }
        }
    }
}

#[test]
fn test_pawn_attacks_empty_square() {
    let board = Board::from_fen("8/8/8/8/8/8/4P3/8").unwrap();
    assert!(MoveGen::is_attacked(&board, loc(5, 3), Color::White));
    assert!(MoveGen::is_attacked(&board, loc(5, 5), Color::White));
    assert!(!MoveGen::is_attacked(&board, loc(5, 4), Color::White));
    assert!(!MoveGen::is_attacked(&board, loc(7, 3), Color::White));
}

#[test]
fn test_attack_matches_king_capture() {
    for placement in POSITIONS {
        let board = Board::from_fen(placement).unwrap();
        for color in Color::ALL {
            let Some(king) = board.king_location(color) else {
                continue;
            };
            let capturable = MoveGen::pseudo_legal_moves(&board, !color)
                .iter()
                .any(|mv| mv.is_capture() && mv.end == king);
            assert_eq!(
                MoveGen::is_attacked(&board, king, !color),
                capturable,
                "{:?} king in {}",
                color,
                placement
            );
        }
    }
}
