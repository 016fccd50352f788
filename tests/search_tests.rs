//! Search Tests
//!
//! Minimax bot move selection, pruning correctness and the heuristic.

use minimax_chess::core::board::{Color, Location};
use minimax_chess::core::error::ChessError;
use minimax_chess::core::moves::Move;
use minimax_chess::engine::bot::Bot;
use minimax_chess::engine::eval::{evaluate, material};
use minimax_chess::engine::game::{Game, STARTPOS};
use minimax_chess::engine::search::{BotConfig, INFINITY, MinimaxBot, minimax};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/8/4R2K w";

fn sq(s: &str) -> Location {
    Location::from_algebraic(s).unwrap()
}

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

// ============================================================================
// Selection Tests
// ============================================================================

#[test]
fn test_search_startpos() {
    let g = Game::startpos();
    let mut bot = MinimaxBot::seeded(Color::White, 2, 7);
    let mv = bot.select_move(&g).unwrap();
    assert!(g.legal_moves(Color::White).contains(&mv));
    assert!(bot.stats().nodes > 0);
    assert_eq!(bot.last_score(), Some(0.0));
}

#[test]
fn test_search_mate_in_one() {
    let g = game(MATE_IN_ONE);
    for depth in 1..=3 {
        let mut bot = MinimaxBot::seeded(Color::White, depth, 1);
        let mv = bot.select_move(&g).unwrap();
        assert_eq!(mv, Move::passing(sq("e1"), sq("e8")), "depth {}", depth);
        assert_eq!(bot.last_score(), Some(INFINITY));
    }
}

#[test]
fn test_search_takes_hanging_queen() {
    let g = game("4k3/8/8/3q4/4P3/8/8/4K3 w");
    for depth in 1..=2 {
        let mut bot = MinimaxBot::seeded(Color::White, depth, 3);
        let mv = bot.select_move(&g).unwrap();
        assert_eq!(mv.start, sq("e4"));
        assert_eq!(mv.end, sq("d5"));
        assert!(mv.is_capture());
    }
}

#[test]
fn test_search_no_legal_move() {
    let g = game("4R1k1/5ppp/8/8/8/8/8/7K b");
    let mut bot = MinimaxBot::seeded(Color::Black, 2, 0);
    assert_eq!(bot.select_move(&g), Err(ChessError::NoLegalMove(Color::Black)));

    let g = game("7k/5Q2/6K1/8/8/8/8/8 b");
    assert_eq!(bot.select_move(&g), Err(ChessError::NoLegalMove(Color::Black)));
}

#[test]
fn test_search_wrong_turn() {
    let mut bot = MinimaxBot::seeded(Color::Black, 2, 0);
    assert_eq!(
        bot.select_move(&Game::startpos()),
        Err(ChessError::WrongTurn {
            bot: Color::Black,
            to_move: Color::White,
        })
    );
}

#[test]
fn test_seeded_bots_agree() {
    let g = Game::startpos();
    let first = MinimaxBot::seeded(Color::White, 2, 42).select_move(&g).unwrap();
    let second = MinimaxBot::seeded(Color::White, 2, 42).select_move(&g).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_custom_rng_and_name() {
    let config = BotConfig::default().with_depth(1);
    let mut bot = MinimaxBot::with_rng(Color::White, config, StdRng::seed_from_u64(9));
    assert_eq!(bot.name(), "white_MinimaxBot_d1");
    assert_eq!(bot.color(), Color::White);
    assert!(Bot::select_move(&mut bot, &Game::startpos()).is_ok());

    let bot = MinimaxBot::seeded(Color::Black, 0, 0);
    assert_eq!(bot.name(), "black_MinimaxBot_d1");
}

// ============================================================================
// Pruning Tests
// ============================================================================

#[test]
fn test_alphabeta_matches_minimax() {
    let cases = [
        (STARTPOS, 2),
        ("4k3/8/8/3q4/4P3/8/8/4K3 w", 3),
        ("4k3/8/8/8/8/2n5/3P4/R3K3 w", 3),
        ("r3k3/1p6/8/8/8/8/6P1/4K2R b", 2),
        (MATE_IN_ONE, 3),
        ("7k/8/5QK1/8/8/8/8/8 w", 3),
    ];
    for (fen, depth) in cases {
        let g = game(fen);
        let color = g.active_color();
        let mut bot = MinimaxBot::seeded(color, depth, 5);
        let mv = bot.select_move(&g).unwrap();

        let reference = minimax(&g, depth, color, bot.config()).unwrap();
        assert_eq!(bot.last_score(), Some(reference), "{} at depth {}", fen, depth);

        // The chosen move is one of the moves achieving that value
        let chosen = minimax(&g.simulate(&mv).unwrap(), depth - 1, color, bot.config()).unwrap();
        assert_eq!(chosen, reference, "{} played {}", fen, mv);
    }
}

#[test]
fn test_pruning_visits_fewer_nodes() {
    let g = game("4k3/8/8/3q4/4P3/8/8/4K3 w");
    let mut bot = MinimaxBot::seeded(Color::White, 3, 0);
    bot.select_move(&g).unwrap();
    assert!(bot.stats().cutoffs > 0);
}

// ============================================================================
// Interruption Tests
// ============================================================================

#[test]
fn test_node_limit_falls_back_to_first_move() {
    let g = Game::startpos();
    let config = BotConfig::default().with_depth(3).with_node_limit(0);
    let mut bot = MinimaxBot::with_rng(Color::White, config, StdRng::seed_from_u64(0));
    let mv = bot.select_move(&g).unwrap();
    assert_eq!(mv, g.legal_moves(Color::White)[0]);
    assert_eq!(bot.last_score(), None);
}

#[test]
fn test_node_limit_keeps_finished_root_moves() {
    let g = game(MATE_IN_ONE);
    // Enough budget to finish a few root moves at depth 1
    let config = BotConfig::default().with_depth(1).with_node_limit(4);
    let mut bot = MinimaxBot::with_rng(Color::White, config, StdRng::seed_from_u64(0));
    let mv = bot.select_move(&g).unwrap();
    assert!(g.legal_moves(Color::White)[..4].contains(&mv));
    assert!(bot.last_score().is_some());
    assert_eq!(bot.stats().nodes, 4);
}

#[test]
fn test_stop_flag_interrupts_search() {
    let g = Game::startpos();
    let mut bot = MinimaxBot::seeded(Color::White, 5, 0);
    let stop = bot.stop_flag();

    let handle = thread::spawn(move || {
        let mv = bot.select_move(&g);
        (mv, g)
    });
    // Keep raising the flag until the search notices it
    while !handle.is_finished() {
        thread::sleep(Duration::from_millis(20));
        stop.store(true, Ordering::Relaxed);
    }

    let (mv, g) = handle.join().unwrap();
    assert!(g.legal_moves(Color::White).contains(&mv.unwrap()));
}

// ============================================================================
// Heuristic Tests
// ============================================================================

#[test]
fn test_eval_startpos_symmetric() {
    let g = Game::startpos();
    let white = evaluate(g.board(), Color::White, 7.0, 20.0);
    let black = evaluate(g.board(), Color::Black, 7.0, 20.0);
    assert_eq!(white, -black);
    assert_eq!(white, 0.0);
    assert_eq!(material(g.board(), Color::White), 39);
}

#[test]
fn test_eval_material_advantage() {
    let g = game("4k3/8/8/8/8/8/8/3QK3 w");
    let white = evaluate(g.board(), Color::White, 7.0, 20.0);
    let black = evaluate(g.board(), Color::Black, 7.0, 20.0);
    assert!(white > 0.0);
    assert!((white + black).abs() < 1e-9);
    assert!(white < 10.0);

    // Enemy material narrows the lead
    let more = game("4k3/8/8/8/8/8/7p/3QK3 w");
    assert!(evaluate(more.board(), Color::White, 7.0, 20.0) < white);
}

#[test]
fn test_eval_bare_kings() {
    let g = game("4k3/8/8/8/8/8/8/4K3 w");
    assert_eq!(evaluate(g.board(), Color::White, 7.0, 20.0), 0.0);
}
