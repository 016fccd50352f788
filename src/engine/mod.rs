//! Chess engine components
//!
//! - Pseudo-legal move generation and attack detection
//! - Game state, legality filtering and game status
//! - Material evaluation
//! - Minimax search with alpha-beta pruning
//! - Bots and bot-vs-bot matches

pub mod arena;
pub mod bot;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod search;

pub use arena::{MatchReport, Outcome, play_match};
pub use bot::{Bot, RandomBot};
pub use eval::evaluate;
pub use game::{Game, GameStatus, STARTPOS};
pub use movegen::MoveGen;
pub use search::{BotConfig, DEFAULT_DEPTH, INFINITY, MinimaxBot, SearchStats, minimax};
