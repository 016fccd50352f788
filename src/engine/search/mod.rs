//! Search: minimax with alpha-beta pruning over legal moves.

mod alphabeta;
mod searcher;
mod types;

pub use alphabeta::minimax;
pub use searcher::MinimaxBot;
pub use types::{BotConfig, DEFAULT_DEPTH, INFINITY, SearchStats};
