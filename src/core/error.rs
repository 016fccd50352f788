//! Error types for the rules engine and bots.

use super::board::{Color, Location};

/// Errors raised by board setup, move execution and move selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChessError {
    /// Malformed placement string
    #[error("Invalid FEN: {0}")]
    Format(String),

    /// Tried to place a piece on an occupied square
    #[error("Square {0} is already occupied")]
    Occupied(Location),

    /// Coordinates outside the 8x8 grid
    #[error("Location ({rank}, {file}) is out of bounds")]
    Bounds { rank: i32, file: i32 },

    /// Move whose type and payload don't agree, or that doesn't fit the board
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// A bot was asked to move with nothing to play
    #[error("No legal move available for {0:?}")]
    NoLegalMove(Color),

    /// A bot was asked to move for the side that is not on move
    #[error("{bot:?} bot asked to move while {to_move:?} is to move")]
    WrongTurn { bot: Color, to_move: Color },

    /// Search was stopped before finishing
    #[error("Search interrupted")]
    SearchInterrupted,
}

/// Result type alias for engine operations
pub type ChessResult<T> = Result<T, ChessError>;
