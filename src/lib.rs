pub mod core;
pub mod engine;

pub use crate::core::{Board, ChessError, ChessResult, Color, Location, Move, MoveType, PieceKind};
pub use engine::{Bot, BotConfig, Game, GameStatus, MinimaxBot, RandomBot, play_match};
