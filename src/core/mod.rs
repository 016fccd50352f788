//! Core chess types and representations
//!
//! This module contains the fundamental building blocks of the engine:
//! - Locations, colors and piece kinds
//! - Board placement and its FEN serialization
//! - Move encoding
//! - The error taxonomy

pub mod board;
pub mod error;
pub mod moves;

pub use board::{BOARD_SIZE, Board, Color, Direction, Location, Piece, PieceKind};
pub use error::{ChessError, ChessResult};
pub use moves::{CastleSide, Move, MoveType};
