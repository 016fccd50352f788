//! Bot interface and the random baseline bot.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::board::Color;
use crate::core::error::{ChessError, ChessResult};
use crate::core::moves::Move;

use super::game::Game;

/// Something that plays one color of a game
pub trait Bot {
    fn color(&self) -> Color;

    fn name(&self) -> &str;

    /// Choose a legal move for the position. Fails with `WrongTurn` when the
    /// bot's color is not on move and `NoLegalMove` when nothing is playable.
    fn select_move(&mut self, game: &Game) -> ChessResult<Move>;
}

/// Plays a uniformly random legal move
pub struct RandomBot<R = StdRng> {
    color: Color,
    rng: R,
    name: String,
}

impl RandomBot<StdRng> {
    pub fn new(color: Color) -> Self {
        Self::with_rng(color, StdRng::from_os_rng())
    }

    pub fn seeded(color: Color, seed: u64) -> Self {
        Self::with_rng(color, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomBot<R> {
    pub fn with_rng(color: Color, rng: R) -> Self {
        RandomBot {
            color,
            rng,
            name: format!("{}_RandomBot", color.name()),
        }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn select_move(&mut self, game: &Game) -> ChessResult<Move> {
        if game.active_color() != self.color {
            return Err(ChessError::WrongTurn {
                bot: self.color,
                to_move: game.active_color(),
            });
        }
        let moves = game.legal_moves(self.color);
        if moves.is_empty() {
            return Err(ChessError::NoLegalMove(self.color));
        }
        Ok(moves[self.rng.random_range(0..moves.len())])
    }
}
