//! Bot-vs-bot matches.

use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::core::board::Color;
use crate::core::error::{ChessError, ChessResult};
use crate::core::moves::Move;

use super::bot::Bot;
use super::game::{Game, GameStatus};

/// How a match ended
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    /// Neither side finished the game within the ply budget
    PlyLimit,
}

#[derive(Clone, Debug)]
pub struct MatchReport {
    pub outcome: Outcome,
    pub moves: Vec<Move>,
    pub final_position: Game,
    /// Time spent choosing moves, indexed by `Color::index()`
    pub clocks: [Duration; 2],
}

impl MatchReport {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// Play `game` out between two bots, stopping at mate, stalemate, or after
/// `max_plies` half-moves.
pub fn play_match(
    white: &mut dyn Bot,
    black: &mut dyn Bot,
    mut game: Game,
    max_plies: usize,
) -> ChessResult<MatchReport> {
    for (bot, seat) in [(&*white, Color::White), (&*black, Color::Black)] {
        if bot.color() != seat {
            return Err(ChessError::WrongTurn {
                bot: bot.color(),
                to_move: seat,
            });
        }
    }

    let mut moves = Vec::new();
    let mut clocks = [Duration::ZERO; 2];

    let outcome = loop {
        let to_move = match game.status() {
            GameStatus::Checkmate(loser) => break Outcome::Checkmate { winner: !loser },
            GameStatus::Stalemate(_) => break Outcome::Stalemate,
            GameStatus::Active(color) => color,
        };
        if moves.len() >= max_plies {
            break Outcome::PlyLimit;
        }

        let bot: &mut dyn Bot = match to_move {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let started = Instant::now();
        let mv = bot.select_move(&game)?;
        clocks[to_move.index()] += started.elapsed();

        debug!(bot = bot.name(), mv = %mv, ply = moves.len() + 1, "move played");
        game.execute_move(&mv)?;
        moves.push(mv);
    };

    info!(
        white = white.name(),
        black = black.name(),
        ?outcome,
        plies = moves.len(),
        "match finished"
    );

    Ok(MatchReport {
        outcome,
        moves,
        final_position: game,
        clocks,
    })
}
