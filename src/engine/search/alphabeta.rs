//! Alpha-beta search and the unpruned reference minimax.

use rand::Rng;

use crate::core::board::Color;
use crate::core::error::{ChessError, ChessResult};
use crate::engine::eval::evaluate;
use crate::engine::game::Game;

use super::searcher::MinimaxBot;
use super::types::{BotConfig, INFINITY};

impl<R: Rng> MinimaxBot<R> {
    /// Score `game` from the bot's point of view, `depth` plies deep.
    ///
    /// Siblings are cut only once `alpha > beta`. Moves whose value equals
    /// the current bound are still searched exactly, which keeps tied root
    /// moves distinguishable from worse ones.
    pub(super) fn alpha_beta(
        &mut self,
        game: &Game,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
    ) -> ChessResult<f64> {
        if self.should_stop() {
            return Err(ChessError::SearchInterrupted);
        }
        self.stats.nodes += 1;

        if depth == 0 {
            return Ok(leaf_score(game, self.color, &self.config));
        }

        let mover = game.active_color();
        let moves = game.legal_moves(mover);
        if moves.is_empty() {
            return Ok(terminal_score(game, self.color, &self.config));
        }

        let maximizing = mover == self.color;
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in &moves {
            let child = game.simulate(mv)?;
            let score = self.alpha_beta(&child, depth - 1, alpha, beta)?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if alpha > beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }
}

/// Plain minimax without pruning, scored for `color`
pub fn minimax(game: &Game, depth: u32, color: Color, config: &BotConfig) -> ChessResult<f64> {
    if depth == 0 {
        return Ok(leaf_score(game, color, config));
    }

    let mover = game.active_color();
    let moves = game.legal_moves(mover);
    if moves.is_empty() {
        return Ok(terminal_score(game, color, config));
    }

    let mut scores = Vec::with_capacity(moves.len());
    for mv in &moves {
        scores.push(minimax(&game.simulate(mv)?, depth - 1, color, config)?);
    }
    let best = if mover == color {
        scores.into_iter().fold(-INFINITY, f64::max)
    } else {
        scores.into_iter().fold(INFINITY, f64::min)
    };
    Ok(best)
}

/// Score once the depth budget is spent. Mate is still recognized here;
/// anything else falls back to the heuristic.
fn leaf_score(game: &Game, color: Color, config: &BotConfig) -> f64 {
    let mover = game.active_color();
    if game.is_in_check(mover) && !game.has_legal_moves(mover) {
        mate_score(mover, color)
    } else {
        heuristic(game, color, config)
    }
}

/// Score of a position where the side to move has no legal move
fn terminal_score(game: &Game, color: Color, config: &BotConfig) -> f64 {
    let mover = game.active_color();
    if game.is_in_check(mover) {
        mate_score(mover, color)
    } else {
        // Stalemate is scored like any quiet leaf
        heuristic(game, color, config)
    }
}

fn mate_score(mated: Color, color: Color) -> f64 {
    if mated == color { -INFINITY } else { INFINITY }
}

fn heuristic(game: &Game, color: Color, config: &BotConfig) -> f64 {
    evaluate(game.board(), color, config.steepness, config.scale)
}
