//! Searcher: bot state, stop conditions, and root move selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

use crate::core::board::Color;
use crate::core::error::{ChessError, ChessResult};
use crate::core::moves::Move;
use crate::engine::bot::Bot;
use crate::engine::game::Game;

use super::types::{BotConfig, INFINITY, SearchStats};

/// Minimax bot with alpha-beta pruning and a material heuristic.
///
/// Ties at the root are broken with `R`, so a seeded generator makes the
/// bot fully reproducible.
pub struct MinimaxBot<R = StdRng> {
    pub(super) color: Color,
    pub(super) config: BotConfig,
    pub(super) stats: SearchStats,
    pub(super) stop: Arc<AtomicBool>,
    rng: R,
    last_score: Option<f64>,
    name: String,
}

impl MinimaxBot<StdRng> {
    /// Bot searching `max_depth` plies, seeded from the OS
    pub fn new(color: Color, max_depth: u32) -> Self {
        let config = BotConfig::default().with_depth(max_depth);
        Self::with_rng(color, config, StdRng::from_os_rng())
    }

    /// Reproducible bot
    pub fn seeded(color: Color, max_depth: u32, seed: u64) -> Self {
        let config = BotConfig::default().with_depth(max_depth);
        Self::with_rng(color, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MinimaxBot<R> {
    pub fn with_rng(color: Color, config: BotConfig, rng: R) -> Self {
        let name = format!("{}_MinimaxBot_d{}", color.name(), config.depth());
        MinimaxBot {
            color,
            config,
            stats: SearchStats::default(),
            stop: Arc::new(AtomicBool::new(false)),
            rng,
            last_score: None,
            name,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Counters from the most recent `select_move`
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Root score of the most recent selection, if any root move finished
    pub fn last_score(&self) -> Option<f64> {
        self.last_score
    }

    /// Flag that interrupts a running search when set
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    pub(super) fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(limit) = self.config.node_limit {
            if self.stats.nodes >= limit {
                return true;
            }
        }
        false
    }

    /// Pick a move for the bot's color.
    ///
    /// Every root move is scored with alpha-beta; among the moves that share
    /// the best score one is drawn uniformly at random. If the search is
    /// interrupted, only the root moves that finished are considered, and the
    /// first legal move is played when none did.
    pub fn select_move(&mut self, game: &Game) -> ChessResult<Move> {
        if game.active_color() != self.color {
            return Err(ChessError::WrongTurn {
                bot: self.color,
                to_move: game.active_color(),
            });
        }

        self.stop.store(false, Ordering::Relaxed);
        self.stats = SearchStats::default();
        self.last_score = None;

        let moves = game.legal_moves(self.color);
        let Some(&fallback) = moves.first() else {
            return Err(ChessError::NoLegalMove(self.color));
        };

        let depth = self.config.depth();
        let mut alpha = -INFINITY;
        let mut scored: Vec<(Move, f64)> = Vec::with_capacity(moves.len());

        for mv in moves {
            let child = game.simulate(&mv)?;
            match self.alpha_beta(&child, depth - 1, alpha, INFINITY) {
                Ok(score) => {
                    debug!(bot = %self.name, mv = %mv, score, "root move scored");
                    alpha = alpha.max(score);
                    scored.push((mv, score));
                }
                Err(ChessError::SearchInterrupted) => break,
                Err(e) => return Err(e),
            }
        }

        if scored.is_empty() {
            info!(bot = %self.name, mv = %fallback, "search interrupted, playing first legal move");
            return Ok(fallback);
        }

        let best = scored
            .iter()
            .map(|&(_, score)| score)
            .fold(-INFINITY, f64::max);
        let ties: Vec<Move> = scored
            .iter()
            .filter(|&&(_, score)| score == best)
            .map(|&(mv, _)| mv)
            .collect();
        let chosen = ties[self.rng.random_range(0..ties.len())];
        self.last_score = Some(best);

        info!(
            bot = %self.name,
            mv = %chosen,
            score = best,
            ties = ties.len(),
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            "move selected"
        );
        Ok(chosen)
    }
}

impl<R: Rng> Bot for MinimaxBot<R> {
    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn select_move(&mut self, game: &Game) -> ChessResult<Move> {
        MinimaxBot::select_move(self, game)
    }
}
