//! Material evaluation
//!
//! The leaf heuristic squashes the material balance through a logistic
//! curve, so it stays strictly inside `(-scale / 2, scale / 2)` and never
//! reaches the infinite scores reserved for checkmate.

use crate::core::board::{Board, Color, PieceKind};

/// Summed weights of `color`'s pieces, kings excluded
pub fn material(board: &Board, color: Color) -> u32 {
    board
        .pieces(Some(color))
        .filter(|(piece, _)| piece.kind != PieceKind::King)
        .map(|(piece, _)| piece.kind.weight())
        .sum()
}

#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Material balance from `perspective`'s side.
///
/// The advantage is normalized by the total material on the board, scaled
/// by `steepness` before the logistic, and the centered result is stretched
/// to `scale`. Bare kings evaluate to zero.
pub fn evaluate(board: &Board, perspective: Color, steepness: f64, scale: f64) -> f64 {
    let own = material(board, perspective) as f64;
    let opponent = material(board, !perspective) as f64;
    let total = own + opponent;
    if total == 0.0 {
        return 0.0;
    }
    let advantage = (own - opponent) / total;
    (sigmoid(steepness * advantage) - 0.5) * scale
}
