//! Move representation
//!
//! A move names its start and end squares plus the payload its type needs:
//! the captured kind for captures, the rook side for castling and the new
//! kind for promotions. A capture that promotes carries both a target and a
//! promotion kind.

use super::board::{Location, PieceKind};
use std::fmt;

/// Move type
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum MoveType {
    Passing,
    Capture,
    Castle,
    Promotion,
    CaptureAndPromotion,
}

/// Which rook the king castles with
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum CastleSide {
    /// Rook on file 7
    Kingside,
    /// Rook on file 0
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// File the rook starts on
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// File step of the king while castling
    #[inline]
    pub const fn step(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

/// A chess move
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Move {
    pub start: Location,
    pub end: Location,
    pub kind: MoveType,
    /// Captured piece kind, or the rook for a castle
    pub target: Option<PieceKind>,
    pub castle: Option<CastleSide>,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Create a quiet move
    #[inline]
    pub const fn passing(start: Location, end: Location) -> Self {
        Move {
            start,
            end,
            kind: MoveType::Passing,
            target: None,
            castle: None,
            promotion: None,
        }
    }

    /// Create a capture move
    #[inline]
    pub const fn capture(start: Location, end: Location, target: PieceKind) -> Self {
        Move {
            start,
            end,
            kind: MoveType::Capture,
            target: Some(target),
            castle: None,
            promotion: None,
        }
    }

    /// Create a castling move; `start`/`end` are the king's squares
    #[inline]
    pub const fn castle(start: Location, end: Location, side: CastleSide) -> Self {
        Move {
            start,
            end,
            kind: MoveType::Castle,
            target: Some(PieceKind::Rook),
            castle: Some(side),
            promotion: None,
        }
    }

    /// Create a promotion move
    #[inline]
    pub const fn promotion(start: Location, end: Location, promotion: PieceKind) -> Self {
        Move {
            start,
            end,
            kind: MoveType::Promotion,
            target: None,
            castle: None,
            promotion: Some(promotion),
        }
    }

    /// Create a capture that also promotes
    #[inline]
    pub const fn capture_and_promotion(
        start: Location,
        end: Location,
        target: PieceKind,
        promotion: PieceKind,
    ) -> Self {
        Move {
            start,
            end,
            kind: MoveType::CaptureAndPromotion,
            target: Some(target),
            castle: None,
            promotion: Some(promotion),
        }
    }

    /// Turn a pawn move reaching the last rank into one of its promotions
    pub const fn promoted_to(self, promotion: PieceKind) -> Self {
        match self.target {
            Some(target) => Move::capture_and_promotion(self.start, self.end, target, promotion),
            None => Move::promotion(self.start, self.end, promotion),
        }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self.kind, MoveType::Capture | MoveType::CaptureAndPromotion)
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind, MoveType::Promotion | MoveType::CaptureAndPromotion)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveType::Castle)
    }

    /// Coordinate notation (e.g., "e2e4", "e7e8q", "e1g1")
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.start, self.end, kind.to_char()),
            None => format!("{}{}", self.start, self.end),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
