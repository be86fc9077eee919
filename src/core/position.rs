use std::fmt;

use crate::core::square::Square;
use crate::core::symmetry::{self, Symmetry};
use crate::error::{Result, TablebaseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Side to move.
pub enum Side {
    White,
    Black,
}

/// A King + Hawk vs King position.
///
/// The three squares are pairwise distinct and the kings are never adjacent; [`Position::new`]
/// checks both. Nothing here requires the White king to be on a canonical square; see
/// [`Position::canonical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    white_king: Square,
    black_king: Square,
    hawk: Square,
    to_move: Side,
}

impl Position {
    pub fn new(white_king: Square, black_king: Square, hawk: Square, to_move: Side) -> Result<Self> {
        if white_king == black_king || white_king == hawk || black_king == hawk {
            return Err(TablebaseError::InvalidPosition {
                reason: format!("pieces share a square (K{white_king} k{black_king} H{hawk})"),
            });
        }
        if white_king.is_adjacent(black_king) {
            return Err(TablebaseError::InvalidPosition {
                reason: format!("kings on {white_king} and {black_king} are adjacent"),
            });
        }
        Ok(Self::new_unchecked(white_king, black_king, hawk, to_move))
    }

    /// Callers guarantee the [`Position::new`] invariants.
    #[inline]
    pub(crate) fn new_unchecked(
        white_king: Square,
        black_king: Square,
        hawk: Square,
        to_move: Side,
    ) -> Self {
        debug_assert!(white_king != black_king && white_king != hawk && black_king != hawk);
        debug_assert!(!white_king.is_adjacent(black_king));
        Self {
            white_king,
            black_king,
            hawk,
            to_move,
        }
    }

    #[inline]
    pub fn white_king(&self) -> Square {
        self.white_king
    }

    #[inline]
    pub fn black_king(&self) -> Square {
        self.black_king
    }

    #[inline]
    pub fn hawk(&self) -> Square {
        self.hawk
    }

    #[inline]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// The same position with `to_move` replaced.
    #[inline]
    pub fn with_to_move(self, to_move: Side) -> Self {
        Self { to_move, ..self }
    }

    /// Applies `sym` to all three squares. Symmetries are bijections that preserve adjacency, so
    /// the invariants survive.
    #[inline]
    pub fn transformed(self, sym: Symmetry) -> Self {
        Self {
            white_king: sym.apply(self.white_king),
            black_king: sym.apply(self.black_king),
            hawk: sym.apply(self.hawk),
            to_move: self.to_move,
        }
    }

    /// The symmetric image with the White king in the fundamental domain.
    #[inline]
    pub fn canonical(self) -> Self {
        self.transformed(symmetry::canonicalizing(self.white_king))
    }

    #[inline]
    pub fn is_canonical(&self) -> bool {
        symmetry::is_canonical_white_king_square(self.white_king)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.to_move {
            Side::White => "w",
            Side::Black => "b",
        };
        write!(f, "K{} k{} H{} {side}", self.white_king, self.black_king, self.hawk)
    }
}
