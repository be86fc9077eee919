//! Exhaustive enumeration of the KHK position space.
//!
//! The White king ranges over the 10 canonical squares only; the Black king and the Hawk range
//! over the whole board. No other symmetry folding happens here, so positions with the White
//! king on the a1-h8 diagonal appear together with their mirror images.

use crate::chess::rules::{in_check, is_checkmate};
use crate::core::position::{Position, Side};
use crate::core::square::Square;
use crate::core::symmetry::canonical_white_king_squares;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialClass {
    /// Black to move and checkmated.
    Mate,
    Undecided,
}

/// Calls `emit` once per legal position, in generation order.
///
/// For every placement the Black-to-move position comes first (mate or undecided), then the
/// White-to-move one, which exists only when the Black king is not in check: White cannot be on
/// move while Black is in check.
pub fn try_for_each_position<E>(
    mut emit: impl FnMut(Position, InitialClass) -> Result<(), E>,
) -> Result<(), E> {
    for white_king in canonical_white_king_squares() {
        for black_king in Square::all() {
            if black_king == white_king || black_king.is_adjacent(white_king) {
                continue;
            }
            for hawk in Square::all() {
                if hawk == white_king || hawk == black_king {
                    continue;
                }

                let btm = Position::new_unchecked(white_king, black_king, hawk, Side::Black);
                let class = if is_checkmate(&btm) {
                    InitialClass::Mate
                } else {
                    InitialClass::Undecided
                };
                emit(btm, class)?;

                if !in_check(&btm) {
                    emit(btm.with_to_move(Side::White), InitialClass::Undecided)?;
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    pub mates: Vec<Position>,
    pub undecided: Vec<Position>,
}

/// Collects [`try_for_each_position`] into memory.
pub fn enumerate_positions() -> Enumeration {
    let mut out = Enumeration::default();
    let collected: Result<(), std::convert::Infallible> = try_for_each_position(|p, class| {
        match class {
            InitialClass::Mate => out.mates.push(p),
            InitialClass::Undecided => out.undecided.push(p),
        }
        Ok(())
    });
    match collected {
        Ok(()) => out,
        Err(never) => match never {},
    }
}
