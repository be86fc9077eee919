use crate::chess::attacks::{hawk_attacks, hawk_targets, king_attacks};
use crate::core::position::{Position, Side};
use crate::core::square::Square;

/// Is `sq` controlled by White (Hawk or White king)?
#[inline]
fn covered_by_white(pos: &Position, sq: Square) -> bool {
    hawk_attacks(pos.white_king(), pos.hawk(), sq) || king_attacks(pos.white_king(), sq)
}

/// The Black king is attacked by the Hawk.
#[inline]
pub fn in_check(pos: &Position) -> bool {
    hawk_attacks(pos.white_king(), pos.hawk(), pos.black_king())
}

/// Black to move and every square of the 3x3 block around the Black king, the king's own square
/// included, is covered by White.
///
/// Because the king's own square is part of the sweep, a mate is always a check; this is what
/// keeps [`is_checkmate`] and [`is_stalemate`] disjoint.
pub fn is_checkmate(pos: &Position) -> bool {
    if pos.to_move() == Side::White {
        return false;
    }
    covered_by_white(pos, pos.black_king())
        && pos
            .black_king()
            .king_neighbors()
            .all(|sq| covered_by_white(pos, sq))
}

/// Black to move, every neighbour of the Black king is covered, and the king is not in check.
pub fn is_stalemate(pos: &Position) -> bool {
    if pos.to_move() == Side::White {
        return false;
    }
    !in_check(pos)
        && pos
            .black_king()
            .king_neighbors()
            .all(|sq| covered_by_white(pos, sq))
}

/// Legal Black king moves, in king-step order.
///
/// Stepping onto the Hawk captures it; that is legal whenever the White king does not defend the
/// square (the Hawk never attacks its own square).
pub fn black_king_destinations(pos: &Position) -> impl Iterator<Item = Square> + '_ {
    pos.black_king()
        .king_neighbors()
        .filter(move |&sq| !covered_by_white(pos, sq))
}

/// Squares the Hawk can move to: attacked by it and not occupied by a king.
///
/// The Hawk never captures the Black king, so the Black king's square is excluded even when it
/// is attacked.
pub fn hawk_destinations(pos: &Position) -> impl Iterator<Item = Square> + '_ {
    hawk_targets(pos.white_king(), pos.hawk())
        .filter(move |&sq| sq != pos.white_king() && sq != pos.black_king())
}

/// Legal White king moves, in king-step order: onto an empty square not adjacent to the Black
/// king.
pub fn white_king_destinations(pos: &Position) -> impl Iterator<Item = Square> + '_ {
    pos.white_king().king_neighbors().filter(move |&sq| {
        sq != pos.black_king() && sq != pos.hawk() && !sq.is_adjacent(pos.black_king())
    })
}
