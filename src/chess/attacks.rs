use crate::core::square::{Square, DIAGONAL_STEPS, KNIGHT_LEAPS};

/// Does a Hawk on `hawk` attack `target`, with the White king on `white_king`?
///
/// The Hawk leaps like a knight and slides along both diagonals. Only the White king blocks the
/// slide: the Black king is transparent, so a Hawk checking along a diagonal also covers the
/// squares behind the king. A piece never attacks its own square.
pub fn hawk_attacks(white_king: Square, hawk: Square, target: Square) -> bool {
    if target == hawk {
        return false;
    }

    let delta = target.index() as i16 - hawk.index() as i16;
    if KNIGHT_LEAPS.iter().any(|&leap| leap as i16 == delta) {
        return true;
    }

    DIAGONAL_STEPS
        .iter()
        .any(|&step| ray_reaches(hawk, target, step, white_king))
}

/// Every square a Hawk on `hawk` attacks: knight leaps first, then each diagonal ray in
/// [`DIAGONAL_STEPS`] order. A ray ends on the White king's square (included).
pub fn hawk_targets(white_king: Square, hawk: Square) -> impl Iterator<Item = Square> {
    let leaps = KNIGHT_LEAPS.into_iter().filter_map(move |leap| hawk.offset(leap));
    let rays = DIAGONAL_STEPS.into_iter().flat_map(move |step| {
        std::iter::successors(hawk.offset(step), move |&sq| {
            if sq == white_king {
                None
            } else {
                sq.offset(step)
            }
        })
    });
    leaps.chain(rays)
}

/// Kings attack the 8 surrounding squares.
#[inline]
pub fn king_attacks(king: Square, target: Square) -> bool {
    king.is_adjacent(target)
}

fn ray_reaches(from: Square, target: Square, step: i8, blocker: Square) -> bool {
    let mut cur = from.offset(step);
    while let Some(sq) = cur {
        if sq == target {
            return true;
        }
        if sq == blocker {
            return false;
        }
        cur = sq.offset(step);
    }
    false
}
