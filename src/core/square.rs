use std::fmt;
use std::str::FromStr;

/// A board square in 0x88 layout: `index = 16 * rank + file`.
///
/// Only the 64 indices with `index & 0x88 == 0` are squares; the constructor rejects the rest,
/// so a `Square` is on-board by construction. Steps between squares are constant offsets
/// (`+1` file, `+16` rank, `+17`/`+15` diagonals) and stepping off the board is a single mask test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

/// King steps in scan order: rank below, same rank, rank above; file left to right.
pub const KING_STEPS: [i8; 8] = [-17, -16, -15, -1, 1, 15, 16, 17];

/// The eight knight leaps of the Hawk.
pub const KNIGHT_LEAPS: [i8; 8] = [-33, -31, -18, -14, 14, 18, 31, 33];

/// Unit steps along both diagonals (a1-h8 direction is `±17`, a8-h1 direction is `±15`).
pub const DIAGONAL_STEPS: [i8; 4] = [17, 15, -15, -17];

/// True iff `index` is one of the 64 on-board 0x88 indices.
#[inline]
pub const fn on_board(index: i16) -> bool {
    index >= 0 && index < 0x80 && index & 0x88 == 0
}

impl Square {
    pub const A1: Square = Square(0x00);
    pub const H8: Square = Square(0x77);

    #[inline]
    pub const fn new(index: u8) -> Option<Square> {
        if on_board(index as i16) {
            Some(Square(index))
        } else {
            None
        }
    }

    /// File and rank are taken modulo 8, so this is total.
    #[inline]
    pub const fn at(file: u8, rank: u8) -> Square {
        Square(((rank & 7) << 4) | (file & 7))
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 >> 4
    }

    /// The square `delta` 0x88 steps away, or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Square> {
        let target = self.0 as i16 + delta as i16;
        if on_board(target) {
            Some(Square(target as u8))
        } else {
            None
        }
    }

    /// One king step apart (8-connectivity). A square is not adjacent to itself.
    #[inline]
    pub fn is_adjacent(self, other: Square) -> bool {
        let delta = other.0 as i16 - self.0 as i16;
        KING_STEPS.iter().any(|&step| step as i16 == delta)
    }

    /// All 64 squares in ascending 0x88 order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..0x78).filter_map(Square::new)
    }

    /// On-board king neighbours, in [`KING_STEPS`] order.
    pub fn king_neighbors(self) -> impl Iterator<Item = Square> {
        KING_STEPS.into_iter().filter_map(move |step| self.offset(step))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = String;

    /// Parses algebraic names (`e4`) or raw 0x88 indices (`52`).
    fn from_str(s: &str) -> Result<Square, String> {
        let s = s.trim();
        if let Ok(index) = s.parse::<u8>() {
            return Square::new(index).ok_or_else(|| format!("{index} is not an on-board 0x88 index"));
        }
        let bytes = s.as_bytes();
        match bytes {
            [f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok(Square::at(f - b'a', r - b'1')),
            _ => Err(format!("invalid square {s:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_64_indices_are_on_board() {
        assert_eq!((0i16..128).filter(|&i| on_board(i)).count(), 64);
        assert_eq!(Square::all().count(), 64);
        assert!(!on_board(0x08));
        assert!(!on_board(-1));
        assert!(!on_board(0x78));
    }

    #[test]
    fn offsets_do_not_wrap_around_the_edge() {
        assert_eq!(Square::A1.offset(-1), None);
        assert_eq!(Square::at(7, 0).offset(1), None);
        assert_eq!(Square::H8.offset(16), None);
        assert_eq!(Square::A1.offset(17), Some(Square::at(1, 1)));
    }

    #[test]
    fn corner_has_three_neighbours() {
        assert_eq!(Square::A1.king_neighbors().count(), 3);
        assert_eq!(Square::at(3, 3).king_neighbors().count(), 8);
    }

    #[test]
    fn algebraic_names_roundtrip() {
        for sq in Square::all() {
            assert_eq!(sq.to_string().parse::<Square>(), Ok(sq));
        }
        assert_eq!("d4".parse::<Square>(), Ok(Square::new(51).unwrap()));
        assert!("i1".parse::<Square>().is_err());
        assert!("8".parse::<Square>().is_err());
    }
}
