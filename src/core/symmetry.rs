//! The dihedral group of the board and the White-king fundamental domain.
//!
//! Every element is a signed permutation of (file, rank): an optional transpose followed by
//! optional file/rank reflections. Composition and inversion are closed-form on that
//! representation, so the group laws hold by construction.
//!
//! Depth-sets only ever store positions whose White king sits in the 10-square triangle
//! a1-d1-d4 ([`is_canonical_white_king_square`]). [`canonicalizing`] maps any square to the
//! symmetry that carries it into that triangle; the table is built at compile time and the
//! build fails if some square had no image in the domain.

use crate::core::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    /// `file -> 7 - file`.
    ReflectFile,
    /// `rank -> 7 - rank`.
    ReflectRank,
    /// Swap file and rank.
    ReflectA1H8,
    ReflectA8H1,
    /// Clockwise quarter turn.
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Symmetry {
    /// All elements, in the order [`canonicalizing`] tries them.
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::ReflectFile,
        Symmetry::ReflectRank,
        Symmetry::ReflectA1H8,
        Symmetry::ReflectA8H1,
        Symmetry::Rotate90,
        Symmetry::Rotate180,
        Symmetry::Rotate270,
    ];

    /// `(transpose, flip_file, flip_rank)`, applied in that order.
    const fn parts(self) -> (bool, bool, bool) {
        match self {
            Symmetry::Identity => (false, false, false),
            Symmetry::ReflectFile => (false, true, false),
            Symmetry::ReflectRank => (false, false, true),
            Symmetry::ReflectA1H8 => (true, false, false),
            Symmetry::ReflectA8H1 => (true, true, true),
            Symmetry::Rotate90 => (true, false, true),
            Symmetry::Rotate180 => (false, true, true),
            Symmetry::Rotate270 => (true, true, false),
        }
    }

    const fn from_parts(transpose: bool, flip_file: bool, flip_rank: bool) -> Symmetry {
        match (transpose, flip_file, flip_rank) {
            (false, false, false) => Symmetry::Identity,
            (false, true, false) => Symmetry::ReflectFile,
            (false, false, true) => Symmetry::ReflectRank,
            (true, false, false) => Symmetry::ReflectA1H8,
            (true, true, true) => Symmetry::ReflectA8H1,
            (true, false, true) => Symmetry::Rotate90,
            (false, true, true) => Symmetry::Rotate180,
            (true, true, false) => Symmetry::Rotate270,
        }
    }

    #[inline]
    pub const fn apply(self, sq: Square) -> Square {
        let (transpose, flip_file, flip_rank) = self.parts();
        let (mut file, mut rank) = if transpose {
            (sq.rank(), sq.file())
        } else {
            (sq.file(), sq.rank())
        };
        if flip_file {
            file = 7 - file;
        }
        if flip_rank {
            rank = 7 - rank;
        }
        Square::at(file, rank)
    }

    /// `self.compose(inner).apply(s) == self.apply(inner.apply(s))`.
    pub const fn compose(self, inner: Symmetry) -> Symmetry {
        let (t_outer, f_outer, r_outer) = self.parts();
        let (t_inner, f_inner, r_inner) = inner.parts();
        // A transpose after `inner` exchanges which axis inner's reflections act on.
        let (f_moved, r_moved) = if t_outer {
            (r_inner, f_inner)
        } else {
            (f_inner, r_inner)
        };
        Symmetry::from_parts(t_outer ^ t_inner, f_outer ^ f_moved, r_outer ^ r_moved)
    }

    pub const fn inverse(self) -> Symmetry {
        let (transpose, flip_file, flip_rank) = self.parts();
        if transpose {
            Symmetry::from_parts(true, flip_rank, flip_file)
        } else {
            self
        }
    }
}

/// The 10 White-king squares kept by the enumerator: `rank <= file <= 3`
/// (a1 b1 c1 d1 b2 c2 d2 c3 d3 d4).
#[inline]
pub const fn is_canonical_white_king_square(sq: Square) -> bool {
    sq.rank() <= sq.file() && sq.file() <= 3
}

/// The canonical White-king squares in ascending 0x88 order.
pub fn canonical_white_king_squares() -> impl Iterator<Item = Square> {
    Square::all().filter(|&sq| is_canonical_white_king_square(sq))
}

/// The symmetry that carries `sq` into the fundamental domain.
///
/// For squares already in the domain this is [`Symmetry::Identity`]. Squares on a symmetry axis
/// have more than one choice; the first in [`Symmetry::ALL`] order wins.
#[inline]
pub fn canonicalizing(sq: Square) -> Symmetry {
    CANONICALIZING[sq.index() as usize]
}

static CANONICALIZING: [Symmetry; 128] = build_canonicalizing_table();

const fn build_canonicalizing_table() -> [Symmetry; 128] {
    let mut table = [Symmetry::Identity; 128];
    let mut index = 0u8;
    while index < 0x78 {
        if let Some(sq) = Square::new(index) {
            let mut found = false;
            let mut i = 0;
            while i < Symmetry::ALL.len() {
                let sym = Symmetry::ALL[i];
                if is_canonical_white_king_square(sym.apply(sq)) {
                    table[index as usize] = sym;
                    found = true;
                    break;
                }
                i += 1;
            }
            if !found {
                panic!("square without an image in the White-king domain");
            }
        }
        index += 1;
    }
    table
}
