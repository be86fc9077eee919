//! Board primitives.
//!
//! - [`square`]: 0x88 squares, step tables and the on-board test.
//! - [`symmetry`]: the 8-element board symmetry group and the White-king fundamental domain.
//! - [`position`]: a (White king, Black king, Hawk, side to move) tuple.

pub mod position;
pub mod square;
pub mod symmetry;
