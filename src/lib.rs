//! Retrograde tablebase for King + Hawk vs King.
//!
//! The Hawk is the Seirawan-chess piece that moves as a knight or a bishop. The crate enumerates
//! every legal position (White king folded into a 10-square fundamental domain), seeds depth 0
//! with the checkmates, then alternates White and Black retrograde passes until a pass
//! classifies nothing. Whatever is still undecided at that point is a draw.

pub mod chess;
pub mod core;
pub mod error;
pub mod search;
pub mod store;
pub mod tablebase;

pub use error::{Result, TablebaseError};
