//! Retrograde analysis for King + Hawk vs King.
//!
//! - [`enumerate`]: the initial split of the position space into mates and the undecided frontier.
//! - [`index`]: hashed membership over published depth-sets.
//! - [`retro`]: the pure White and Black retrograde steps.
//! - [`solver`]: pass orchestration over a [`crate::store::PositionStore`].

pub mod enumerate;
pub mod index;
pub mod retro;
pub mod solver;
