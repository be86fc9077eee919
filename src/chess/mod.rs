//! Rules for King + Hawk vs King.

pub mod attacks;
pub mod rules;
