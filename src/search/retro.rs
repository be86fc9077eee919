//! One-ply retrograde steps.
//!
//! Depth-sets alternate sides: depth 0 holds Black-to-move mates, odd depths hold White-to-move
//! wins, even depths hold Black-to-move losses.
//!
//! - White step (odd depth D): a White-to-move position is won in D plies if some White move
//!   reaches depth D-1.
//! - Black step (even depth D): a Black-to-move position is lost in D plies if every legal Black
//!   king move reaches some odd depth below D. Capturing the Hawk is never covered, and a
//!   position without moves that is not in check is a stalemate and stays undecided.
//!
//! Lookups always canonicalize the successor first, since depth-sets only store positions with
//! the White king in the fundamental domain.

use crate::chess::rules::{black_king_destinations, hawk_destinations, is_stalemate, white_king_destinations};
use crate::core::position::{Position, Side};
use crate::search::index::PositionIndex;

#[derive(Debug, Clone, Default)]
pub struct PassOutcome {
    /// Positions that land in the new depth-set.
    pub classified: Vec<Position>,
    /// The new undecided set, in input order.
    pub remaining: Vec<Position>,
    /// Black-to-move positions kept undecided because they are stalemate.
    pub stalemates: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlackReply {
    /// Every legal king move runs into a known White win.
    Forced,
    /// At least one move is not known to lose (a capture, or a position not solved yet).
    Escapes,
    Stalemate,
}

/// White to move: does some White move reach a position in `previous`?
///
/// Hawk moves are tried first, then king moves in king-step order.
pub fn white_can_reach(pos: &Position, previous: &PositionIndex) -> bool {
    let (wk, bk, hawk) = (pos.white_king(), pos.black_king(), pos.hawk());

    hawk_destinations(pos).any(|to| {
        previous.contains(&Position::new_unchecked(wk, bk, to, Side::Black).canonical())
    }) || white_king_destinations(pos).any(|to| {
        previous.contains(&Position::new_unchecked(to, bk, hawk, Side::Black).canonical())
    })
}

/// Black to move: is every legal Black king move covered by `wins`?
pub fn black_reply(pos: &Position, wins: &PositionIndex) -> BlackReply {
    let (wk, hawk) = (pos.white_king(), pos.hawk());

    let covered = black_king_destinations(pos).all(|to| {
        to != hawk && wins.contains(&Position::new_unchecked(wk, to, hawk, Side::White).canonical())
    });

    if !covered {
        BlackReply::Escapes
    } else if is_stalemate(pos) {
        BlackReply::Stalemate
    } else {
        BlackReply::Forced
    }
}

/// Classifies the White-to-move part of `undecided` against depth D-1.
pub fn white_retreat(undecided: &[Position], previous: &PositionIndex) -> PassOutcome {
    let mut out = PassOutcome::default();
    for &pos in undecided {
        if pos.to_move() == Side::White && white_can_reach(&pos, previous) {
            out.classified.push(pos);
        } else {
            out.remaining.push(pos);
        }
    }
    out
}

/// Classifies the Black-to-move part of `undecided` against the union of all odd depths below D.
pub fn black_retreat(undecided: &[Position], wins: &PositionIndex) -> PassOutcome {
    let mut out = PassOutcome::default();
    for &pos in undecided {
        if pos.to_move() == Side::White {
            out.remaining.push(pos);
            continue;
        }
        match black_reply(&pos, wins) {
            BlackReply::Forced => out.classified.push(pos),
            BlackReply::Escapes => out.remaining.push(pos),
            BlackReply::Stalemate => {
                out.stalemates += 1;
                out.remaining.push(pos);
            }
        }
    }
    out
}
