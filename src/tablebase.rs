//! Read-only lookup over a solved (or partially solved) store.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::chess::rules::in_check;
use crate::core::position::{Position, Side};
use crate::error::{Result, TablebaseError};
use crate::store::{CollectionId, PositionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// White mates in this many plies from the position (0: Black is already mated).
    Win { plies: u32 },
    /// Undecided after the fixed point.
    Draw,
    /// Undecided, but the solve has not reached its fixed point yet.
    Unknown,
}

#[derive(Debug, Clone, Default)]
pub struct Tablebase {
    depths: FxHashMap<Position, u32>,
    undecided: FxHashSet<Position>,
    solved: bool,
}

impl Tablebase {
    /// Loads every published depth-set and the undecided frontier.
    pub fn load<S: PositionStore>(store: &S) -> Result<Self> {
        let mut tb = Self::default();
        let depths = store.depths();
        for &d in &depths {
            for p in store.scan(CollectionId::Depth(d))? {
                tb.depths.insert(p?, d);
            }
        }
        if store.exists(CollectionId::Undecided) {
            for p in store.scan(CollectionId::Undecided)? {
                tb.undecided.insert(p?);
            }
        }

        // Solved once the last published depth (above 0) came out empty.
        tb.solved = match depths.last() {
            Some(&last) if last > 0 => store.count(CollectionId::Depth(last))? == 0,
            _ => false,
        };
        debug!(
            classified = tb.depths.len(),
            undecided = tb.undecided.len(),
            solved = tb.solved,
            "loaded tablebase"
        );
        Ok(tb)
    }

    /// Has the solve reached its fixed point?
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Looks up any legal position; it is canonicalized first.
    ///
    /// White to move while Black is in check cannot arise and is rejected.
    pub fn probe(&self, position: Position) -> Result<Verdict> {
        if position.to_move() == Side::White && in_check(&position) {
            return Err(TablebaseError::InvalidPosition {
                reason: format!("{position}: White to move while Black is in check"),
            });
        }

        let key = position.canonical();
        if let Some(&plies) = self.depths.get(&key) {
            return Ok(Verdict::Win { plies });
        }
        if self.solved && self.undecided.contains(&key) {
            return Ok(Verdict::Draw);
        }
        Ok(Verdict::Unknown)
    }
}
