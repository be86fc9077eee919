use rustc_hash::FxHashSet;
use tracing::debug;

use crate::core::position::Position;
use crate::error::Result;
use crate::store::{CollectionId, PositionStore};

/// Exact-key membership over one or more published collections.
///
/// Built once per pass and read-only afterwards; replaces re-reading whole collections for every
/// retraction candidate.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    positions: FxHashSet<Position>,
}

impl PositionIndex {
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    /// Loads the union of `ids`. Every collection must have been published.
    pub fn load<S: PositionStore>(store: &S, ids: &[CollectionId]) -> Result<Self> {
        let mut positions = FxHashSet::default();
        for &id in ids {
            for p in store.scan(id)? {
                positions.insert(p?);
            }
        }
        debug!(collections = ?ids, positions = positions.len(), "built position index");
        Ok(Self { positions })
    }

    #[inline]
    pub fn contains(&self, p: &Position) -> bool {
        self.positions.contains(p)
    }
}
