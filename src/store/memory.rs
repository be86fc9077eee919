use rustc_hash::FxHashMap;

use crate::core::position::Position;
use crate::error::{Result, TablebaseError};
use crate::store::{CollectionId, PositionScan, PositionStore};

/// A store that keeps every collection in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    live: FxHashMap<CollectionId, Vec<Position>>,
    staged: FxHashMap<CollectionId, Vec<Position>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a published collection without copying.
    pub fn get(&self, id: CollectionId) -> Option<&[Position]> {
        self.live.get(&id).map(Vec::as_slice)
    }
}

impl PositionStore for MemoryStore {
    fn exists(&self, id: CollectionId) -> bool {
        self.live.contains_key(&id)
    }

    fn scan(&self, id: CollectionId) -> Result<PositionScan<'_>> {
        let records = self
            .live
            .get(&id)
            .ok_or_else(|| TablebaseError::MissingCollection {
                stage: "memory_scan",
                collection: id.to_string(),
            })?;
        Ok(Box::new(records.iter().copied().map(Ok)))
    }

    fn append(&mut self, id: CollectionId, position: Position) -> Result<()> {
        self.staged.entry(id).or_default().push(position);
        Ok(())
    }

    fn publish(&mut self, ids: &[CollectionId]) -> Result<()> {
        for &id in ids {
            let records = self.staged.remove(&id).unwrap_or_default();
            self.live.insert(id, records);
        }
        Ok(())
    }

    fn discard(&mut self) -> Result<()> {
        self.staged.clear();
        Ok(())
    }

    fn count(&self, id: CollectionId) -> Result<usize> {
        self.live
            .get(&id)
            .map(Vec::len)
            .ok_or_else(|| TablebaseError::MissingCollection {
                stage: "memory_count",
                collection: id.to_string(),
            })
    }

    fn depths(&self) -> Vec<u32> {
        let mut depths: Vec<u32> = self
            .live
            .keys()
            .filter_map(|id| match id {
                CollectionId::Depth(n) => Some(*n),
                CollectionId::Undecided => None,
            })
            .collect();
        depths.sort_unstable();
        depths
    }
}
