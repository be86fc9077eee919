//! Named, depth-indexed position collections.
//!
//! A store holds one collection per classification bucket: `depth-N` for every solved ply and
//! one `undecided` frontier. Writers never touch a live collection: [`PositionStore::append`]
//! fills a staged copy, and [`PositionStore::publish`] swaps a group of staged copies live in one
//! atomic step. A pass therefore either lands completely (new depth-set plus shrunk frontier) or
//! not at all.
//!
//! - [`memory::MemoryStore`]: in-process, for tests and one-shot solves.
//! - [`dir::DirStore`]: text files in a directory plus a JSON manifest.
//! - [`record`]: the one-line text encoding of a position.

pub mod dir;
pub mod memory;
pub mod record;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::position::Position;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Identifies one collection in a store.
pub enum CollectionId {
    /// Positions whose distance to mate is exactly this many plies.
    Depth(u32),
    /// Positions not classified yet.
    Undecided,
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionId::Depth(n) => write!(f, "depth-{n}"),
            CollectionId::Undecided => write!(f, "undecided"),
        }
    }
}

/// A lazy scan over one collection, in insertion order.
pub type PositionScan<'a> = Box<dyn Iterator<Item = Result<Position>> + 'a>;

pub trait PositionStore {
    /// Has `id` been published?
    fn exists(&self, id: CollectionId) -> bool;

    /// Reads a published collection. Calling it again restarts from the first record.
    fn scan(&self, id: CollectionId) -> Result<PositionScan<'_>>;

    /// Appends to the staged copy of `id`, creating an empty one first if needed.
    fn append(&mut self, id: CollectionId, position: Position) -> Result<()>;

    /// Atomically replaces every collection in `ids` with its staged copy. An id that was never
    /// staged is published empty.
    fn publish(&mut self, ids: &[CollectionId]) -> Result<()>;

    /// Drops all staged copies.
    fn discard(&mut self) -> Result<()>;

    /// Number of records in a published collection.
    fn count(&self, id: CollectionId) -> Result<usize> {
        let mut n = 0;
        for record in self.scan(id)? {
            record?;
            n += 1;
        }
        Ok(n)
    }

    fn read_all(&self, id: CollectionId) -> Result<Vec<Position>> {
        self.scan(id)?.collect()
    }

    /// Stages `positions` as the new contents of `id` and publishes it.
    fn replace<I>(&mut self, id: CollectionId, positions: I) -> Result<()>
    where
        I: IntoIterator<Item = Position>,
        Self: Sized,
    {
        for p in positions {
            self.append(id, p)?;
        }
        self.publish(&[id])
    }

    /// Published depths in ascending order.
    fn depths(&self) -> Vec<u32>;
}
