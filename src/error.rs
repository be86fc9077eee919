//! Crate-wide error type.
//!
//! Every failure here is fatal for the run: the store is written only by this crate, so a bad
//! record or a missing depth means an earlier pass did not complete. Variants carry enough
//! context (stage, collection, line) to find the affected depth and re-derive it.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TablebaseError {
    /// A stored record does not decode to a valid position.
    #[error("malformed record in {collection} at line {line}: {reason}")]
    MalformedRecord {
        collection: String,
        line: usize,
        reason: String,
    },

    /// A pass needs a collection that was never published.
    #[error("{stage}: collection {collection} has not been published")]
    MissingCollection {
        stage: &'static str,
        collection: String,
    },

    /// A pass was requested for a depth that cannot be computed yet (or at all).
    #[error("{stage}: cannot compute depth {depth}: {reason}")]
    InvalidDepth {
        stage: &'static str,
        depth: u32,
        reason: String,
    },

    /// A pass could not read its inputs or publish its results.
    #[error("{stage} depth {depth} failed: {source}")]
    Pass {
        stage: &'static str,
        depth: u32,
        #[source]
        source: Box<TablebaseError>,
    },

    /// A position handed in from outside (CLI, probe) is not legal for this material.
    #[error("invalid position: {reason}")]
    InvalidPosition { reason: String },

    /// Internal consistency check failed (e.g. a symmetry image collided two pieces).
    #[error("internal invariant violated at {stage}: {detail}")]
    Invariant { stage: &'static str, detail: String },

    #[error("I/O failure at {stage} on {path}: {source}")]
    Io {
        stage: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("manifest {path} could not be read or written: {source}")]
    Manifest {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TablebaseError {
    /// Tags an error raised while running the pass for `depth`.
    pub fn in_pass(self, stage: &'static str, depth: u32) -> Self {
        TablebaseError::Pass {
            stage,
            depth,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TablebaseError>;
