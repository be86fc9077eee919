//! Pass orchestration over a [`PositionStore`].
//!
//! Depth progression is strictly sequential: depth 0 and the initial frontier come from
//! [`Solver::initialize`], then depth D is computed by a White pass (odd D) or a Black pass
//! (even D) once every depth below it is published. Each pass reads immutable snapshots and
//! publishes the new depth-set together with the shrunk frontier in one atomic step.

use tracing::{debug, info};

use crate::core::position::Side;
use crate::error::{Result, TablebaseError};
use crate::search::enumerate::{try_for_each_position, InitialClass};
use crate::search::index::PositionIndex;
use crate::search::retro::{self, PassOutcome};
use crate::store::{CollectionId, PositionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    pub depth: u32,
    /// The side to move in the positions this pass classified.
    pub mover: Side,
    pub classified: usize,
    pub stalemates: usize,
    /// Size of the undecided set after the pass.
    pub remaining: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SolveOptions {
    /// Stop after this depth even if the fixed point was not reached.
    pub max_depth: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveSummary {
    /// `depth_counts[d]` is the size of depth-set `d`.
    pub depth_counts: Vec<usize>,
    pub undecided: usize,
    /// The last published pass classified nothing; the undecided set is the draw set.
    pub fixed_point: bool,
}

impl SolveSummary {
    /// Deepest non-empty depth-set.
    pub fn longest_win(&self) -> Option<u32> {
        self.depth_counts
            .iter()
            .rposition(|&n| n > 0)
            .map(|d| d as u32)
    }

    pub fn classified(&self) -> usize {
        self.depth_counts.iter().sum()
    }
}

#[derive(Debug)]
pub struct Solver<S> {
    store: S,
}

impl<S: PositionStore> Solver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn is_initialized(&self) -> bool {
        self.store.exists(CollectionId::Depth(0)) && self.store.exists(CollectionId::Undecided)
    }

    /// The first depth without a published depth-set.
    pub fn next_depth(&self) -> u32 {
        let mut next = 0;
        for d in self.store.depths() {
            if d != next {
                break;
            }
            next += 1;
        }
        next
    }

    /// Enumerates every position and publishes depth 0 (mates) and the initial frontier.
    pub fn initialize(&mut self) -> Result<PassReport> {
        if self.store.exists(CollectionId::Depth(0)) {
            return Err(TablebaseError::InvalidDepth {
                stage: "initialize",
                depth: 0,
                reason: "depth 0 is already published".to_string(),
            });
        }

        let (mut mates, mut undecided) = (0usize, 0usize);
        let store = &mut self.store;
        let enumerated = try_for_each_position(|p, class| match class {
            InitialClass::Mate => {
                mates += 1;
                store.append(CollectionId::Depth(0), p)
            }
            InitialClass::Undecided => {
                undecided += 1;
                store.append(CollectionId::Undecided, p)
            }
        });
        if let Err(e) = enumerated {
            self.store.discard()?;
            return Err(e);
        }
        self.store
            .publish(&[CollectionId::Depth(0), CollectionId::Undecided])?;

        info!(mates, undecided, "enumerated KHK positions");
        Ok(PassReport {
            depth: 0,
            mover: Side::Black,
            classified: mates,
            stalemates: 0,
            remaining: undecided,
        })
    }

    /// Runs the pass for `depth`: White for odd depths, Black for even ones.
    pub fn run_pass(&mut self, depth: u32) -> Result<PassReport> {
        if depth % 2 == 1 {
            self.white_pass(depth)
        } else {
            self.black_pass(depth)
        }
    }

    /// Depth `depth` (odd): White-to-move positions with a move into depth `depth - 1`.
    pub fn white_pass(&mut self, depth: u32) -> Result<PassReport> {
        self.check_pass("white_pass", depth, Side::White)?;

        self.run_checked("white_pass", depth, |store| {
            let previous = PositionIndex::load(store, &[CollectionId::Depth(depth - 1)])?;
            let undecided = store.read_all(CollectionId::Undecided)?;
            Ok(retro::white_retreat(&undecided, &previous))
        })
    }

    /// Depth `depth` (even): Black-to-move positions whose every move reaches an odd depth
    /// below `depth`.
    pub fn black_pass(&mut self, depth: u32) -> Result<PassReport> {
        self.check_pass("black_pass", depth, Side::Black)?;

        let odd: Vec<CollectionId> = (1..depth).step_by(2).map(CollectionId::Depth).collect();
        self.run_checked("black_pass", depth, |store| {
            let wins = PositionIndex::load(store, &odd)?;
            let undecided = store.read_all(CollectionId::Undecided)?;
            Ok(retro::black_retreat(&undecided, &wins))
        })
    }

    /// Runs passes until one classifies nothing, or until `options.max_depth` is passed.
    pub fn solve(&mut self, options: SolveOptions) -> Result<SolveSummary> {
        if !self.is_initialized() {
            self.initialize()?;
        }
        loop {
            let summary = self.summary()?;
            if summary.fixed_point {
                info!(
                    longest_win = ?summary.longest_win(),
                    draws = summary.undecided,
                    "fixed point reached"
                );
                return Ok(summary);
            }
            let depth = self.next_depth();
            if options.max_depth.is_some_and(|max| depth > max) {
                return Ok(summary);
            }
            self.run_pass(depth)?;
        }
    }

    /// Counts of every published collection.
    pub fn summary(&self) -> Result<SolveSummary> {
        let next = self.next_depth();
        let mut depth_counts = Vec::with_capacity(next as usize);
        for d in 0..next {
            depth_counts.push(self.store.count(CollectionId::Depth(d))?);
        }
        let undecided = if self.store.exists(CollectionId::Undecided) {
            self.store.count(CollectionId::Undecided)?
        } else {
            0
        };
        let fixed_point = depth_counts.len() > 1 && depth_counts.last() == Some(&0);
        Ok(SolveSummary {
            depth_counts,
            undecided,
            fixed_point,
        })
    }

    fn check_pass(&self, stage: &'static str, depth: u32, mover: Side) -> Result<()> {
        let invalid = |reason: String| TablebaseError::InvalidDepth {
            stage,
            depth,
            reason,
        };

        if depth == 0 {
            return Err(invalid("depth 0 is produced by initialize".to_string()));
        }
        let (parity, kind) = match mover {
            Side::White => (1, "odd"),
            Side::Black => (0, "even"),
        };
        if depth % 2 != parity {
            return Err(invalid(format!("{stage} only computes {kind} depths")));
        }
        if self.store.exists(CollectionId::Depth(depth)) {
            return Err(invalid("already published; depth-sets are immutable".to_string()));
        }
        if !self.store.exists(CollectionId::Undecided) {
            return Err(TablebaseError::MissingCollection {
                stage,
                collection: CollectionId::Undecided.to_string(),
            });
        }
        if let Some(missing) = (0..depth).find(|&d| !self.store.exists(CollectionId::Depth(d))) {
            return Err(TablebaseError::MissingCollection {
                stage,
                collection: CollectionId::Depth(missing).to_string(),
            });
        }
        Ok(())
    }

    /// Computes a pass from the published inputs and publishes it. Failures past validation are
    /// tagged with the pass and its depth.
    fn run_checked(
        &mut self,
        stage: &'static str,
        depth: u32,
        step: impl FnOnce(&S) -> Result<PassOutcome>,
    ) -> Result<PassReport> {
        let mover = if depth % 2 == 1 { Side::White } else { Side::Black };
        let outcome = step(&self.store).map_err(|e| e.in_pass(stage, depth))?;
        self.publish_outcome(depth, mover, outcome)
            .map_err(|e| e.in_pass(stage, depth))
    }

    fn publish_outcome(
        &mut self,
        depth: u32,
        mover: Side,
        outcome: PassOutcome,
    ) -> Result<PassReport> {
        let report = PassReport {
            depth,
            mover,
            classified: outcome.classified.len(),
            stalemates: outcome.stalemates,
            remaining: outcome.remaining.len(),
        };

        if let Err(e) = self.stage_outcome(depth, outcome) {
            self.store.discard()?;
            return Err(e);
        }
        self.store
            .publish(&[CollectionId::Depth(depth), CollectionId::Undecided])?;

        info!(
            depth,
            mover = ?mover,
            classified = report.classified,
            remaining = report.remaining,
            "pass complete"
        );
        if report.stalemates > 0 {
            debug!(depth, stalemates = report.stalemates, "stalemates kept undecided");
        }
        Ok(report)
    }

    fn stage_outcome(&mut self, depth: u32, outcome: PassOutcome) -> Result<()> {
        for p in outcome.classified {
            self.store.append(CollectionId::Depth(depth), p)?;
        }
        for p in outcome.remaining {
            self.store.append(CollectionId::Undecided, p)?;
        }
        Ok(())
    }
}
