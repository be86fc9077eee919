use std::sync::OnceLock;

use hawk_tablebase::chess::rules::is_stalemate;
use hawk_tablebase::core::position::{Position, Side};
use hawk_tablebase::core::square::Square;
use hawk_tablebase::search::index::PositionIndex;
use hawk_tablebase::search::retro::{black_retreat, white_retreat};
use hawk_tablebase::search::solver::{SolveOptions, SolveSummary, Solver};
use hawk_tablebase::store::memory::MemoryStore;
use hawk_tablebase::store::{CollectionId, PositionStore};
use hawk_tablebase::tablebase::{Tablebase, Verdict};
use hawk_tablebase::TablebaseError;

const DEPTH_COUNTS: [usize; 36] = [
    60, 665, 8, 65, 62, 256, 42, 263, 209, 483, 176, 584, 270, 824, 442, 1172, 640, 1326, 939,
    1649, 2022, 2585, 3093, 3914, 4047, 5115, 5658, 5400, 6714, 2431, 5416, 572, 1583, 26, 102, 0,
];

fn solved() -> &'static (MemoryStore, SolveSummary) {
    static SOLVED: OnceLock<(MemoryStore, SolveSummary)> = OnceLock::new();
    SOLVED.get_or_init(|| {
        let mut solver = Solver::new(MemoryStore::new());
        let summary = solver.solve(SolveOptions::default()).unwrap();
        (solver.into_store(), summary)
    })
}

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn pos(wk: &str, bk: &str, hawk: &str, to_move: Side) -> Position {
    Position::new(sq(wk), sq(bk), sq(hawk), to_move).unwrap()
}

#[test]
fn full_solve_matches_golden_counts() {
    let (_, summary) = solved();
    assert!(summary.fixed_point);
    assert_eq!(summary.depth_counts, DEPTH_COUNTS.to_vec());
    assert_eq!(summary.undecided, 3_485);
    assert_eq!(summary.longest_win(), Some(34));
    assert_eq!(summary.classified() + summary.undecided, 60 + 62_238);
}

#[test]
fn draws_are_all_black_to_move() {
    let (store, _) = solved();
    let draws = store.get(CollectionId::Undecided).unwrap();
    assert!(draws.iter().all(|p| p.to_move() == Side::Black));
    assert!(draws.contains(&pos("c1", "a1", "b1", Side::Black)));
    // Every stalemate survives into the draw set.
    let stalemates = draws.iter().filter(|p| is_stalemate(p)).count();
    assert_eq!(stalemates, 27);
}

#[test]
fn depths_alternate_sides() {
    let (store, _) = solved();
    for d in store.depths() {
        let side = if d % 2 == 1 { Side::White } else { Side::Black };
        let set = store.get(CollectionId::Depth(d)).unwrap();
        assert!(set.iter().all(|p| p.to_move() == side), "depth {d}");
        assert!(set.iter().all(Position::is_canonical), "depth {d}");
    }
}

#[test]
fn passes_are_idempotent_at_the_fixed_point() {
    let (store, _) = solved();
    let undecided = store.get(CollectionId::Undecided).unwrap();

    let last_even = PositionIndex::load(store, &[CollectionId::Depth(34)]).unwrap();
    let odd: Vec<CollectionId> = (1..35).step_by(2).map(CollectionId::Depth).collect();
    let wins = PositionIndex::load(store, &odd).unwrap();

    let white = white_retreat(undecided, &last_even);
    assert!(white.classified.is_empty());
    assert_eq!(white.remaining, undecided);

    let black = black_retreat(undecided, &wins);
    assert!(black.classified.is_empty());
    assert_eq!(black.remaining.len(), undecided.len());
}

#[test]
fn solve_is_a_no_op_once_solved() {
    let (store, summary) = solved();
    let mut solver = Solver::new(store.clone());
    assert_eq!(&solver.solve(SolveOptions::default()).unwrap(), summary);
    assert_eq!(solver.next_depth(), 36);
    assert!(matches!(
        solver.run_pass(35),
        Err(TablebaseError::InvalidDepth { depth: 35, .. })
    ));
}

#[test]
fn probe_verdicts() {
    let (store, _) = solved();
    let tb = Tablebase::load(store).unwrap();
    assert!(tb.is_solved());

    assert_eq!(
        tb.probe(pos("a1", "c1", "b3", Side::Black)).unwrap(),
        Verdict::Win { plies: 0 }
    );
    assert_eq!(
        tb.probe(pos("a1", "c1", "d1", Side::White)).unwrap(),
        Verdict::Win { plies: 1 }
    );
    assert_eq!(
        tb.probe(pos("a1", "c1", "f1", Side::Black)).unwrap(),
        Verdict::Win { plies: 34 }
    );
    assert_eq!(tb.probe(pos("a1", "c1", "d1", Side::Black)).unwrap(), Verdict::Draw);
}

#[test]
fn probe_folds_symmetric_positions() {
    let (store, _) = solved();
    let tb = Tablebase::load(store).unwrap();

    // Mirror images of depth-0 mates with the White king in other corners.
    assert_eq!(
        tb.probe(pos("h8", "f8", "g6", Side::Black)).unwrap(),
        Verdict::Win { plies: 0 }
    );
    assert_eq!(
        tb.probe(pos("a8", "c8", "b6", Side::Black)).unwrap(),
        Verdict::Win { plies: 0 }
    );
    // The 34-ply loss a1 c1 f1 reflected onto the h-file side.
    assert_eq!(
        tb.probe(pos("h1", "f1", "c1", Side::Black)).unwrap(),
        Verdict::Win { plies: 34 }
    );
}

#[test]
fn probe_rejects_white_to_move_in_check() {
    let (store, _) = solved();
    let tb = Tablebase::load(store).unwrap();
    assert!(matches!(
        tb.probe(pos("a1", "c1", "b3", Side::White)),
        Err(TablebaseError::InvalidPosition { .. })
    ));
}

#[test]
fn partial_tablebase_reports_unknown() {
    let mut solver = Solver::new(MemoryStore::new());
    solver.solve(SolveOptions { max_depth: Some(1) }).unwrap();
    let tb = Tablebase::load(solver.store()).unwrap();
    assert!(!tb.is_solved());
    assert_eq!(
        tb.probe(pos("a1", "c1", "d1", Side::White)).unwrap(),
        Verdict::Win { plies: 1 }
    );
    assert_eq!(tb.probe(pos("a1", "c1", "d1", Side::Black)).unwrap(), Verdict::Unknown);
}
