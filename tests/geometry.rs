use hawk_tablebase::core::position::{Position, Side};
use hawk_tablebase::core::square::{on_board, Square, KING_STEPS};
use hawk_tablebase::core::symmetry::{
    canonical_white_king_squares, canonicalizing, is_canonical_white_king_square, Symmetry,
};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn on_board_matches_the_0x88_mask() {
    let on: Vec<i16> = (-20i16..160).filter(|&i| on_board(i)).collect();
    assert_eq!(on.len(), 64);
    for i in on {
        assert_eq!(i & 0x88, 0);
        assert!(Square::new(i as u8).is_some());
    }
    assert!(!on_board(-1));
    assert!(!on_board(0x08));
    assert!(!on_board(0x78));
}

#[test]
fn adjacency_is_symmetric_and_irreflexive() {
    for a in Square::all() {
        assert!(!a.is_adjacent(a));
        for b in Square::all() {
            assert_eq!(a.is_adjacent(b), b.is_adjacent(a));
            let chebyshev = (a.file() as i8 - b.file() as i8)
                .abs()
                .max((a.rank() as i8 - b.rank() as i8).abs());
            assert_eq!(a.is_adjacent(b), chebyshev == 1, "{a} {b}");
        }
    }
}

#[test]
fn king_steps_stay_on_board_or_are_rejected() {
    for s in Square::all() {
        for step in KING_STEPS {
            let target = s.index() as i16 + step as i16;
            assert_eq!(s.offset(step).is_some(), on_board(target));
        }
    }
    assert_eq!(sq("a1").king_neighbors().count(), 3);
    assert_eq!(sq("a4").king_neighbors().count(), 5);
    assert_eq!(sq("e5").king_neighbors().count(), 8);
}

#[test]
fn every_symmetry_is_a_bijection_of_the_board() {
    for s in Symmetry::ALL {
        let mut images: Vec<Square> = Square::all().map(|x| s.apply(x)).collect();
        images.sort();
        images.dedup();
        assert_eq!(images.len(), 64, "{s:?}");
    }
}

#[test]
fn group_laws() {
    for a in Symmetry::ALL {
        assert_eq!(a.compose(Symmetry::Identity), a);
        assert_eq!(Symmetry::Identity.compose(a), a);
        assert_eq!(a.compose(a.inverse()), Symmetry::Identity);
        assert_eq!(a.inverse().compose(a), Symmetry::Identity);

        for b in Symmetry::ALL {
            for x in Square::all() {
                assert_eq!(a.compose(b).apply(x), a.apply(b.apply(x)));
            }
            for c in Symmetry::ALL {
                assert_eq!(a.compose(b).compose(c), a.compose(b.compose(c)));
            }
        }
    }
}

#[test]
fn symmetries_preserve_adjacency() {
    for s in Symmetry::ALL {
        for a in Square::all() {
            for b in a.king_neighbors() {
                assert!(s.apply(a).is_adjacent(s.apply(b)), "{s:?} {a} {b}");
            }
        }
    }
}

#[test]
fn fundamental_domain_has_ten_squares() {
    let names: Vec<String> = canonical_white_king_squares().map(|s| s.to_string()).collect();
    assert_eq!(
        names,
        ["a1", "b1", "c1", "d1", "b2", "c2", "d2", "c3", "d3", "d4"]
    );
}

#[test]
fn every_square_canonicalizes_into_the_domain() {
    for s in Square::all() {
        let image = canonicalizing(s).apply(s);
        assert!(is_canonical_white_king_square(image), "{s} -> {image}");
    }
    // Off-diagonal squares have exactly one symmetric image in the domain.
    for s in Square::all() {
        let hits = Symmetry::ALL
            .iter()
            .filter(|g| is_canonical_white_king_square(g.apply(s)))
            .count();
        let on_diagonal = s.file() == s.rank() || s.file() + s.rank() == 7;
        assert_eq!(hits, if on_diagonal { 2 } else { 1 }, "{s}");
    }
}

#[test]
fn c5_canonicalizes_to_d3() {
    assert_eq!(canonicalizing(sq("c5")).apply(sq("c5")), sq("d3"));
}

#[test]
fn canonical_position_is_a_symmetric_image() {
    let p = Position::new(sq("g7"), sq("c2"), sq("h1"), Side::White).unwrap();
    let c = p.canonical();
    assert!(c.is_canonical());
    assert_eq!(c.to_move(), Side::White);
    assert!(Symmetry::ALL.iter().any(|&g| p.transformed(g) == c));
    assert_eq!(c.canonical(), c);
}
