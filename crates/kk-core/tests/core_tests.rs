//! Test suite for kk-core: sets, colex order, families, shadows and cascades.

use kk_core::{
    binomial, cascade, checked_binomial, colex_cmp, colex_lt, colex_rank, colex_unrank, initial_segment,
    iterated_shadow, kruskal_katona_bound, shadow, shadow_size, subsets_of_size, up_shadow,
    CascadeTerm, ColexSets, CompressionConfig, Family, FiniteSet, KkError, Universe,
    MAX_UNIVERSE,
};
use std::cmp::Ordering;

fn set(xs: &[usize]) -> FiniteSet {
    FiniteSet::from_elements(xs.iter().copied()).unwrap()
}

fn fam(sets: &[&[usize]]) -> Family {
    Family::from_elements(sets.iter().map(|s| s.iter().copied())).unwrap()
}

fn universe(n: usize) -> Universe {
    Universe::new(n).unwrap()
}

// ============================================================
// FiniteSet / Universe
// ============================================================

#[test]
fn test_set_basics() {
    let s = set(&[3, 0, 2]);
    assert_eq!(s.to_vec(), vec![0, 2, 3]);
    assert_eq!(s.card(), 3);
    assert_eq!(s.max(), Some(3));
    assert_eq!(s.min(), Some(0));
    assert!(s.contains(2));
    assert!(!s.contains(1));
    assert!(!s.contains(200));
}

#[test]
fn test_set_display() {
    assert_eq!(set(&[3, 0, 2]).to_string(), "{0,2,3}");
    assert_eq!(FiniteSet::EMPTY.to_string(), "{}");
}

#[test]
fn test_set_algebra() {
    let a = set(&[0, 1, 4]);
    let b = set(&[1, 2]);
    assert_eq!(a.union(b), set(&[0, 1, 2, 4]));
    assert_eq!(a.intersection(b), set(&[1]));
    assert_eq!(a.difference(b), set(&[0, 4]));
    assert_eq!(a.symmetric_difference(b), set(&[0, 2, 4]));
    assert!(set(&[1]).is_subset(a));
    assert!(!b.is_subset(a));
    assert!(set(&[2, 3]).is_disjoint(a));
    assert_eq!(a.insert(7).remove(0), set(&[1, 4, 7]));
}

#[test]
fn test_set_element_overflow() {
    let err = FiniteSet::from_elements([1, 64]).unwrap_err();
    assert!(matches!(err, KkError::UniverseOverflow { requested: 65, max: 64 }));
}

#[test]
fn test_first_of_size() {
    assert_eq!(FiniteSet::first_of_size(3).unwrap(), set(&[0, 1, 2]));
    assert_eq!(FiniteSet::first_of_size(64).unwrap().card(), 64);
    assert!(FiniteSet::first_of_size(65).is_err());
}

#[test]
fn test_universe_bounds() {
    assert!(matches!(
        Universe::new(MAX_UNIVERSE + 1),
        Err(KkError::UniverseOverflow { requested: 65, .. })
    ));
    assert_eq!(universe(64).full().card(), 64);
    assert_eq!(universe(3).full(), set(&[0, 1, 2]));
    assert_eq!(universe(5).complement(set(&[1, 3])), set(&[0, 2, 4]));
}

#[test]
fn test_universe_check() {
    let u = universe(4);
    assert!(u.check(set(&[0, 3])).is_ok());
    assert!(u.contains_set(set(&[0, 3])));
    assert!(matches!(
        u.check(set(&[2, 6])),
        Err(KkError::ElementOutOfRange { element: 6, universe: 4 })
    ));
}

#[test]
fn test_universe_spanning() {
    let sets = [set(&[0, 5]), set(&[1, 2])];
    assert_eq!(Universe::spanning(sets.iter(), 0).unwrap().size(), 6);
    assert_eq!(Universe::spanning(sets.iter(), 9).unwrap().size(), 9);
    assert_eq!(Universe::spanning([FiniteSet::EMPTY; 0].iter(), 2).unwrap().size(), 2);
}

// ============================================================
// Colex order
// ============================================================

#[test]
fn test_colex_examples() {
    assert_eq!(colex_cmp(set(&[1, 2]), set(&[0, 3])), Ordering::Less);
    assert_eq!(colex_cmp(set(&[0, 1, 2]), set(&[3])), Ordering::Less);
    assert_eq!(colex_cmp(set(&[0, 4]), set(&[1, 2, 3])), Ordering::Greater);
    assert_eq!(colex_cmp(set(&[2]), set(&[2])), Ordering::Equal);
    assert!(colex_lt(FiniteSet::EMPTY, set(&[0])));
}

#[test]
fn test_colex_agrees_with_ord_and_is_total() {
    for a in 0u64..32 {
        for b in 0u64..32 {
            let (a, b) = (FiniteSet::from_bits(a), FiniteSet::from_bits(b));
            assert_eq!(colex_cmp(a, b), a.cmp(&b));
            assert_eq!(colex_cmp(a, b), colex_cmp(b, a).reverse());
            assert_eq!(colex_cmp(a, b) == Ordering::Equal, a == b);
        }
    }
}

#[test]
fn test_colex_transitive() {
    let sets: Vec<FiniteSet> = (0u64..16).map(FiniteSet::from_bits).collect();
    for &a in &sets {
        for &b in &sets {
            for &c in &sets {
                if colex_lt(a, b) && colex_lt(b, c) {
                    assert!(colex_lt(a, c));
                }
            }
        }
    }
}

// ============================================================
// Enumeration / ranking
// ============================================================

#[test]
fn test_colex_sets_counts() {
    for n in 0..=8 {
        for r in 0..=n + 1 {
            let sets: Vec<FiniteSet> = ColexSets::new(universe(n), r).collect();
            assert_eq!(sets.len() as u128, binomial(n, r), "n={n} r={r}");
            assert!(sets.iter().all(|s| s.card() == r));
            assert!(sets.windows(2).all(|w| colex_lt(w[0], w[1])));
        }
    }
}

#[test]
fn test_colex_sets_order() {
    let sets: Vec<FiniteSet> = ColexSets::new(universe(4), 2).collect();
    let expected = vec![
        set(&[0, 1]),
        set(&[0, 2]),
        set(&[1, 2]),
        set(&[0, 3]),
        set(&[1, 3]),
        set(&[2, 3]),
    ];
    assert_eq!(sets, expected);
}

#[test]
fn test_colex_sets_zero_size() {
    let sets: Vec<FiniteSet> = ColexSets::new(universe(5), 0).collect();
    assert_eq!(sets, vec![FiniteSet::EMPTY]);
}

#[test]
fn test_colex_sets_full_width() {
    let sets: Vec<FiniteSet> = ColexSets::new(universe(64), 64).collect();
    assert_eq!(sets, vec![universe(64).full()]);
    assert_eq!(ColexSets::new(universe(64), 63).count(), 64);
}

#[test]
fn test_colex_rank_matches_enumeration() {
    for (i, s) in ColexSets::new(universe(9), 4).enumerate() {
        assert_eq!(colex_rank(s), i as u128);
        assert_eq!(colex_unrank(4, i as u128).unwrap(), s);
    }
}

#[test]
fn test_colex_unrank_out_of_range() {
    let err = colex_unrank(2, binomial(64, 2)).unwrap_err();
    assert!(matches!(err, KkError::SegmentTooLong { .. }));
    assert_eq!(colex_unrank(0, 0).unwrap(), FiniteSet::EMPTY);
}

#[test]
fn test_subsets_of_size() {
    let subs: Vec<FiniteSet> = subsets_of_size(set(&[1, 3, 5]), 2).collect();
    assert_eq!(subs, vec![set(&[1, 3]), set(&[1, 5]), set(&[3, 5])]);
    assert_eq!(subsets_of_size(set(&[1, 3]), 3).count(), 0);
    assert_eq!(subsets_of_size(set(&[1, 3]), 0).collect::<Vec<_>>(), vec![FiniteSet::EMPTY]);
}

#[test]
fn test_initial_segment() {
    let f = initial_segment(universe(4), 2, 4).unwrap();
    assert_eq!(f, fam(&[&[0, 1], &[0, 2], &[1, 2], &[0, 3]]));
    assert_eq!(f.max_member(), Some(set(&[0, 3])));
}

#[test]
fn test_initial_segment_too_long() {
    let err = initial_segment(universe(4), 2, 7).unwrap_err();
    assert!(matches!(err, KkError::SegmentTooLong { requested: 7, available: 6 }));
}

// ============================================================
// Family
// ============================================================

#[test]
fn test_family_dedups() {
    let f = fam(&[&[0, 1], &[1, 0], &[0, 2]]);
    assert_eq!(f.len(), 2);
    assert_eq!(f.set_size(), 2);
    assert!(f.contains(&set(&[0, 2])));
    assert_eq!(f.to_string(), "{{0,1},{0,2}}");
}

#[test]
fn test_family_rejects_mixed_sizes() {
    let err = Family::new([set(&[0]), set(&[0, 1])]).unwrap_err();
    assert!(matches!(err, KkError::InvalidFamily { expected: 1, found: 2, .. }));
}

#[test]
fn test_family_declared_size() {
    let err = Family::with_size(3, [set(&[0, 1])]).unwrap_err();
    match err {
        KkError::InvalidFamily { expected, found, set: bad } => {
            assert_eq!((expected, found), (3, 2));
            assert_eq!(bad, set(&[0, 1]));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_family_empty() {
    let f = Family::new(std::iter::empty()).unwrap();
    assert!(f.is_empty());
    assert_eq!(f.set_size(), 0);
    assert_eq!(Family::empty(3).set_size(), 3);
    assert_eq!(Family::empty(3).max_member(), None);
}

#[test]
fn test_family_queries() {
    let f = fam(&[&[2, 5], &[0, 1], &[1, 3]]);
    assert_eq!(f.max_member(), Some(set(&[2, 5])));
    assert_eq!(f.support(), set(&[0, 1, 2, 3, 5]));
    assert_eq!(f.universe().unwrap().size(), 6);
    assert!(f.is_all_sized(2));
    assert!(fam(&[&[0, 1]]).is_subfamily(&f));
    assert_eq!(
        f.iter().copied().collect::<Vec<_>>(),
        vec![set(&[0, 1]), set(&[1, 3]), set(&[2, 5])]
    );
}

// ============================================================
// Shadows
// ============================================================

#[test]
fn test_shadow_single_set() {
    let f = fam(&[&[0, 1, 2]]);
    assert_eq!(shadow(&f), fam(&[&[0, 1], &[0, 2], &[1, 2]]));
    assert_eq!(shadow_size(&f), 3);
}

#[test]
fn test_shadow_dedups() {
    let f = fam(&[&[0, 1], &[0, 2], &[1, 2]]);
    assert_eq!(shadow(&f), fam(&[&[0], &[1], &[2]]));
}

#[test]
fn test_shadow_of_zero_sets_is_empty() {
    let f = Family::with_size(0, [FiniteSet::EMPTY]).unwrap();
    let s = shadow(&f);
    assert!(s.is_empty());
    assert_eq!(s.set_size(), 0);
}

#[test]
fn test_shadow_monotone() {
    let big = fam(&[&[0, 1, 2], &[1, 2, 3], &[0, 2, 4]]);
    let small = fam(&[&[0, 1, 2], &[0, 2, 4]]);
    assert!(shadow(&small).is_subfamily(&shadow(&big)));
}

#[test]
fn test_iterated_shadow() {
    let f = fam(&[&[0, 1, 2]]);
    assert_eq!(iterated_shadow(&f, 0), f);
    assert_eq!(iterated_shadow(&f, 2), fam(&[&[0], &[1], &[2]]));
    let bottom = iterated_shadow(&f, 3);
    assert_eq!(bottom.len(), 1);
    assert!(bottom.contains(&FiniteSet::EMPTY));
    assert!(iterated_shadow(&f, 4).is_empty());
}

#[test]
fn test_up_shadow() {
    let f = fam(&[&[0, 1]]);
    assert_eq!(
        up_shadow(&f, universe(4)).unwrap(),
        fam(&[&[0, 1, 2], &[0, 1, 3]])
    );
    assert!(matches!(
        up_shadow(&fam(&[&[0, 5]]), universe(4)),
        Err(KkError::ElementOutOfRange { element: 5, .. })
    ));
}

// ============================================================
// Cascade / Kruskal–Katona bound
// ============================================================

#[test]
fn test_cascade_examples() {
    assert_eq!(
        cascade(4, 2),
        vec![CascadeTerm { top: 3, level: 2 }, CascadeTerm { top: 1, level: 1 }]
    );
    assert_eq!(cascade(10, 3), vec![CascadeTerm { top: 5, level: 3 }]);
    assert!(cascade(0, 3).is_empty());
    assert!(cascade(5, 0).is_empty());
}

#[test]
fn test_cascade_sums_back() {
    for r in 1..=5 {
        for k in 1..=300u128 {
            let terms = cascade(k, r);
            let total: u128 = terms.iter().map(|t| binomial(t.top, t.level)).sum();
            assert_eq!(total, k);
            assert!(terms.windows(2).all(|w| w[0].top > w[1].top));
            assert!(terms.iter().all(|t| t.top >= t.level));
        }
    }
}

#[test]
fn test_kk_bound_values() {
    assert_eq!(kruskal_katona_bound(4, 2), 4);
    assert_eq!(kruskal_katona_bound(10, 3), 10);
    assert_eq!(kruskal_katona_bound(7, 1), 1);
    assert_eq!(kruskal_katona_bound(0, 4), 0);
}

#[test]
fn test_kk_bound_is_segment_shadow() {
    for r in 1..=4 {
        for k in 0..=binomial(8, r) as usize {
            let f = initial_segment(universe(8), r, k).unwrap();
            assert_eq!(shadow_size(&f) as u128, kruskal_katona_bound(k as u128, r), "r={r} k={k}");
        }
    }
}

// ============================================================
// Config
// ============================================================

#[test]
fn test_config_defaults() {
    let c = CompressionConfig::default();
    assert_eq!(c.universe_size, None);
    assert_eq!(c.max_steps, None);
    assert!(!c.parallel_scan);
    assert!(c.verify_result);
}

#[test]
fn test_config_partial_json() {
    let c = CompressionConfig::from_json(r#"{"max_steps": 5, "parallel_scan": true}"#).unwrap();
    assert_eq!(c.max_steps, Some(5));
    assert!(c.parallel_scan);
    assert!(c.verify_result);
    assert!(!c.verify_invariants);
}

#[test]
fn test_config_json_roundtrip() {
    let c = CompressionConfig::default().with_universe_size(12).strict();
    let back = CompressionConfig::from_json(&c.to_json().unwrap()).unwrap();
    assert_eq!(back, c);
}

#[test]
fn test_config_bad_json() {
    let err = CompressionConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, KkError::Config(_)));
}

#[test]
fn test_cascade_large_k() {
    let k = 1u128 << 80;
    let terms = cascade(k, 2);
    let total: u128 = terms.iter().map(|t| binomial(t.top, t.level)).sum();
    assert_eq!(total, k);
    assert!(terms.windows(2).all(|w| w[0].top > w[1].top));
    let expected: u128 = terms.iter().map(|t| binomial(t.top, t.level - 1)).sum();
    assert_eq!(kruskal_katona_bound(k, 2), expected);
    assert!(kruskal_katona_bound(k, 5) > 0);
}

#[test]
fn test_cascade_saturated_k_terminates() {
    assert!(!cascade(u128::MAX, 2).is_empty());
    assert!(!cascade(u128::MAX, 6).is_empty());
    assert!(kruskal_katona_bound(u128::MAX, 3) > 0);
}

#[test]
fn test_colex_unrank_last() {
    assert_eq!(colex_unrank(2, binomial(64, 2) - 1).unwrap(), set(&[62, 63]));
    assert_eq!(colex_rank(set(&[62, 63])), binomial(64, 2) - 1);
}

#[test]
fn test_checked_binomial() {
    assert_eq!(checked_binomial(10, 3), Some(120));
    assert_eq!(checked_binomial(3, 5), Some(0));
    assert_eq!(checked_binomial(usize::MAX, 40), None);
    assert_eq!(binomial(usize::MAX, 40), u128::MAX);
}

// ============================================================
// Serialization
// ============================================================

#[test]
fn test_set_json() {
    let s = set(&[0, 2]);
    assert_eq!(serde_json::to_string(&s).unwrap(), "5");
    assert_eq!(serde_json::from_str::<FiniteSet>("5").unwrap(), s);
}

#[test]
fn test_family_json_roundtrip() {
    let f = fam(&[&[0, 1], &[0, 2], &[1, 3]]);
    assert_eq!(Family::from_json(&f.to_json().unwrap()).unwrap(), f);
    let via_serde: Family = serde_json::from_str(&serde_json::to_string(&f).unwrap()).unwrap();
    assert_eq!(via_serde, f);
}

#[test]
fn test_family_json_rejects_mixed_sizes() {
    let raw = r#"{"set_size":2,"sets":[3,7]}"#;
    match Family::from_json(raw).unwrap_err() {
        KkError::InvalidFamily { expected, found, set: bad } => {
            assert_eq!((expected, found), (2, 3));
            assert_eq!(bad, set(&[0, 1, 2]));
        }
        other => panic!("unexpected error: {other}"),
    }
    let err = serde_json::from_str::<Family>(raw).unwrap_err();
    assert!(err.to_string().contains("Invalid family"));
}

#[test]
fn test_family_json_rejects_wrong_declared_size() {
    let raw = r#"{"set_size":3,"sets":[3]}"#;
    assert!(matches!(
        Family::from_json(raw),
        Err(KkError::InvalidFamily { expected: 3, found: 2, .. })
    ));
    assert!(matches!(Family::from_json("[1,2]"), Err(KkError::Config(_))));
}

#[test]
fn test_family_validate() {
    assert!(fam(&[&[0, 1], &[2, 3]]).validate().is_ok());
    assert!(Family::empty(4).validate().is_ok());
}
