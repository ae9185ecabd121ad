//! UV-compression of sets and families.
//!
//! A shift pair `(U, V)` with `max(U) < max(V)` moves a member downward in
//! colex: a member that contains `V` and misses `U` has `V` swapped out for `U`.

use std::collections::BTreeSet;
use std::fmt;

use kk_core::{Family, FiniteSet};
use serde::{Deserialize, Serialize};

/// A single compression move.
///
/// Ordering is lexicographic on `(u, v)` under colex, which the scheduler
/// uses to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShiftPair {
    pub u: FiniteSet,
    pub v: FiniteSet,
}

impl ShiftPair {
    pub fn new(u: FiniteSet, v: FiniteSet) -> Self {
        Self { u, v }
    }

    pub fn is_useful(&self) -> bool {
        is_useful_compression(self.u, self.v)
    }

    pub fn compress(&self, set: FiniteSet) -> FiniteSet {
        compress_set(self.u, self.v, set)
    }

    pub fn compress_family(&self, family: &Family) -> Family {
        compress_family(self.u, self.v, family)
    }

    pub fn is_compressed(&self, family: &Family) -> bool {
        is_compressed(self.u, self.v, family)
    }

    /// The pair that carries `a` onto `b`: `(b \ a, a \ b)`. Useful whenever
    /// `b` is colex-below `a` and both have the same size.
    pub fn between(a: FiniteSet, b: FiniteSet) -> Self {
        Self {
            u: b.difference(a),
            v: a.difference(b),
        }
    }
}

impl fmt::Display for ShiftPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.u, self.v)
    }
}

/// Both nonempty, disjoint, same size, and `max(U) < max(V)`.
pub fn is_useful_compression(u: FiniteSet, v: FiniteSet) -> bool {
    match (u.max(), v.max()) {
        (Some(mu), Some(mv)) => u.is_disjoint(v) && u.card() == v.card() && mu < mv,
        _ => false,
    }
}

/// `(A \ V) ∪ U` when `V ⊆ A` and `U ∩ A = ∅`, otherwise `A`.
pub fn compress_set(u: FiniteSet, v: FiniteSet, a: FiniteSet) -> FiniteSet {
    if v.is_subset(a) && u.is_disjoint(a) {
        a.difference(v).union(u)
    } else {
        a
    }
}

/// Compress every member, except those whose image is already a different
/// member. Never merges two members, so the cardinality is unchanged.
pub fn compress_family(u: FiniteSet, v: FiniteSet, family: &Family) -> Family {
    let sets: BTreeSet<FiniteSet> = family
        .iter()
        .map(|&a| {
            let b = compress_set(u, v, a);
            if b == a || family.contains(&b) {
                a
            } else {
                b
            }
        })
        .collect();
    debug_assert_eq!(sets.len(), family.len());
    Family::from_sized_unchecked(family.set_size(), sets)
}

/// The family is a fixed point of `compress_family(U, V, ·)`.
pub fn is_compressed(u: FiniteSet, v: FiniteSet, family: &Family) -> bool {
    family.iter().all(|&a| {
        let b = compress_set(u, v, a);
        b == a || family.contains(&b)
    })
}
