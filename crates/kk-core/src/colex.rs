//! Colexicographic order, enumeration and ranking of fixed-size sets.

use std::cmp::Ordering;

use crate::error::{KkError, Result};
use crate::family::Family;
use crate::finset::{low_bits, FiniteSet, Universe, MAX_UNIVERSE};

/// Compare two sets by the largest element in which they differ: the set
/// holding it is the larger one. Works across cardinalities and agrees with
/// `Ord` on [`FiniteSet`].
pub fn colex_cmp(a: FiniteSet, b: FiniteSet) -> Ordering {
    match a.symmetric_difference(b).max() {
        None => Ordering::Equal,
        Some(top) if b.contains(top) => Ordering::Less,
        Some(_) => Ordering::Greater,
    }
}

pub fn colex_lt(a: FiniteSet, b: FiniteSet) -> bool {
    colex_cmp(a, b) == Ordering::Less
}

/// `C(n, k)`, saturating at `u128::MAX`.
pub fn binomial(n: usize, k: usize) -> u128 {
    checked_binomial(n, k).unwrap_or(u128::MAX)
}

/// `C(n, k)`, or `None` once an intermediate product leaves `u128`.
pub fn checked_binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) is divisible by (i + 1) at every step.
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}

/// All `r`-subsets of `0..n` in increasing colex order.
#[derive(Debug, Clone)]
pub struct ColexSets {
    next: Option<u128>,
    limit: u128,
}

impl ColexSets {
    pub fn new(universe: Universe, r: usize) -> Self {
        let n = universe.size();
        let next = if r <= n { Some(low_bits(r) as u128) } else { None };
        Self {
            next,
            limit: 1u128 << n,
        }
    }
}

impl Iterator for ColexSets {
    type Item = FiniteSet;

    fn next(&mut self) -> Option<FiniteSet> {
        let x = self.next?;
        if x >= self.limit {
            self.next = None;
            return None;
        }
        self.next = if x == 0 {
            None
        } else {
            // Gosper's hack: next larger integer with the same popcount.
            let c = x & x.wrapping_neg();
            let r = x + c;
            Some((((r ^ x) >> 2) / c) | r)
        };
        Some(FiniteSet::from_bits(x as u64))
    }
}

/// The `k`-subsets of `set`, in increasing colex order.
pub fn subsets_of_size(set: FiniteSet, k: usize) -> impl Iterator<Item = FiniteSet> {
    let elements = set.to_vec();
    ColexSets::new(Universe::clamped(elements.len()), k).map(move |pattern| {
        pattern
            .iter()
            .fold(FiniteSet::EMPTY, |acc, i| acc.insert(elements[i]))
    })
}

/// Number of sets of the same size that are strictly colex-below `set`.
pub fn colex_rank(set: FiniteSet) -> u128 {
    set.iter()
        .enumerate()
        .map(|(i, a)| binomial(a, i + 1))
        .sum()
}

/// Inverse of [`colex_rank`] for sets of size `r`.
pub fn colex_unrank(r: usize, mut rank: u128) -> Result<FiniteSet> {
    let available = binomial(MAX_UNIVERSE, r);
    if rank >= available {
        return Err(KkError::SegmentTooLong {
            requested: rank + 1,
            available,
        });
    }
    let mut set = FiniteSet::EMPTY;
    for i in (1..=r).rev() {
        let a = largest_with_binomial_at_most(i, rank);
        set = set.insert(a);
        rank -= binomial(a, i);
    }
    Ok(set)
}

/// Largest `a >= i - 1` with `C(a, i) <= bound`, clamped to `usize::MAX`.
///
/// Galloping then binary search; an overflowing `C(a, i)` counts as above
/// `bound`, and that predicate is monotone in `a`.
pub(crate) fn largest_with_binomial_at_most(i: usize, bound: u128) -> usize {
    if i == 1 {
        return bound.min(usize::MAX as u128) as usize;
    }
    let fits = |a: usize| checked_binomial(a, i).is_some_and(|c| c <= bound);
    // Invariant: fits(lo) and, once found, !fits(hi).
    let mut lo = i - 1;
    let mut hi = i;
    while fits(hi) {
        lo = hi;
        hi = match hi.checked_mul(2) {
            Some(next) => next,
            None if fits(usize::MAX) => return usize::MAX,
            None => usize::MAX,
        };
    }
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// The first `k` sets of size `r` in colex order, i.e. the colex initial
/// segment of length `k`.
pub fn initial_segment(universe: Universe, r: usize, k: usize) -> Result<Family> {
    let available = binomial(universe.size(), r);
    if k as u128 > available {
        return Err(KkError::SegmentTooLong {
            requested: k as u128,
            available,
        });
    }
    Family::with_size(r, ColexSets::new(universe, r).take(k))
}
