//! Cascade (r-binomial) representations and the Kruskal–Katona bound.

use serde::{Deserialize, Serialize};

use crate::colex::{binomial, largest_with_binomial_at_most};

/// One term `C(top, level)` of a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeTerm {
    pub top: usize,
    pub level: usize,
}

/// Greedy decomposition `k = C(a_r, r) + C(a_{r-1}, r-1) + ... + C(a_t, t)`
/// with `a_r > a_{r-1} > ... > a_t >= t >= 1`. Empty for `k == 0` or `r == 0`.
/// Tops are capped at `usize::MAX`, so a `k` past that range sums back short.
pub fn cascade(k: u128, r: usize) -> Vec<CascadeTerm> {
    let mut terms = Vec::new();
    let mut rem = k;
    for level in (1..=r).rev() {
        if rem == 0 {
            break;
        }
        let top = largest_with_binomial_at_most(level, rem);
        rem -= binomial(top, level);
        terms.push(CascadeTerm { top, level });
    }
    terms
}

/// Smallest possible shadow of `k` distinct `r`-sets, saturating at `u128::MAX`.
pub fn kruskal_katona_bound(k: u128, r: usize) -> u128 {
    cascade(k, r)
        .iter()
        .fold(0u128, |acc, t| acc.saturating_add(binomial(t.top, t.level - 1)))
}
