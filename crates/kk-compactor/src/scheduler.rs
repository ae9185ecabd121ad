//! Greedy driver: apply the smallest useful compression that still changes
//! the family until none is left.

use kk_core::{subsets_of_size, Family, FiniteSet, Universe};
use rayon::prelude::*;
use tracing::trace;

use crate::compress::ShiftPair;

/// Scheduler state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerState {
    Running(Family),
    Done(Family),
}

impl SchedulerState {
    pub fn family(&self) -> &Family {
        match self {
            Self::Running(f) | Self::Done(f) => f,
        }
    }

    pub fn into_family(self) -> Family {
        match self {
            Self::Running(f) | Self::Done(f) => f,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Outcome of one scheduling round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Applied { pair: ShiftPair, next: Family },
    Converged,
}

/// Searches shift pairs over a fixed universe.
#[derive(Debug, Clone, Copy)]
pub struct CompressionScheduler {
    universe: Universe,
    parallel: bool,
}

impl CompressionScheduler {
    pub fn new(universe: Universe) -> Self {
        Self {
            universe,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    /// The useful pair with minimal `|U|` (then smallest `(U, V)`) under which
    /// the family is not compressed, if any.
    ///
    /// A pair fails to fix the family exactly when some member `A` has
    /// `V ⊆ A`, `U ∩ A = ∅` and `(A \ V) ∪ U` outside the family, so the search
    /// runs over members instead of over all disjoint pairs of the universe.
    pub fn find_candidate(&self, family: &Family) -> Option<ShiftPair> {
        for k in 1..=family.set_size() {
            let best = if self.parallel {
                family
                    .sets()
                    .par_iter()
                    .filter_map(|&a| self.best_for_member(family, a, k))
                    .min()
            } else {
                family
                    .iter()
                    .filter_map(|&a| self.best_for_member(family, a, k))
                    .min()
            };
            if best.is_some() {
                return best;
            }
        }
        None
    }

    fn best_for_member(&self, family: &Family, a: FiniteSet, k: usize) -> Option<ShiftPair> {
        let outside = self.universe.complement(a);
        let mut best: Option<ShiftPair> = None;
        for v in subsets_of_size(a, k) {
            let Some(top) = v.max() else { continue };
            // Restricting U below max(V) makes every pair here useful.
            let below = outside.intersection(Universe::clamped(top).full());
            for u in subsets_of_size(below, k) {
                let image = a.difference(v).union(u);
                if family.contains(&image) {
                    continue;
                }
                let pair = ShiftPair::new(u, v);
                if best.map_or(true, |b| pair < b) {
                    best = Some(pair);
                }
                // Candidates for this V come in increasing U order.
                break;
            }
        }
        best
    }

    /// One transition of the state machine.
    pub fn step(&self, family: &Family) -> Transition {
        match self.find_candidate(family) {
            None => Transition::Converged,
            Some(pair) => {
                let next = pair.compress_family(family);
                trace!(pair = %pair, "compression selected");
                Transition::Applied { pair, next }
            }
        }
    }

    /// Advance `Running` by one round; `Done` is absorbing.
    pub fn advance(&self, state: SchedulerState) -> SchedulerState {
        match state {
            SchedulerState::Done(f) => SchedulerState::Done(f),
            SchedulerState::Running(f) => match self.step(&f) {
                Transition::Converged => SchedulerState::Done(f),
                Transition::Applied { next, .. } => SchedulerState::Running(next),
            },
        }
    }
}
