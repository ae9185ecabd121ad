//! Recognising colex initial segments.

use kk_core::{colex_rank, colex_unrank, Family, FiniteSet, KkError, Result, Universe};
use tracing::warn;

use crate::compress::ShiftPair;
use crate::scheduler::CompressionScheduler;

/// `family` consists of `r`-sets and equals the first `|family|` `r`-sets in colex.
///
/// Members iterate in ascending colex, so the `i`-th one must have rank `i`.
pub fn is_initial_segment(family: &Family, r: usize) -> bool {
    family.is_all_sized(r)
        && family
            .iter()
            .enumerate()
            .all(|(i, &s)| colex_rank(s) == i as u128)
}

/// Like [`is_initial_segment`], but names the colex-smallest missing set.
pub fn check_initial_segment(family: &Family) -> Result<()> {
    let gap = family
        .iter()
        .enumerate()
        .find(|(i, s)| colex_rank(**s) != *i as u128);
    match gap {
        None => Ok(()),
        Some((i, _)) => Err(KkError::NotInitialSegment {
            witness: colex_unrank(family.set_size(), i as u128)?,
        }),
    }
}

/// A useful pair under which `family` is not compressed, if one exists.
pub fn find_uncompressed_pair(family: &Family, universe: Universe) -> Option<ShiftPair> {
    CompressionScheduler::new(universe).find_candidate(family)
}

/// Accept a family only if it is a fixed point of every useful compression
/// over `universe`, and confirm it is then an initial segment.
///
/// If `B ∈ ℬ` and a same-size `C` colex-below `B` is missing, the pair
/// `(C \ B, B \ C)` is useful and moves `B` onto `C`, so a fixed point can have
/// no such gap. The second check guards that argument against a scheduler bug.
pub fn certify_compressed(family: &Family, universe: Universe) -> Result<()> {
    if let Some(pair) = find_uncompressed_pair(family, universe) {
        let moved = family
            .iter()
            .map(|&a| pair.compress(a))
            .find(|b| !family.contains(b));
        warn!(pair = %pair, "family is not fully compressed");
        return Err(match moved {
            Some(witness) => KkError::NotInitialSegment { witness },
            None => KkError::InvariantViolation(format!(
                "candidate {pair} does not move any member"
            )),
        });
    }
    check_initial_segment(family)
}

/// The pair exposing `missing` as a gap below `member`, when it is one.
pub fn gap_witness(family: &Family, member: FiniteSet, missing: FiniteSet) -> Option<ShiftPair> {
    if !family.contains(&member) || family.contains(&missing) {
        return None;
    }
    if member.card() != missing.card() || missing >= member {
        return None;
    }
    let pair = ShiftPair::between(member, missing);
    debug_assert!(pair.is_useful());
    Some(pair)
}
