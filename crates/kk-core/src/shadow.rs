//! Lower and upper shadows of uniform families.

use std::collections::BTreeSet;

use tracing::trace;

use crate::error::Result;
use crate::family::Family;
use crate::finset::Universe;

/// All sets obtained by deleting exactly one element from some member.
///
/// The shadow of a family of 0-sets is the empty family of 0-sets.
pub fn shadow(family: &Family) -> Family {
    let r = family.set_size();
    if r == 0 {
        return Family::empty(0);
    }
    let sets: BTreeSet<_> = family
        .iter()
        .flat_map(|s| s.iter().map(move |x| s.remove(x)))
        .collect();
    trace!(members = family.len(), shadow = sets.len(), "computed shadow");
    Family::from_sized_unchecked(r - 1, sets)
}

pub fn shadow_size(family: &Family) -> usize {
    shadow(family).len()
}

/// The shadow applied `t` times. Stops early at the family of 0-sets.
pub fn iterated_shadow(family: &Family, t: usize) -> Family {
    let mut current = family.clone();
    for _ in 0..t {
        if current.set_size() == 0 {
            return Family::empty(0);
        }
        current = shadow(&current);
    }
    current
}

/// All sets obtained by adding one universe element missing from some member.
pub fn up_shadow(family: &Family, universe: Universe) -> Result<Family> {
    for s in family {
        universe.check(*s)?;
    }
    let sets: BTreeSet<_> = family
        .iter()
        .flat_map(|s| universe.complement(*s).iter().map(move |x| s.insert(x)))
        .collect();
    Ok(Family::from_sized_unchecked(family.set_size() + 1, sets))
}
