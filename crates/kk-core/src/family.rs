//! Uniform-size families of finite sets.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KkError, Result};
use crate::finset::{FiniteSet, Universe};

/// A deduplicated collection of sets that all share one cardinality.
///
/// Members are kept in colex order, so iteration is ascending in colex and
/// [`Family::max_member`] is the colex maximum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFamily")]
pub struct Family {
    set_size: usize,
    sets: BTreeSet<FiniteSet>,
}

/// Wire form of a [`Family`]; only reaches the type through validation.
#[derive(Deserialize)]
struct RawFamily {
    set_size: usize,
    sets: BTreeSet<FiniteSet>,
}

impl TryFrom<RawFamily> for Family {
    type Error = KkError;

    fn try_from(raw: RawFamily) -> Result<Self> {
        Self::validated(raw.set_size, raw.sets)
    }
}

impl Family {
    /// An empty family of `r`-sets.
    pub fn empty(set_size: usize) -> Self {
        Self {
            set_size,
            sets: BTreeSet::new(),
        }
    }

    /// Build a family, taking the member size from the first set. An empty
    /// input yields an empty family of 0-sets.
    pub fn new<I>(sets: I) -> Result<Self>
    where
        I: IntoIterator<Item = FiniteSet>,
    {
        let sets: BTreeSet<FiniteSet> = sets.into_iter().collect();
        let set_size = sets.iter().next().map_or(0, |s| s.card());
        Self::validated(set_size, sets)
    }

    /// Build a family whose members must all have exactly `set_size` elements.
    pub fn with_size<I>(set_size: usize, sets: I) -> Result<Self>
    where
        I: IntoIterator<Item = FiniteSet>,
    {
        Self::validated(set_size, sets.into_iter().collect())
    }

    /// Convenience constructor from element lists.
    pub fn from_elements<I, S>(sets: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = usize>,
    {
        let sets = sets
            .into_iter()
            .map(FiniteSet::from_elements)
            .collect::<Result<Vec<_>>>()?;
        Self::new(sets)
    }

    /// Parse a family from JSON, rejecting members of the wrong size with
    /// [`KkError::InvalidFamily`].
    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: RawFamily = serde_json::from_str(raw)?;
        Self::try_from(raw)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn validated(set_size: usize, sets: BTreeSet<FiniteSet>) -> Result<Self> {
        check_sized(set_size, &sets)?;
        Ok(Self { set_size, sets })
    }

    /// Re-check the member-size invariant.
    pub fn validate(&self) -> Result<()> {
        check_sized(self.set_size, &self.sets)
    }

    /// Used by operators that preserve member size by construction. Callers
    /// outside this workspace should go through [`Family::with_size`].
    #[doc(hidden)]
    pub fn from_sized_unchecked(set_size: usize, sets: BTreeSet<FiniteSet>) -> Self {
        debug_assert!(sets.iter().all(|s| s.card() == set_size));
        Self { set_size, sets }
    }

    pub fn set_size(&self) -> usize {
        self.set_size
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn contains(&self, set: &FiniteSet) -> bool {
        self.sets.contains(set)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &FiniteSet> + ExactSizeIterator + '_ {
        self.sets.iter()
    }

    pub fn sets(&self) -> &BTreeSet<FiniteSet> {
        &self.sets
    }

    pub fn into_sets(self) -> BTreeSet<FiniteSet> {
        self.sets
    }

    pub fn to_vec(&self) -> Vec<FiniteSet> {
        self.sets.iter().copied().collect()
    }

    pub fn max_member(&self) -> Option<FiniteSet> {
        self.sets.iter().next_back().copied()
    }

    /// Every member has exactly `r` elements.
    pub fn is_all_sized(&self, r: usize) -> bool {
        self.sets.iter().all(|s| s.card() == r)
    }

    pub fn is_subfamily(&self, other: &Family) -> bool {
        self.sets.is_subset(&other.sets)
    }

    /// Union of all members.
    pub fn support(&self) -> FiniteSet {
        self.sets
            .iter()
            .fold(FiniteSet::EMPTY, |acc, s| acc.union(*s))
    }

    /// Smallest universe containing every member and at least `set_size` wide.
    pub fn universe(&self) -> Result<Universe> {
        Universe::spanning(self.sets.iter(), self.set_size)
    }
}

fn check_sized(set_size: usize, sets: &BTreeSet<FiniteSet>) -> Result<()> {
    match sets.iter().find(|s| s.card() != set_size) {
        None => Ok(()),
        Some(bad) => Err(KkError::InvalidFamily {
            expected: set_size,
            found: bad.card(),
            set: *bad,
        }),
    }
}

impl<'a> IntoIterator for &'a Family {
    type Item = &'a FiniteSet;
    type IntoIter = std::collections::btree_set::Iter<'a, FiniteSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, s) in self.sets.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{s}")?;
        }
        f.write_str("}")
    }
}
