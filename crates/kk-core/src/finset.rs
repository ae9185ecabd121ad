//! Finite subsets of a small ground set `0..n`, stored as a 64-bit mask.
//!
//! Bit `x` set means element `x` is present. The numeric order of masks is
//! exactly the colexicographic order on sets (the largest differing element
//! decides), so `Ord` is derived straight from the mask.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KkError, Result};

/// Largest ground set a [`FiniteSet`] can address.
pub const MAX_UNIVERSE: usize = 64;

/// An immutable finite set of universe elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiniteSet(u64);

impl FiniteSet {
    pub const EMPTY: FiniteSet = FiniteSet(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Build a set from element indices, rejecting anything past [`MAX_UNIVERSE`].
    pub fn from_elements<I>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut bits = 0u64;
        for x in elements {
            if x >= MAX_UNIVERSE {
                return Err(KkError::UniverseOverflow {
                    requested: x + 1,
                    max: MAX_UNIVERSE,
                });
            }
            bits |= 1 << x;
        }
        Ok(Self(bits))
    }

    /// The set `{0, 1, ..., r-1}`, the colex-smallest set of size `r`.
    pub fn first_of_size(r: usize) -> Result<Self> {
        if r > MAX_UNIVERSE {
            return Err(KkError::UniverseOverflow {
                requested: r,
                max: MAX_UNIVERSE,
            });
        }
        Ok(Self(low_bits(r)))
    }

    pub fn card(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, x: usize) -> bool {
        x < MAX_UNIVERSE && self.0 & (1 << x) != 0
    }

    pub fn max(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(63 - self.0.leading_zeros() as usize)
        }
    }

    pub fn min(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// `self ∪ {x}`. `x` must be below [`MAX_UNIVERSE`].
    pub fn insert(self, x: usize) -> Self {
        debug_assert!(x < MAX_UNIVERSE);
        Self(self.0 | (1 << x))
    }

    /// `self \ {x}`.
    pub fn remove(self, x: usize) -> Self {
        if x >= MAX_UNIVERSE {
            return self;
        }
        Self(self.0 & !(1 << x))
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn symmetric_difference(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    pub fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    pub fn iter(self) -> Elements {
        Elements(self.0)
    }

    pub fn to_vec(self) -> Vec<usize> {
        self.iter().collect()
    }
}

pub(crate) const fn low_bits(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Ascending iterator over the elements of a [`FiniteSet`].
#[derive(Debug, Clone)]
pub struct Elements(u64);

impl Iterator for Elements {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let x = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Elements {}

impl IntoIterator for FiniteSet {
    type Item = usize;
    type IntoIter = Elements;

    fn into_iter(self) -> Elements {
        self.iter()
    }
}

impl fmt::Display for FiniteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("}")
    }
}

/// The fixed ground set `0..size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Universe {
    size: usize,
}

impl Universe {
    pub fn new(size: usize) -> Result<Self> {
        if size > MAX_UNIVERSE {
            return Err(KkError::UniverseOverflow {
                requested: size,
                max: MAX_UNIVERSE,
            });
        }
        Ok(Self { size })
    }

    /// The universe `0..min(size, MAX_UNIVERSE)`.
    pub fn clamped(size: usize) -> Self {
        Self {
            size: size.min(MAX_UNIVERSE),
        }
    }

    /// Smallest universe holding every element of `sets`, and at least `min_size` wide.
    pub fn spanning<'a, I>(sets: I, min_size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = &'a FiniteSet>,
    {
        let top = sets
            .into_iter()
            .filter_map(|&s| s.max())
            .max()
            .map_or(0, |m| m + 1);
        Self::new(top.max(min_size))
    }

    pub fn size(self) -> usize {
        self.size
    }

    pub fn full(self) -> FiniteSet {
        FiniteSet(low_bits(self.size))
    }

    pub fn contains_set(self, set: FiniteSet) -> bool {
        set.is_subset(self.full())
    }

    pub fn check(self, set: FiniteSet) -> Result<()> {
        match set.difference(self.full()).max() {
            None => Ok(()),
            Some(element) => Err(KkError::ElementOutOfRange {
                element,
                universe: self.size,
            }),
        }
    }

    pub fn complement(self, set: FiniteSet) -> FiniteSet {
        self.full().difference(set)
    }
}
