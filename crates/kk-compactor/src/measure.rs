//! Potential function bounding the number of compression steps.

use kk_core::{Family, FiniteSet};

/// `Σ_{x ∈ A} 2^x`, which is the set's bitmask read as an integer.
pub fn set_measure(set: FiniteSet) -> u128 {
    set.bits() as u128
}

/// `Σ_{A ∈ 𝒜} Σ_{x ∈ A} 2^x`.
///
/// Any useful compression that changes the family lowers this strictly:
/// each moved member loses `V` and gains `U`, and `max(U) < max(V)`.
pub fn measure(family: &Family) -> u128 {
    family.iter().map(|&s| set_measure(s)).sum()
}
