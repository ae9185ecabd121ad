use thiserror::Error;

use crate::finset::FiniteSet;

#[derive(Error, Debug)]
pub enum KkError {
    #[error("Invalid family: member {set} has {found} elements, expected {expected}")]
    InvalidFamily {
        expected: usize,
        found: usize,
        set: FiniteSet,
    },
    #[error("Universe overflow: requested {requested} elements, at most {max} are representable")]
    UniverseOverflow { requested: usize, max: usize },
    #[error("Element {element} lies outside the universe 0..{universe}")]
    ElementOutOfRange { element: usize, universe: usize },
    #[error("Not an initial segment: {witness} is missing")]
    NotInitialSegment { witness: FiniteSet },
    #[error("Compression did not converge within {limit} steps")]
    IterationLimit { limit: u64 },
    #[error("Segment too long: {requested} sets requested, only {available} exist")]
    SegmentTooLong { requested: u128, available: u128 },
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KkError>;
