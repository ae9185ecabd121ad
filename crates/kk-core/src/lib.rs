//! Kruskal–Katona core: finite sets, colex order, uniform families and shadows.

pub mod cascade;
pub mod colex;
pub mod config;
pub mod error;
pub mod family;
pub mod finset;
pub mod shadow;

pub use cascade::{cascade, kruskal_katona_bound, CascadeTerm};
pub use colex::{
    binomial, checked_binomial, colex_cmp, colex_lt, colex_rank, colex_unrank, initial_segment,
    subsets_of_size, ColexSets,
};
pub use config::CompressionConfig;
pub use error::{KkError, Result};
pub use family::Family;
pub use finset::{FiniteSet, Universe, MAX_UNIVERSE};
pub use shadow::{iterated_shadow, shadow, shadow_size, up_shadow};
