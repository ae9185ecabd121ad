//! Kruskal–Katona compactor: UV-compression driven to a colex initial segment.
//!
//! Stages:
//! 1. Validate the family and fix the universe
//! 2. Scan for the smallest useful shift pair that still moves a member
//! 3. Apply it (measure strictly drops, shadow never grows)
//! 4. Repeat until no pair moves anything, then certify the initial segment

pub mod compress;
pub mod initial_segment;
pub mod measure;
pub mod pipeline;
pub mod scheduler;

pub use compress::{compress_family, compress_set, is_compressed, is_useful_compression, ShiftPair};
pub use initial_segment::{
    certify_compressed, check_initial_segment, find_uncompressed_pair, gap_witness,
    is_initial_segment,
};
pub use measure::{measure, set_measure};
pub use pipeline::{run_kruskal_katona_compression, CompressionReport, KruskalKatonaPipeline};
pub use scheduler::{CompressionScheduler, SchedulerState, Transition};
