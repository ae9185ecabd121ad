//! Compression pipeline: validate input, drive the scheduler, report.

use kk_core::{shadow_size, CompressionConfig, Family, FiniteSet, KkError, Result, Universe};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::compress::ShiftPair;
use crate::initial_segment::certify_compressed;
use crate::measure::measure;
use crate::scheduler::{CompressionScheduler, SchedulerState, Transition};

/// Result of a full run with statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionReport {
    pub family: Family,
    pub shadow_size: usize,
    pub initial_shadow_size: usize,
    pub steps: u64,
    pub initial_measure: u128,
    pub final_measure: u128,
    pub moves: Vec<ShiftPair>,
}

impl CompressionReport {
    /// Shadow sets saved by compressing.
    pub fn shadow_reduction(&self) -> usize {
        self.initial_shadow_size.saturating_sub(self.shadow_size)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The Kruskal–Katona compaction pipeline.
#[derive(Debug, Clone, Default)]
pub struct KruskalKatonaPipeline {
    pub config: CompressionConfig,
}

impl KruskalKatonaPipeline {
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    /// Validate raw sets against a declared member size, then run.
    pub fn run_sets<I>(&self, set_size: usize, sets: I) -> Result<CompressionReport>
    where
        I: IntoIterator<Item = FiniteSet>,
    {
        self.run(Family::with_size(set_size, sets)?)
    }

    pub fn universe_for(&self, family: &Family) -> Result<Universe> {
        match self.config.universe_size {
            Some(n) => {
                let universe = Universe::new(n)?;
                for s in family {
                    universe.check(*s)?;
                }
                Ok(universe)
            }
            None => family.universe(),
        }
    }

    pub fn run(&self, family: Family) -> Result<CompressionReport> {
        family.validate()?;
        let universe = self.universe_for(&family)?;
        let scheduler =
            CompressionScheduler::new(universe).with_parallel(self.config.parallel_scan);

        let initial_shadow_size = shadow_size(&family);
        let initial_measure = measure(&family);
        let mut moves = Vec::new();
        let mut state = SchedulerState::Running(family);
        let mut current_shadow = initial_shadow_size;
        let mut current_measure = initial_measure;

        while let SchedulerState::Running(current) = state {
            match scheduler.step(&current) {
                Transition::Converged => state = SchedulerState::Done(current),
                Transition::Applied { pair, next } => {
                    if let Some(limit) = self.config.max_steps {
                        if moves.len() as u64 >= limit {
                            warn!(limit, "compression hit the step limit");
                            return Err(KkError::IterationLimit { limit });
                        }
                    }
                    let next_measure = measure(&next);
                    if self.config.verify_invariants {
                        current_shadow = check_step(
                            &current,
                            &next,
                            current_measure,
                            next_measure,
                            current_shadow,
                        )?;
                    }
                    debug!(
                        step = moves.len() + 1,
                        pair = %pair,
                        measure = %next_measure,
                        "applied compression"
                    );
                    current_measure = next_measure;
                    moves.push(pair);
                    state = SchedulerState::Running(next);
                }
            }
        }

        let family = state.into_family();
        if self.config.verify_result {
            certify_compressed(&family, universe)?;
        }
        let shadow_size = shadow_size(&family);
        info!(
            members = family.len(),
            steps = moves.len(),
            shadow = shadow_size,
            initial_shadow = initial_shadow_size,
            "compression converged"
        );

        Ok(CompressionReport {
            family,
            shadow_size,
            initial_shadow_size,
            steps: moves.len() as u64,
            initial_measure,
            final_measure: current_measure,
            moves,
        })
    }
}

/// Checks the per-step invariants and returns the new shadow size.
fn check_step(
    before: &Family,
    after: &Family,
    measure_before: u128,
    measure_after: u128,
    shadow_before: usize,
) -> Result<usize> {
    if after.len() != before.len() {
        return Err(KkError::InvariantViolation(format!(
            "cardinality changed from {} to {}",
            before.len(),
            after.len()
        )));
    }
    if !after.is_all_sized(before.set_size()) {
        return Err(KkError::InvariantViolation("member size changed".to_string()));
    }
    if measure_after >= measure_before {
        return Err(KkError::InvariantViolation(format!(
            "measure did not decrease: {measure_before} -> {measure_after}"
        )));
    }
    let shadow_after = shadow_size(after);
    if shadow_after > shadow_before {
        return Err(KkError::InvariantViolation(format!(
            "shadow grew from {shadow_before} to {shadow_after}"
        )));
    }
    Ok(shadow_after)
}

/// Compress `family` to its fully compressed form with default settings.
pub fn run_kruskal_katona_compression(family: Family) -> Result<Family> {
    Ok(KruskalKatonaPipeline::default().run(family)?.family)
}
