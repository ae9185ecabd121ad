use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Knobs for a Kruskal–Katona compression run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompressionConfig {
    /// Ground set size. `None` uses one past the largest element present.
    pub universe_size: Option<usize>,
    /// Safety valve for the scheduler loop. `None` leaves it bounded by the measure alone.
    pub max_steps: Option<u64>,
    /// Scan candidate shift pairs with rayon.
    pub parallel_scan: bool,
    /// Re-check cardinality, member size, measure and shadow after every step.
    pub verify_invariants: bool,
    /// Run the initial-segment checker on the final family.
    pub verify_result: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            universe_size: None,
            max_steps: None,
            parallel_scan: false,
            verify_invariants: false,
            verify_result: true,
        }
    }
}

impl CompressionConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_universe_size(mut self, n: usize) -> Self {
        self.universe_size = Some(n);
        self
    }

    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn parallel(mut self) -> Self {
        self.parallel_scan = true;
        self
    }

    pub fn strict(mut self) -> Self {
        self.verify_invariants = true;
        self.verify_result = true;
        self
    }
}
