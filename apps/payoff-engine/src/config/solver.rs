//! Break-even solver configuration.

use serde::{Deserialize, Serialize};

/// Break-even consistency settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Base tolerance for `|payoff(break_even)|`, scaled by total premium.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Check every solved break-even against the evaluator and warn on drift.
    #[serde(default)]
    pub verify: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            verify: false,
        }
    }
}

const fn default_tolerance() -> f64 {
    1e-6
}
