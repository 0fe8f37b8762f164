//! Price grid configuration.

use serde::{Deserialize, Serialize};

/// Most grid points a single curve may have.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Price grid around the current underlying price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of grid points, endpoints included.
    #[serde(default = "default_points")]
    pub points: usize,
    /// Lowest grid price as a fraction of spot.
    #[serde(default = "default_lower_factor")]
    pub lower_factor: f64,
    /// Highest grid price as a fraction of spot.
    #[serde(default = "default_upper_factor")]
    pub upper_factor: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            points: default_points(),
            lower_factor: default_lower_factor(),
            upper_factor: default_upper_factor(),
        }
    }
}

const fn default_points() -> usize {
    10_000
}

const fn default_lower_factor() -> f64 {
    0.5
}

const fn default_upper_factor() -> f64 {
    1.5
}
