//! Option chain configuration.

use serde::{Deserialize, Serialize};

/// Widest strike window accepted from configuration.
pub const MAX_STRIKE_WINDOW: usize = 1_000;

/// Option chain snapshot settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Strikes shown on each side of the ATM strike.
    #[serde(default = "default_strike_window")]
    pub strike_window: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            strike_window: default_strike_window(),
        }
    }
}

const fn default_strike_window() -> usize {
    10
}
