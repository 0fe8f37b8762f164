//! Option contract primitives.
//!
//! This module provides:
//! - Option type (call/put) and position direction
//! - Single-leg intrinsic value and expiration payoff

mod leg;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use leg::{Leg, stock_payoff};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    /// Call option (right to buy).
    #[serde(alias = "Call", alias = "call")]
    Call,
    /// Put option (right to sell).
    #[serde(alias = "Put", alias = "put")]
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            other => Err(format!("Unknown option type: {other}")),
        }
    }
}

/// Position direction for a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegDirection {
    /// Long position (bought).
    Long,
    /// Short position (sold/written).
    Short,
}

impl LegDirection {
    /// Check if this is a long position.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Self::Long)
    }
}

impl fmt::Display for LegDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
        }
    }
}
