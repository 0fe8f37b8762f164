//! Error handling for the payoff engine.
//!
//! Every evaluate/solve call is a self-contained computation, so errors are
//! local to one call and carry enough context to be shown to an end user.
//!
//! # Error Codes
//!
//! | Code | Usage |
//! |------|-------|
//! | `INVALID_LEG_COUNT` | Strike/premium/kind arrays don't match the strategy |
//! | `UNKNOWN_STRATEGY` | Strategy name outside the catalog |
//! | `LEG_KIND_MISMATCH` | Caller's call/put does not match the leg role |
//! | `INVALID_STRIKES` | Strike out of range, or role ordering violated when solving |
//! | `INVALID_PREMIUM` | Premium out of range |
//! | `INVALID_PRICE` | Underlying or average price out of range |
//! | `INVALID_GRID` | Price grid cannot be built |
//! | `STRIKE_NOT_FOUND` | Option chain has no quote at the strike |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::OptionType;
use crate::pricing::strategy::StrategyType;

/// Error codes for the payoff engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Leg arrays don't match the strategy's leg count.
    InvalidLegCount,
    /// Strategy name outside the catalog.
    UnknownStrategy,
    /// Leg kind contradicts the strategy role.
    LegKindMismatch,
    /// Strike values or ordering are invalid.
    InvalidStrikes,
    /// Premium values are invalid.
    InvalidPremium,
    /// Underlying or average price is out of range.
    InvalidPrice,
    /// Price grid parameters are invalid.
    InvalidGrid,
    /// No chain quote at the requested strike.
    StrikeNotFound,
}

impl ErrorCode {
    /// Get the stable reason string for this error.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidLegCount => "INVALID_LEG_COUNT",
            Self::UnknownStrategy => "UNKNOWN_STRATEGY",
            Self::LegKindMismatch => "LEG_KIND_MISMATCH",
            Self::InvalidStrikes => "INVALID_STRIKES",
            Self::InvalidPremium => "INVALID_PREMIUM",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::InvalidGrid => "INVALID_GRID",
            Self::StrikeNotFound => "STRIKE_NOT_FOUND",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Errors from payoff evaluation, break-even solving and their inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayoffError {
    /// Strike, premium or leg-kind arrays don't match the strategy.
    #[error("{strategy} requires {expected} legs, got {actual}")]
    InvalidLegCount {
        /// Strategy being evaluated.
        strategy: StrategyType,
        /// Leg count the strategy requires.
        expected: usize,
        /// Length of the first mismatching array.
        actual: usize,
    },

    /// Strategy name outside the catalog.
    #[error("Unknown strategy: {name}")]
    UnknownStrategy {
        /// The name that failed to parse.
        name: String,
    },

    /// Leg kind contradicts the strategy's role at that position.
    #[error("{strategy} leg {position} must be a {expected}, got {actual}")]
    LegKindMismatch {
        /// Strategy being evaluated.
        strategy: StrategyType,
        /// Zero-based leg position.
        position: usize,
        /// Kind the role requires.
        expected: OptionType,
        /// Kind the caller supplied.
        actual: OptionType,
    },

    /// Invalid strike configuration.
    #[error("Invalid strike configuration for {strategy}: {message}")]
    InvalidStrikes {
        /// Strategy being evaluated.
        strategy: StrategyType,
        /// Error message.
        message: String,
    },

    /// Invalid premium.
    #[error("Invalid premium for {strategy}: {message}")]
    InvalidPremium {
        /// Strategy being evaluated.
        strategy: StrategyType,
        /// Error message.
        message: String,
    },

    /// Underlying or average price out of range.
    #[error("Invalid price: {message}")]
    InvalidPrice {
        /// Error message.
        message: String,
    },

    /// Price grid cannot be built.
    #[error("Invalid price grid: {message}")]
    InvalidGrid {
        /// Error message.
        message: String,
    },

    /// The option chain has no quote at the strike.
    #[error("No {kind} quoted at strike {strike}")]
    StrikeNotFound {
        /// Option type looked up.
        kind: OptionType,
        /// Strike looked up.
        strike: Decimal,
    },
}

impl PayoffError {
    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidLegCount { .. } => ErrorCode::InvalidLegCount,
            Self::UnknownStrategy { .. } => ErrorCode::UnknownStrategy,
            Self::LegKindMismatch { .. } => ErrorCode::LegKindMismatch,
            Self::InvalidStrikes { .. } => ErrorCode::InvalidStrikes,
            Self::InvalidPremium { .. } => ErrorCode::InvalidPremium,
            Self::InvalidPrice { .. } => ErrorCode::InvalidPrice,
            Self::InvalidGrid { .. } => ErrorCode::InvalidGrid,
            Self::StrikeNotFound { .. } => ErrorCode::StrikeNotFound,
        }
    }

    pub(crate) fn invalid_strikes(strategy: StrategyType, message: impl Into<String>) -> Self {
        Self::InvalidStrikes {
            strategy,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            message: message.into(),
        }
    }
}
