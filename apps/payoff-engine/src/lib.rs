// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value
    )
)]

//! Payoff Engine - Rust Core Library
//!
//! Expiration P/L curves and break-even prices for standard option strategies.
//!
//! # Modules
//!
//! - `options`: Call/put legs and their intrinsic value at expiration
//! - `pricing`: Strategy catalog, payoff evaluator, break-even solver,
//!   price grids and option chain snapshots
//! - `scenario`: File-based requests and JSON reports
//! - `config`: YAML configuration with environment interpolation
//! - `observability`: Tracing subscriber setup
//!
//! The evaluator and solver are pure and independent; every break-even price
//! the solver returns evaluates to zero P/L.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod observability;
pub mod options;
pub mod pricing;
pub mod scenario;

pub use error::{ErrorCode, PayoffError};
pub use options::{Leg, LegDirection, OptionType};
pub use pricing::{
    BreakEven, OptionChain, PayoffSummary, PriceGrid, StrategyLegs, StrategyType, evaluate, solve,
};
pub use scenario::{LegReport, Report, Scenario, ScenarioError, StrikeWindow};
