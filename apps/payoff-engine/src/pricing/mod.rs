//! Options payoff pricing.
//!
//! This module provides:
//! - Price grids around the current underlying price
//! - Option chain snapshots for strike and premium lookup
//! - Strategy payoff curves and break-even prices at expiration
//!
//! # Example
//!
//! ```ignore
//! use payoff_engine::pricing::{BreakEven, StrategyType, evaluate, solve};
//!
//! let strikes = [dec!(110), dec!(115), dec!(90), dec!(85)];
//! let premiums = [dec!(2), dec!(1), dec!(2), dec!(1)];
//! let kinds: Vec<_> = StrategyType::IronCondor.leg_kinds().collect();
//!
//! let curve = evaluate(StrategyType::IronCondor, grid.prices(), &strikes, &premiums, &kinds, None)?;
//! let break_even = solve(StrategyType::IronCondor, &strikes, &premiums, None)?;
//! assert_eq!(break_even, BreakEven::Points(vec![dec!(88), dec!(112)]));
//! ```

mod chain;
mod grid;
pub mod strategy;

pub use chain::{ChainEntry, OptionChain};
pub use grid::PriceGrid;
pub use strategy::{
    BreakEven, LegRole, MAX_PRICE, Outlook, PayoffSummary, StrategyLegs, StrategyType, evaluate,
    evaluate_legs, is_consistent, solve, solve_legs,
};
