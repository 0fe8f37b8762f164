//! Options strategy payoff engine.
//!
//! Provides:
//! - Strategy catalog: leg counts, roles and stock requirements
//! - Leg configuration: positional arrays turned into named, validated legs
//! - Payoff evaluation over a price grid
//! - Closed-form break-even prices that agree with the evaluator
//! - Curve summary (max profit / max loss)

mod breakeven;
mod legs;
mod payoff;
mod summary;
mod types;
mod validation;

pub use breakeven::{BreakEven, is_consistent, solve, solve_legs};
pub use legs::StrategyLegs;
pub use payoff::{evaluate, evaluate_legs};
pub use summary::PayoffSummary;
pub use types::{LegRole, Outlook, StrategyType};
pub use validation::{MAX_PRICE, validate_legs, validate_ordering, validate_price};
