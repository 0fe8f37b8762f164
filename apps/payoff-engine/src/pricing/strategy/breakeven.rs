//! Closed-form break-even prices.
//!
//! Every supported payoff is piecewise linear in the underlying price with
//! kinks at the strikes. Each break-even formula below is the zero of one of
//! those linear segments. A candidate is kept only if it lies inside the
//! segment that produced it; otherwise the payoff never reaches zero there.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::PayoffError;

use super::legs::StrategyLegs;
use super::types::StrategyType;
use super::validation::{validate_legs, validate_ordering, validate_price};

/// Break-even result for one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "prices", rename_all = "snake_case")]
pub enum BreakEven {
    /// Prices where net P/L is zero, ascending, at most two.
    Points(Vec<Decimal>),
    /// Stock-linked strategy solved without an average holding price.
    RequiresAveragePrice,
}

impl BreakEven {
    /// Break-even prices, or `None` when an average price is required.
    #[must_use]
    pub fn points(&self) -> Option<&[Decimal]> {
        match self {
            Self::Points(points) => Some(points),
            Self::RequiresAveragePrice => None,
        }
    }

    /// Whether the result is the average-price marker.
    #[must_use]
    pub const fn requires_average_price(&self) -> bool {
        matches!(self, Self::RequiresAveragePrice)
    }
}

/// Candidate root and the closed segment it must fall in.
///
/// `upper: None` means the segment is unbounded above.
struct Candidate {
    price: Decimal,
    lower: Decimal,
    upper: Option<Decimal>,
}

impl Candidate {
    const fn new(price: Decimal, lower: Decimal, upper: Option<Decimal>) -> Self {
        Self {
            price,
            lower,
            upper,
        }
    }

    fn accepted(&self) -> Option<Decimal> {
        let above = self.price >= self.lower;
        let below = self.upper.is_none_or(|upper| self.price <= upper);
        (above && below).then_some(self.price)
    }
}

fn finish(candidates: impl IntoIterator<Item = Candidate>) -> BreakEven {
    let mut points: Vec<Decimal> = candidates
        .into_iter()
        .filter_map(|c| c.accepted())
        .collect();
    points.sort_unstable();
    points.dedup();
    BreakEven::Points(points)
}

/// Solve break-even prices for a set of legs.
///
/// The strikes must follow the strategy's role order, since each formula
/// assumes that shape.
pub fn solve_legs(
    legs: &StrategyLegs,
    average_price: Option<Decimal>,
) -> Result<BreakEven, PayoffError> {
    validate_legs(legs)?;
    validate_ordering(legs)?;

    let Some(avg) = average_price else {
        if legs.strategy_type().requires_average_price() {
            return Ok(BreakEven::RequiresAveragePrice);
        }
        return Ok(solve_points(legs, Decimal::ZERO));
    };
    validate_price(avg, "average_price")?;
    Ok(solve_points(legs, avg))
}

fn solve_points(legs: &StrategyLegs, avg: Decimal) -> BreakEven {
    let zero = Decimal::ZERO;

    match *legs {
        StrategyLegs::LongCall { call } => finish([Candidate::new(
            call.strike + call.premium,
            call.strike,
            None,
        )]),
        StrategyLegs::LongPut { put } => finish([Candidate::new(
            put.strike - put.premium,
            zero,
            Some(put.strike),
        )]),
        StrategyLegs::CoveredCall { short_call } => finish([Candidate::new(
            avg - short_call.premium,
            zero,
            Some(short_call.strike),
        )]),
        StrategyLegs::ProtectivePut { long_put } => finish([Candidate::new(
            avg + long_put.premium,
            long_put.strike,
            None,
        )]),
        StrategyLegs::IronCondor {
            short_call,
            long_call,
            short_put,
            long_put,
        }
        | StrategyLegs::IronButterfly {
            long_put,
            short_put,
            short_call,
            long_call,
        } => {
            let credit = short_call.premium + short_put.premium
                - long_call.premium
                - long_put.premium;
            finish([
                Candidate::new(
                    short_put.strike - credit,
                    long_put.strike,
                    Some(short_put.strike),
                ),
                Candidate::new(
                    short_call.strike + credit,
                    short_call.strike,
                    Some(long_call.strike),
                ),
            ])
        }
        StrategyLegs::BullPutSpread {
            short_put,
            long_put,
        } => {
            let credit = short_put.premium - long_put.premium;
            finish([Candidate::new(
                short_put.strike - credit,
                long_put.strike,
                Some(short_put.strike),
            )])
        }
        StrategyLegs::BearCallSpread {
            short_call,
            long_call,
        } => {
            let credit = short_call.premium - long_call.premium;
            finish([Candidate::new(
                short_call.strike + credit,
                short_call.strike,
                Some(long_call.strike),
            )])
        }
        StrategyLegs::LongStraddle { call, put }
        | StrategyLegs::ShortStraddle { call, put }
        | StrategyLegs::LongStrangle { call, put }
        | StrategyLegs::ShortStrangle { call, put } => {
            let total = call.premium + put.premium;
            finish([
                Candidate::new(put.strike - total, zero, Some(put.strike)),
                Candidate::new(call.strike + total, call.strike, None),
            ])
        }
        StrategyLegs::ButterflySpread {
            itm_call,
            atm_call,
            otm_call,
        } => {
            let debit = itm_call.premium - Decimal::TWO * atm_call.premium + otm_call.premium;
            finish([
                Candidate::new(
                    itm_call.strike + debit,
                    itm_call.strike,
                    Some(atm_call.strike),
                ),
                Candidate::new(
                    Decimal::TWO * atm_call.strike - itm_call.strike - debit,
                    atm_call.strike,
                    Some(otm_call.strike),
                ),
            ])
        }
        StrategyLegs::Collar {
            long_put,
            short_call,
        } => finish([Candidate::new(
            avg + long_put.premium - short_call.premium,
            long_put.strike,
            Some(short_call.strike),
        )]),
    }
}

/// Solve break-even prices from positional leg arrays.
///
/// Leg kinds are implied by the strategy's catalog roles.
pub fn solve(
    strategy: StrategyType,
    strikes: &[Decimal],
    premiums: &[Decimal],
    average_price: Option<Decimal>,
) -> Result<BreakEven, PayoffError> {
    let legs = StrategyLegs::from_positional(strategy, strikes, premiums, None)?;
    let result = solve_legs(&legs, average_price)?;

    tracing::debug!(strategy = %strategy, result = ?result, "Solved break-even");
    Ok(result)
}

/// Whether every break-even point evaluates to zero within tolerance.
///
/// The tolerance scales with the premiums: `base * max(1, premium_scale)`.
pub fn is_consistent(
    legs: &StrategyLegs,
    average_price: Option<Decimal>,
    base_tolerance: Decimal,
) -> Result<bool, PayoffError> {
    let BreakEven::Points(points) = solve_legs(legs, average_price)? else {
        return Ok(true);
    };
    let tolerance = base_tolerance.saturating_mul(legs.premium_scale().max(Decimal::ONE));

    Ok(points
        .iter()
        .all(|&point| legs.payoff_at(point, average_price).abs() <= tolerance))
}
