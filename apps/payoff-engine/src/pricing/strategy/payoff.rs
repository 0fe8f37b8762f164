//! Expiration payoff evaluation.

use rust_decimal::Decimal;

use crate::error::PayoffError;
use crate::options::{OptionType, stock_payoff};

use super::legs::StrategyLegs;
use super::types::StrategyType;
use super::validation::{validate_legs, validate_price};

impl StrategyLegs {
    /// Net P/L at expiration for one underlying price.
    ///
    /// For stock-linked strategies `average_price` prices the long stock leg;
    /// without it only the option legs are counted. Inputs must be within
    /// [`MAX_PRICE`](super::MAX_PRICE).
    #[must_use]
    pub(crate) fn payoff_at(&self, price: Decimal, average_price: Option<Decimal>) -> Decimal {
        match self {
            Self::LongCall { call: leg }
            | Self::LongPut { put: leg } => leg.long_payoff(price),
            Self::CoveredCall { short_call } => {
                stock_payoff(price, average_price) + short_call.short_payoff(price)
            }
            Self::ProtectivePut { long_put } => {
                stock_payoff(price, average_price) + long_put.long_payoff(price)
            }
            Self::IronCondor {
                short_call,
                long_call,
                short_put,
                long_put,
            }
            | Self::IronButterfly {
                long_put,
                short_put,
                short_call,
                long_call,
            } => {
                short_call.short_payoff(price)
                    + long_call.long_payoff(price)
                    + short_put.short_payoff(price)
                    + long_put.long_payoff(price)
            }
            Self::BullPutSpread {
                short_put,
                long_put,
            } => short_put.short_payoff(price) + long_put.long_payoff(price),
            Self::BearCallSpread {
                short_call,
                long_call,
            } => short_call.short_payoff(price) + long_call.long_payoff(price),
            Self::LongStraddle { call, put } | Self::LongStrangle { call, put } => {
                call.long_payoff(price) + put.long_payoff(price)
            }
            Self::ShortStraddle { call, put } | Self::ShortStrangle { call, put } => {
                call.short_payoff(price) + put.short_payoff(price)
            }
            Self::ButterflySpread {
                itm_call,
                atm_call,
                otm_call,
            } => {
                itm_call.long_payoff(price)
                    + Decimal::TWO * atm_call.short_payoff(price)
                    + otm_call.long_payoff(price)
            }
            Self::Collar {
                long_put,
                short_call,
            } => {
                stock_payoff(price, average_price)
                    + long_put.long_payoff(price)
                    + short_call.short_payoff(price)
            }
        }
    }
}

/// Evaluate legs over a price grid.
///
/// Output has the same length and order as `grid`. Legs may be in any strike
/// order; grid and average prices must be within `MAX_PRICE` in magnitude.
pub fn evaluate_legs(
    legs: &StrategyLegs,
    grid: &[Decimal],
    average_price: Option<Decimal>,
) -> Result<Vec<Decimal>, PayoffError> {
    validate_legs(legs)?;
    if let Some(avg) = average_price {
        validate_price(avg, "average_price")?;
    }
    for &price in grid {
        validate_price(price, "grid price")?;
    }

    let strategy = legs.strategy_type();
    if strategy.requires_average_price() && average_price.is_none() {
        tracing::warn!(
            strategy = %strategy,
            "No average stock price, payoff excludes the stock position"
        );
    }

    Ok(grid
        .iter()
        .map(|&price| legs.payoff_at(price, average_price))
        .collect())
}

/// Evaluate a strategy over a price grid from positional leg arrays.
///
/// `strikes`, `premiums` and `kinds` are in the strategy's catalog role order
/// and must all have `strategy.leg_count()` entries.
pub fn evaluate(
    strategy: StrategyType,
    grid: &[Decimal],
    strikes: &[Decimal],
    premiums: &[Decimal],
    kinds: &[OptionType],
    average_price: Option<Decimal>,
) -> Result<Vec<Decimal>, PayoffError> {
    let legs = StrategyLegs::from_positional(strategy, strikes, premiums, Some(kinds))?;

    tracing::debug!(
        strategy = %strategy,
        legs = strategy.leg_count(),
        points = grid.len(),
        "Evaluating payoff curve"
    );

    evaluate_legs(&legs, grid, average_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn kinds(strategy: StrategyType) -> Vec<OptionType> {
        strategy.leg_kinds().collect()
    }

    #[test]
    fn test_long_call_boundary() {
        let grid = [dec!(90), dec!(100), dec!(105), dec!(120)];
        let curve = evaluate(
            StrategyType::LongCall,
            &grid,
            &[dec!(100)],
            &[dec!(5)],
            &[OptionType::Call],
            None,
        )
        .unwrap();

        assert_eq!(curve, vec![dec!(-5), dec!(-5), dec!(0), dec!(15)]);
    }

    #[test]
    fn test_iron_condor_profile() {
        let strategy = StrategyType::IronCondor;
        let grid = [dec!(80), dec!(88), dec!(100), dec!(112), dec!(120)];
        let curve = evaluate(
            strategy,
            &grid,
            &[dec!(110), dec!(115), dec!(90), dec!(85)],
            &[dec!(2), dec!(1), dec!(2), dec!(1)],
            &kinds(strategy),
            None,
        )
        .unwrap();

        assert_eq!(curve, vec![dec!(-3), dec!(0), dec!(2), dec!(0), dec!(-3)]);
    }

    #[test]
    fn test_covered_call_with_stock() {
        let strategy = StrategyType::CoveredCall;
        let grid = [dec!(90), dec!(100), dec!(110), dec!(130)];
        let curve = evaluate(
            strategy,
            &grid,
            &[dec!(110)],
            &[dec!(3)],
            &kinds(strategy),
            Some(dec!(100)),
        )
        .unwrap();

        // S - 100 + 3 below the strike, capped at 13 above
        assert_eq!(curve, vec![dec!(-7), dec!(3), dec!(13), dec!(13)]);
    }

    #[test]
    fn test_covered_call_without_stock_is_short_call() {
        let strategy = StrategyType::CoveredCall;
        let grid = [dec!(90), dec!(120)];
        let curve = evaluate(strategy, &grid, &[dec!(110)], &[dec!(3)], &kinds(strategy), None)
            .unwrap();

        assert_eq!(curve, vec![dec!(3), dec!(-7)]);
    }

    #[test]
    fn test_collar_scenario() {
        let legs = StrategyLegs::from_positional(
            StrategyType::Collar,
            &[dec!(95), dec!(105)],
            &[dec!(3), dec!(2)],
            None,
        )
        .unwrap();
        let avg = Some(dec!(100));

        // -5 + 0 - 3 + 2
        assert_eq!(legs.payoff_at(dec!(95), avg), dec!(-6));
        assert_eq!(legs.payoff_at(dec!(80), avg), dec!(-6));
        assert_eq!(legs.payoff_at(dec!(101), avg), Decimal::ZERO);
        assert_eq!(legs.payoff_at(dec!(150), avg), dec!(4));
    }

    #[test]
    fn test_butterfly_counts_body_twice() {
        let legs = StrategyLegs::from_positional(
            StrategyType::ButterflySpread,
            &[dec!(95), dec!(100), dec!(105)],
            &[dec!(7), dec!(4), dec!(2)],
            None,
        )
        .unwrap();

        // Net debit of 1, peak of 4 at the body
        assert_eq!(legs.payoff_at(dec!(90), None), dec!(-1));
        assert_eq!(legs.payoff_at(dec!(100), None), dec!(4));
        assert_eq!(legs.payoff_at(dec!(110), None), dec!(-1));
    }

    #[test]
    fn test_empty_grid() {
        let strategy = StrategyType::LongPut;
        let curve = evaluate(strategy, &[], &[dec!(100)], &[dec!(5)], &kinds(strategy), None)
            .unwrap();
        assert!(curve.is_empty());
    }

    #[test]
    fn test_rejects_two_strike_iron_condor() {
        let err = evaluate(
            StrategyType::IronCondor,
            &[dec!(100)],
            &[dec!(110), dec!(90)],
            &[dec!(2), dec!(2)],
            &[OptionType::Call, OptionType::Put],
            None,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            PayoffError::InvalidLegCount {
                expected: 4,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_idempotent() {
        let strategy = StrategyType::ShortStrangle;
        let grid = [dec!(80), dec!(100), dec!(120)];
        let run = || {
            evaluate(
                strategy,
                &grid,
                &[dec!(105), dec!(95)],
                &[dec!(2), dec!(3)],
                &kinds(strategy),
                None,
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_inverted_strangle_evaluates() {
        // Call below put: both legs in the money between the strikes
        let strategy = StrategyType::LongStrangle;
        let grid = [dec!(80), dec!(95), dec!(100), dec!(105), dec!(120)];
        let curve = evaluate(
            strategy,
            &grid,
            &[dec!(95), dec!(105)],
            &[dec!(6), dec!(6)],
            &kinds(strategy),
            None,
        )
        .unwrap();

        assert_eq!(curve, vec![dec!(13), dec!(-2), dec!(-2), dec!(-2), dec!(13)]);
    }

    #[test]
    fn test_reversed_bull_put_evaluates() {
        let strategy = StrategyType::BullPutSpread;
        let curve = evaluate(
            strategy,
            &[dec!(90), dec!(97), dec!(110)],
            &[dec!(95), dec!(100)],
            &[dec!(1), dec!(3)],
            &kinds(strategy),
            None,
        )
        .unwrap();

        assert_eq!(curve, vec![dec!(3), dec!(1), dec!(-2)]);
    }

    #[test]
    fn test_rejects_out_of_range_prices() {
        let strategy = StrategyType::CoveredCall;
        let eval = |grid: &[Decimal], avg: Option<Decimal>| {
            evaluate(strategy, grid, &[dec!(110)], &[dec!(3)], &kinds(strategy), avg)
        };

        let err = eval(&[dec!(100), Decimal::MAX], None).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidPrice);

        let err = eval(&[dec!(100)], Some(Decimal::MIN)).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidPrice);
    }
}
