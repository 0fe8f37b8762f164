//! Strategy validation utilities.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PayoffError;

use super::legs::StrategyLegs;

/// Largest strike, premium or underlying price accepted.
///
/// Keeps every payoff and break-even sum far inside `Decimal`'s range.
pub const MAX_PRICE: Decimal = dec!(1_000_000_000_000);

/// Validate the strikes and premiums of a strategy's legs.
///
/// Strikes must be in `(0, MAX_PRICE]` and premiums in `[0, MAX_PRICE]`.
/// Any strike order evaluates; see [`validate_ordering`] for what the
/// break-even solver needs.
pub fn validate_legs(legs: &StrategyLegs) -> Result<(), PayoffError> {
    let strategy = legs.strategy_type();

    for (position, leg) in legs.legs().iter().enumerate() {
        if leg.strike <= Decimal::ZERO || leg.strike > MAX_PRICE {
            return Err(PayoffError::invalid_strikes(
                strategy,
                format!(
                    "leg {position} strike {} must be positive and at most {MAX_PRICE}",
                    leg.strike
                ),
            ));
        }
        if leg.premium < Decimal::ZERO || leg.premium > MAX_PRICE {
            return Err(PayoffError::InvalidPremium {
                strategy,
                message: format!(
                    "leg {position} premium {} must be between 0 and {MAX_PRICE}",
                    leg.premium
                ),
            });
        }
    }
    Ok(())
}

/// Validate an underlying or average holding price.
pub fn validate_price(price: Decimal, name: &str) -> Result<(), PayoffError> {
    if price.abs() > MAX_PRICE {
        return Err(PayoffError::InvalidPrice {
            message: format!("{name} {price} exceeds {MAX_PRICE} in magnitude"),
        });
    }
    Ok(())
}

/// Validate the relative order of a strategy's strikes.
///
/// Each break-even formula assumes its strategy's textbook shape, e.g. an
/// iron condor needs `long put < short put <= short call < long call`.
pub fn validate_ordering(legs: &StrategyLegs) -> Result<(), PayoffError> {
    let strategy = legs.strategy_type();

    let ordered = |ok: bool, message: &str| {
        if ok {
            Ok(())
        } else {
            Err(PayoffError::invalid_strikes(strategy, message))
        }
    };

    match legs {
        StrategyLegs::LongCall { .. }
        | StrategyLegs::LongPut { .. }
        | StrategyLegs::CoveredCall { .. }
        | StrategyLegs::ProtectivePut { .. } => Ok(()),
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
            ordered(
                long_put.strike < short_put.strike,
                "Long put strike must be below short put strike",
            )?;
            ordered(
                short_put.strike <= short_call.strike,
                "Short put strike must not be above short call strike",
            )?;
            ordered(
                short_call.strike < long_call.strike,
                "Short call strike must be below long call strike",
            )
        }
        StrategyLegs::BullPutSpread {
            short_put,
            long_put,
        } => ordered(
            long_put.strike < short_put.strike,
            "Long put strike must be below short put strike",
        ),
        StrategyLegs::BearCallSpread {
            short_call,
            long_call,
        } => ordered(
            short_call.strike < long_call.strike,
            "Short call strike must be below long call strike",
        ),
        StrategyLegs::LongStraddle { call, put } | StrategyLegs::ShortStraddle { call, put } => {
            ordered(
                call.strike == put.strike,
                "Call and put strikes must be equal for straddle",
            )
        }
        StrategyLegs::LongStrangle { call, put } | StrategyLegs::ShortStrangle { call, put } => {
            ordered(
                put.strike <= call.strike,
                "Put strike must not be above call strike for strangle",
            )
        }
        StrategyLegs::ButterflySpread {
            itm_call,
            atm_call,
            otm_call,
        } => ordered(
            itm_call.strike < atm_call.strike && atm_call.strike < otm_call.strike,
            "Butterfly strikes must be strictly increasing (ITM < ATM < OTM)",
        ),
        StrategyLegs::Collar {
            long_put,
            short_call,
        } => ordered(
            long_put.strike <= short_call.strike,
            "Put strike must not be above call strike for collar",
        ),
    }
}
