//! Per-strategy leg configuration.
//!
//! Positional strike/premium arrays are turned into named legs exactly once,
//! here. Payoff and break-even code only ever see [`StrategyLegs`].

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::PayoffError;
use crate::options::{Leg, OptionType};

use super::types::{LegRole, StrategyType};
use super::validation::validate_legs;

/// Legs of a strategy, by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyLegs {
    /// Long Call.
    LongCall {
        /// The bought call.
        call: Leg,
    },
    /// Long Put.
    LongPut {
        /// The bought put.
        put: Leg,
    },
    /// Covered Call (stock held separately).
    CoveredCall {
        /// The written call.
        short_call: Leg,
    },
    /// Protective Put (stock held separately).
    ProtectivePut {
        /// The bought put.
        long_put: Leg,
    },
    /// Iron Condor.
    IronCondor {
        /// Written call, lower call strike.
        short_call: Leg,
        /// Bought call wing.
        long_call: Leg,
        /// Written put, higher put strike.
        short_put: Leg,
        /// Bought put wing.
        long_put: Leg,
    },
    /// Bull Put Spread.
    BullPutSpread {
        /// Written put, higher strike.
        short_put: Leg,
        /// Bought put, lower strike.
        long_put: Leg,
    },
    /// Bear Call Spread.
    BearCallSpread {
        /// Written call, lower strike.
        short_call: Leg,
        /// Bought call, higher strike.
        long_call: Leg,
    },
    /// Long Straddle.
    LongStraddle {
        /// Bought call.
        call: Leg,
        /// Bought put at the call's strike.
        put: Leg,
    },
    /// Short Straddle.
    ShortStraddle {
        /// Written call.
        call: Leg,
        /// Written put at the call's strike.
        put: Leg,
    },
    /// Long Strangle.
    LongStrangle {
        /// Bought call, higher strike.
        call: Leg,
        /// Bought put, lower strike.
        put: Leg,
    },
    /// Short Strangle.
    ShortStrangle {
        /// Written call, higher strike.
        call: Leg,
        /// Written put, lower strike.
        put: Leg,
    },
    /// Call Butterfly: one ITM call, two written ATM calls, one OTM call.
    ButterflySpread {
        /// Bought lower-strike call.
        itm_call: Leg,
        /// Written middle-strike call, held twice.
        atm_call: Leg,
        /// Bought upper-strike call.
        otm_call: Leg,
    },
    /// Iron Butterfly.
    IronButterfly {
        /// Bought put wing.
        long_put: Leg,
        /// Written put body.
        short_put: Leg,
        /// Written call body.
        short_call: Leg,
        /// Bought call wing.
        long_call: Leg,
    },
    /// Collar (stock held separately).
    Collar {
        /// Bought protective put.
        long_put: Leg,
        /// Written covered call.
        short_call: Leg,
    },
}

impl StrategyLegs {
    /// Build legs from positional arrays, in the catalog's role order.
    ///
    /// `kinds` is optional: when given, each entry must match the role at that
    /// position. Strikes and premiums are range-checked; their relative order
    /// is only checked when solving break-evens.
    pub fn from_positional(
        strategy: StrategyType,
        strikes: &[Decimal],
        premiums: &[Decimal],
        kinds: Option<&[OptionType]>,
    ) -> Result<Self, PayoffError> {
        let roles = strategy.leg_roles();
        let expected = roles.len();

        let lengths = [
            Some(strikes.len()),
            Some(premiums.len()),
            kinds.map(<[OptionType]>::len),
        ];
        if let Some(actual) = lengths.into_iter().flatten().find(|&len| len != expected) {
            return Err(PayoffError::InvalidLegCount {
                strategy,
                expected,
                actual,
            });
        }

        if let Some(kinds) = kinds {
            for (position, (role, &actual)) in roles.iter().zip(kinds).enumerate() {
                if role.kind != actual {
                    return Err(PayoffError::LegKindMismatch {
                        strategy,
                        position,
                        expected: role.kind,
                        actual,
                    });
                }
            }
        }

        let leg = |i: usize| Leg::new(roles[i].kind, strikes[i], premiums[i]);

        let legs = match strategy {
            StrategyType::LongCall => Self::LongCall { call: leg(0) },
            StrategyType::LongPut => Self::LongPut { put: leg(0) },
            StrategyType::CoveredCall => Self::CoveredCall { short_call: leg(0) },
            StrategyType::ProtectivePut => Self::ProtectivePut { long_put: leg(0) },
            StrategyType::IronCondor => Self::IronCondor {
                short_call: leg(0),
                long_call: leg(1),
                short_put: leg(2),
                long_put: leg(3),
            },
            StrategyType::BullPutSpread => Self::BullPutSpread {
                short_put: leg(0),
                long_put: leg(1),
            },
            StrategyType::BearCallSpread => Self::BearCallSpread {
                short_call: leg(0),
                long_call: leg(1),
            },
            StrategyType::LongStraddle => Self::LongStraddle {
                call: leg(0),
                put: leg(1),
            },
            StrategyType::ShortStraddle => Self::ShortStraddle {
                call: leg(0),
                put: leg(1),
            },
            StrategyType::LongStrangle => Self::LongStrangle {
                call: leg(0),
                put: leg(1),
            },
            StrategyType::ShortStrangle => Self::ShortStrangle {
                call: leg(0),
                put: leg(1),
            },
            StrategyType::ButterflySpread => Self::ButterflySpread {
                itm_call: leg(0),
                atm_call: leg(1),
                otm_call: leg(2),
            },
            StrategyType::IronButterfly => Self::IronButterfly {
                long_put: leg(0),
                short_put: leg(1),
                short_call: leg(2),
                long_call: leg(3),
            },
            StrategyType::Collar => Self::Collar {
                long_put: leg(0),
                short_call: leg(1),
            },
        };

        validate_legs(&legs)?;
        Ok(legs)
    }

    /// The strategy these legs form.
    #[must_use]
    pub const fn strategy_type(&self) -> StrategyType {
        match self {
            Self::LongCall { .. } => StrategyType::LongCall,
            Self::LongPut { .. } => StrategyType::LongPut,
            Self::CoveredCall { .. } => StrategyType::CoveredCall,
            Self::ProtectivePut { .. } => StrategyType::ProtectivePut,
            Self::IronCondor { .. } => StrategyType::IronCondor,
            Self::BullPutSpread { .. } => StrategyType::BullPutSpread,
            Self::BearCallSpread { .. } => StrategyType::BearCallSpread,
            Self::LongStraddle { .. } => StrategyType::LongStraddle,
            Self::ShortStraddle { .. } => StrategyType::ShortStraddle,
            Self::LongStrangle { .. } => StrategyType::LongStrangle,
            Self::ShortStrangle { .. } => StrategyType::ShortStrangle,
            Self::ButterflySpread { .. } => StrategyType::ButterflySpread,
            Self::IronButterfly { .. } => StrategyType::IronButterfly,
            Self::Collar { .. } => StrategyType::Collar,
        }
    }

    /// Legs in positional (catalog) order.
    #[must_use]
    pub fn legs(&self) -> Vec<Leg> {
        match *self {
            Self::LongCall { call: a }
            | Self::LongPut { put: a }
            | Self::CoveredCall { short_call: a }
            | Self::ProtectivePut { long_put: a } => vec![a],
            Self::BullPutSpread {
                short_put: a,
                long_put: b,
            }
            | Self::BearCallSpread {
                short_call: a,
                long_call: b,
            }
            | Self::LongStraddle { call: a, put: b }
            | Self::ShortStraddle { call: a, put: b }
            | Self::LongStrangle { call: a, put: b }
            | Self::ShortStrangle { call: a, put: b }
            | Self::Collar {
                long_put: a,
                short_call: b,
            } => vec![a, b],
            Self::ButterflySpread {
                itm_call: a,
                atm_call: b,
                otm_call: c,
            } => vec![a, b, c],
            Self::IronCondor {
                short_call: a,
                long_call: b,
                short_put: c,
                long_put: d,
            }
            | Self::IronButterfly {
                long_put: a,
                short_put: b,
                short_call: c,
                long_call: d,
            } => vec![a, b, c, d],
        }
    }

    /// Legs paired with their catalog roles.
    #[must_use]
    pub fn roles(&self) -> Vec<(LegRole, Leg)> {
        self.strategy_type()
            .leg_roles()
            .iter()
            .copied()
            .zip(self.legs())
            .collect()
    }

    /// Sum of premiums weighted by leg ratio, ignoring direction.
    ///
    /// Used as the scale for break-even tolerance checks.
    #[must_use]
    pub fn premium_scale(&self) -> Decimal {
        self.roles()
            .iter()
            .map(|(role, leg)| leg.premium * Decimal::from(role.ratio))
            .sum()
    }

    /// Net premium at entry: positive for a credit, negative for a debit.
    #[must_use]
    pub fn net_premium(&self) -> Decimal {
        self.roles()
            .iter()
            .map(|(role, leg)| {
                let amount = leg.premium * Decimal::from(role.ratio);
                if role.direction.is_long() {
                    -amount
                } else {
                    amount
                }
            })
            .sum()
    }
}
