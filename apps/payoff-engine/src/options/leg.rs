//! Single option leg and its expiration payoff.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OptionType;

/// One option position: a call or put at a strike, bought or sold for a premium.
///
/// Direction is not stored; it is fixed by the role the leg plays in a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Call or put.
    pub kind: OptionType,
    /// Strike price.
    pub strike: Decimal,
    /// Premium per unit, paid (long) or received (short).
    pub premium: Decimal,
}

impl Leg {
    /// Create a new leg.
    #[must_use]
    pub const fn new(kind: OptionType, strike: Decimal, premium: Decimal) -> Self {
        Self {
            kind,
            strike,
            premium,
        }
    }

    /// Create a call leg.
    #[must_use]
    pub const fn call(strike: Decimal, premium: Decimal) -> Self {
        Self::new(OptionType::Call, strike, premium)
    }

    /// Create a put leg.
    #[must_use]
    pub const fn put(strike: Decimal, premium: Decimal) -> Self {
        Self::new(OptionType::Put, strike, premium)
    }

    /// In-the-money amount at the given underlying price.
    #[must_use]
    pub fn intrinsic(&self, price: Decimal) -> Decimal {
        match self.kind {
            OptionType::Call => (price - self.strike).max(Decimal::ZERO),
            OptionType::Put => (self.strike - price).max(Decimal::ZERO),
        }
    }

    /// Expiration P/L of a bought leg.
    #[must_use]
    pub fn long_payoff(&self, price: Decimal) -> Decimal {
        self.intrinsic(price) - self.premium
    }

    /// Expiration P/L of a written leg.
    #[must_use]
    pub fn short_payoff(&self, price: Decimal) -> Decimal {
        self.premium - self.intrinsic(price)
    }
}

/// P/L of one share held at `average_price`.
///
/// Missing average price contributes nothing, leaving only the option terms.
#[must_use]
pub fn stock_payoff(price: Decimal, average_price: Option<Decimal>) -> Decimal {
    average_price.map_or(Decimal::ZERO, |avg| price - avg)
}
