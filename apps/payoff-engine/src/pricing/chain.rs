//! Option chain snapshot.
//!
//! A read-only view of one expiration's quotes: strike and last traded price
//! per call and put. Used to pick strikes and look up the premiums a
//! strategy's legs are priced at. Fetching the chain happens elsewhere.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayoffError;
use crate::options::OptionType;

use super::strategy::StrategyType;

/// One quoted strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    /// Strike price.
    pub strike: Decimal,
    /// Last traded option price.
    pub last_price: Decimal,
}

impl ChainEntry {
    /// Create a new entry.
    #[must_use]
    pub const fn new(strike: Decimal, last_price: Decimal) -> Self {
        Self { strike, last_price }
    }
}

/// Calls and puts for one expiration, each sorted by strike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChainSnapshot")]
pub struct OptionChain {
    /// Current underlying price.
    pub underlying_price: Decimal,
    calls: Vec<ChainEntry>,
    puts: Vec<ChainEntry>,
}

/// Unsorted chain as it arrives from a file or feed.
#[derive(Deserialize)]
struct ChainSnapshot {
    underlying_price: Decimal,
    #[serde(default)]
    calls: Vec<ChainEntry>,
    #[serde(default)]
    puts: Vec<ChainEntry>,
}

impl From<ChainSnapshot> for OptionChain {
    fn from(snapshot: ChainSnapshot) -> Self {
        Self::new(snapshot.underlying_price, snapshot.calls, snapshot.puts)
    }
}

impl OptionChain {
    /// Build a chain, sorting both sides by strike.
    #[must_use]
    pub fn new(
        underlying_price: Decimal,
        mut calls: Vec<ChainEntry>,
        mut puts: Vec<ChainEntry>,
    ) -> Self {
        calls.sort_by_key(|e| e.strike);
        puts.sort_by_key(|e| e.strike);
        Self {
            underlying_price,
            calls,
            puts,
        }
    }

    /// Quotes for one side, sorted by strike.
    #[must_use]
    pub fn entries(&self, kind: OptionType) -> &[ChainEntry] {
        match kind {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    /// Last traded price at exactly `strike`.
    pub fn premium(&self, kind: OptionType, strike: Decimal) -> Result<Decimal, PayoffError> {
        self.entries(kind)
            .binary_search_by_key(&strike, |e| e.strike)
            .map(|i| self.entries(kind)[i].last_price)
            .map_err(|_| PayoffError::StrikeNotFound { kind, strike })
    }

    fn nearest_index(&self, kind: OptionType, target: Decimal) -> Option<usize> {
        // min_by_key keeps the first minimum, so ties resolve to the lower strike
        self.entries(kind)
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.strike - target).abs())
            .map(|(i, _)| i)
    }

    /// Quoted strike nearest to `target`, lower strike on ties.
    #[must_use]
    pub fn nearest_strike(&self, kind: OptionType, target: Decimal) -> Option<Decimal> {
        self.nearest_index(kind, target)
            .map(|i| self.entries(kind)[i].strike)
    }

    /// Quoted strike nearest to the underlying price.
    #[must_use]
    pub fn atm_strike(&self, kind: OptionType) -> Option<Decimal> {
        self.nearest_strike(kind, self.underlying_price)
    }

    /// Strikes within `radius` positions of the ATM strike, ascending.
    #[must_use]
    pub fn strike_window(&self, kind: OptionType, radius: usize) -> Vec<Decimal> {
        let entries = self.entries(kind);
        let Some(atm) = self.nearest_index(kind, self.underlying_price) else {
            return Vec::new();
        };
        let start = atm.saturating_sub(radius);
        let end = atm.saturating_add(radius).saturating_add(1).min(entries.len());

        entries[start..end].iter().map(|e| e.strike).collect()
    }

    /// Premiums for `strikes` in the strategy's role order.
    pub fn premiums_for(
        &self,
        strategy: StrategyType,
        strikes: &[Decimal],
    ) -> Result<Vec<Decimal>, PayoffError> {
        let expected = strategy.leg_count();
        if strikes.len() != expected {
            return Err(PayoffError::InvalidLegCount {
                strategy,
                expected,
                actual: strikes.len(),
            });
        }

        strategy
            .leg_kinds()
            .zip(strikes)
            .map(|(kind, &strike)| self.premium(kind, strike))
            .collect()
    }
}
