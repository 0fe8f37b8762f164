//! Scenario files: one payoff request and its report.
//!
//! A scenario names a strategy, its strikes and either the premiums or an
//! option chain to read them from. Running it builds the price grid,
//! evaluates the payoff, solves break-even prices and summarizes the curve.
//!
//! ```yaml
//! strategy: Iron Condor
//! spot: 100
//! strikes: [110, 115, 90, 85]
//! premiums: [2, 1, 2, 1]
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Config, GridConfig};
use crate::error::PayoffError;
use crate::options::{LegDirection, OptionType};
use crate::pricing::{
    BreakEven, OptionChain, Outlook, PayoffSummary, PriceGrid, StrategyLegs, StrategyType,
    evaluate_legs, is_consistent, solve_legs,
};

/// Scenario errors.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Failed to read the scenario file.
    #[error("Failed to read scenario '{path}': {source}")]
    ReadError {
        /// Path to the scenario file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML.
    #[error("Failed to parse scenario YAML: {0}")]
    YamlError(#[from] serde_yaml_bw::Error),

    /// Failed to parse JSON.
    #[error("Failed to parse scenario JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A required input is missing.
    #[error("Scenario is missing {0}")]
    Missing(&'static str),

    /// Payoff computation rejected the inputs.
    #[error(transparent)]
    Payoff(#[from] PayoffError),
}

/// One payoff request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Strategy, by display name or snake case.
    pub strategy: StrategyType,
    /// Current underlying price. Falls back to the chain's underlying price.
    #[serde(default)]
    pub spot: Option<Decimal>,
    /// Strikes in the strategy's role order.
    pub strikes: Vec<Decimal>,
    /// Premiums in role order. Looked up in `chain` when absent.
    #[serde(default)]
    pub premiums: Option<Vec<Decimal>>,
    /// Call/put per leg. Checked against the strategy's roles when given.
    #[serde(default)]
    pub kinds: Option<Vec<OptionType>>,
    /// Average holding price of the stock, for stock-linked strategies.
    #[serde(default)]
    pub average_price: Option<Decimal>,
    /// Explicit grid prices. Overrides the generated grid.
    #[serde(default)]
    pub prices: Option<Vec<Decimal>>,
    /// Grid settings overriding the configured ones.
    #[serde(default)]
    pub grid: Option<GridConfig>,
    /// Option chain snapshot to price legs from.
    #[serde(default)]
    pub chain: Option<OptionChain>,
    /// Include the full payoff curve in the report.
    #[serde(default)]
    pub include_curve: bool,
}

/// One leg as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegReport {
    /// Role label, e.g. "short call".
    pub role: &'static str,
    /// Long or short.
    pub direction: LegDirection,
    /// Call or put.
    pub kind: OptionType,
    /// Contracts relative to the other legs.
    pub ratio: u32,
    /// Strike price.
    pub strike: Decimal,
    /// Premium per unit.
    pub premium: Decimal,
}

/// Strikes around the money on each side of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrikeWindow {
    /// Call strike nearest the underlying price.
    pub atm_call: Option<Decimal>,
    /// Put strike nearest the underlying price.
    pub atm_put: Option<Decimal>,
    /// Call strikes around `atm_call`, ascending.
    pub calls: Vec<Decimal>,
    /// Put strikes around `atm_put`, ascending.
    pub puts: Vec<Decimal>,
}

impl StrikeWindow {
    fn from_chain(chain: &OptionChain, radius: usize) -> Self {
        Self {
            atm_call: chain.atm_strike(OptionType::Call),
            atm_put: chain.atm_strike(OptionType::Put),
            calls: chain.strike_window(OptionType::Call, radius),
            puts: chain.strike_window(OptionType::Put, radius),
        }
    }
}

/// Result of running a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Strategy evaluated.
    pub strategy: StrategyType,
    /// Market view the strategy expresses.
    pub outlook: Outlook,
    /// Legs in role order.
    pub legs: Vec<LegReport>,
    /// Net premium at entry: positive credit, negative debit.
    pub net_premium: Decimal,
    /// Break-even prices or the average-price marker.
    pub break_even: BreakEven,
    /// Max profit and loss over the grid.
    pub summary: Option<PayoffSummary>,
    /// Max profit over max loss on the grid, absent when nothing is at risk.
    pub reward_to_risk: Option<Decimal>,
    /// Number of grid points evaluated.
    pub grid_points: usize,
    /// Strikes around the money, when the scenario carries a chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_window: Option<StrikeWindow>,
    /// Grid prices, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<Decimal>>,
    /// Payoff per grid price, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<Vec<Decimal>>,
}

impl Scenario {
    /// Load a scenario from a `.json` file, or YAML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ScenarioError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(serde_yaml_bw::from_str(&contents)?)
        }
    }

    fn spot(&self) -> Option<Decimal> {
        self.spot
            .or_else(|| self.chain.as_ref().map(|c| c.underlying_price))
    }

    fn premiums(&self) -> Result<Vec<Decimal>, ScenarioError> {
        if let Some(premiums) = &self.premiums {
            return Ok(premiums.clone());
        }
        let chain = self
            .chain
            .as_ref()
            .ok_or(ScenarioError::Missing("premiums or an option chain"))?;
        Ok(chain.premiums_for(self.strategy, &self.strikes)?)
    }

    /// Validated legs for this scenario.
    pub fn legs(&self) -> Result<StrategyLegs, ScenarioError> {
        let premiums = self.premiums()?;
        Ok(StrategyLegs::from_positional(
            self.strategy,
            &self.strikes,
            &premiums,
            self.kinds.as_deref(),
        )?)
    }

    /// Price grid: explicit prices, else generated around spot.
    pub fn price_grid(&self, defaults: &GridConfig) -> Result<PriceGrid, ScenarioError> {
        if let Some(prices) = &self.prices {
            return Ok(PriceGrid::from_prices(prices.clone()));
        }
        let spot = self
            .spot()
            .ok_or(ScenarioError::Missing("spot, prices or an option chain"))?;
        let grid = self.grid.as_ref().unwrap_or(defaults);
        Ok(PriceGrid::around(spot, grid)?)
    }

    fn verify(
        &self,
        legs: &StrategyLegs,
        break_even: &BreakEven,
        tolerance: f64,
    ) -> Result<(), ScenarioError> {
        let tolerance = match Decimal::try_from(tolerance) {
            Ok(tolerance) => tolerance,
            Err(e) => {
                tracing::warn!(tolerance, error = %e, "Skipping break-even check");
                return Ok(());
            }
        };
        if !is_consistent(legs, self.average_price, tolerance)? {
            tracing::warn!(
                strategy = %self.strategy,
                break_even = ?break_even,
                "Break-even prices do not evaluate to zero"
            );
        }
        Ok(())
    }

    /// Evaluate, solve and summarize.
    pub fn run(&self, config: &Config) -> Result<Report, ScenarioError> {
        let legs = self.legs()?;
        let grid = self.price_grid(&config.grid)?;

        let curve = evaluate_legs(&legs, grid.prices(), self.average_price)?;
        let break_even = solve_legs(&legs, self.average_price)?;
        let summary = PayoffSummary::from_curve(grid.prices(), &curve);

        if config.solver.verify {
            self.verify(&legs, &break_even, config.solver.tolerance)?;
        }

        tracing::info!(
            strategy = %self.strategy,
            points = grid.len(),
            break_even = ?break_even,
            "Scenario evaluated"
        );

        let legs_report = legs
            .roles()
            .into_iter()
            .map(|(role, leg)| LegReport {
                role: role.label,
                direction: role.direction,
                kind: leg.kind,
                ratio: role.ratio,
                strike: leg.strike,
                premium: leg.premium,
            })
            .collect();

        Ok(Report {
            strategy: self.strategy,
            outlook: self.strategy.outlook(),
            legs: legs_report,
            net_premium: legs.net_premium(),
            break_even,
            summary,
            reward_to_risk: summary.as_ref().and_then(PayoffSummary::reward_to_risk),
            grid_points: grid.len(),
            strike_window: self
                .chain
                .as_ref()
                .map(|chain| StrikeWindow::from_chain(chain, config.chain.strike_window)),
            prices: self.include_curve.then(|| grid.prices().to_vec()),
            curve: self.include_curve.then_some(curve),
        })
    }
}
