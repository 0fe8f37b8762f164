//! Hypothetical underlying prices at expiration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{GridConfig, MAX_GRID_POINTS};
use crate::error::PayoffError;

use super::strategy::MAX_PRICE;

/// Ordered underlying prices to evaluate a payoff on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceGrid {
    prices: Vec<Decimal>,
}

impl PriceGrid {
    /// Evenly spaced prices from `lower_factor * spot` to `upper_factor * spot`, inclusive.
    pub fn around(spot: Decimal, config: &GridConfig) -> Result<Self, PayoffError> {
        if spot <= Decimal::ZERO || spot > MAX_PRICE {
            return Err(PayoffError::invalid_grid(format!(
                "spot price {spot} must be positive and at most {MAX_PRICE}"
            )));
        }
        if !(2..=MAX_GRID_POINTS).contains(&config.points) {
            return Err(PayoffError::invalid_grid(format!(
                "need between 2 and {MAX_GRID_POINTS} points, got {}",
                config.points
            )));
        }

        let factor = |value: f64, name: &str| {
            Decimal::try_from(value)
                .map_err(|e| PayoffError::invalid_grid(format!("{name} {value}: {e}")))
        };
        let lower_factor = factor(config.lower_factor, "lower_factor")?;
        let upper_factor = factor(config.upper_factor, "upper_factor")?;
        if lower_factor <= Decimal::ZERO || lower_factor >= upper_factor {
            return Err(PayoffError::invalid_grid(format!(
                "factors must satisfy 0 < lower ({lower_factor}) < upper ({upper_factor})"
            )));
        }

        let upper = spot
            .checked_mul(upper_factor)
            .filter(|upper| *upper <= MAX_PRICE)
            .ok_or_else(|| {
                PayoffError::invalid_grid(format!(
                    "upper bound {spot} x {upper_factor} exceeds {MAX_PRICE}"
                ))
            })?;

        Ok(Self::linspace(spot * lower_factor, upper, config.points))
    }

    /// Evenly spaced prices between two bounds, inclusive. `points` must be at least 2.
    fn linspace(lower: Decimal, upper: Decimal, points: usize) -> Self {
        let intervals = Decimal::from(points - 1);
        let step = (upper - lower) / intervals;

        let mut prices: Vec<Decimal> = (0..points - 1)
            .map(|i| lower + step * Decimal::from(i))
            .collect();
        prices.push(upper);

        Self { prices }
    }

    /// Wrap caller-supplied prices unchanged.
    #[must_use]
    pub const fn from_prices(prices: Vec<Decimal>) -> Self {
        Self { prices }
    }

    /// Grid prices in order.
    #[must_use]
    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    /// Number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the grid has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl AsRef<[Decimal]> for PriceGrid {
    fn as_ref(&self) -> &[Decimal] {
        &self.prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rust_decimal_macros::dec;

    fn config(points: usize, lower_factor: f64, upper_factor: f64) -> GridConfig {
        GridConfig {
            points,
            lower_factor,
            upper_factor,
        }
    }

    #[test]
    fn test_around_spot() {
        let grid = PriceGrid::around(dec!(100), &config(5, 0.5, 1.5)).unwrap();
        assert_eq!(
            grid.prices(),
            &[dec!(50), dec!(75), dec!(100), dec!(125), dec!(150)]
        );
    }

    #[test]
    fn test_default_grid_endpoints() {
        let grid = PriceGrid::around(dec!(240), &GridConfig::default()).unwrap();

        assert_eq!(grid.len(), 10_000);
        assert_eq!(grid.prices()[0], dec!(120));
        assert_eq!(grid.prices()[grid.len() - 1], dec!(360));
        assert!(grid.prices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rejects_non_positive_spot() {
        let err = PriceGrid::around(Decimal::ZERO, &GridConfig::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidGrid);
    }

    #[test]
    fn test_rejects_single_point() {
        let err = PriceGrid::around(dec!(100), &config(1, 0.5, 1.5)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidGrid);
    }

    #[test]
    fn test_rejects_inverted_factors() {
        let err = PriceGrid::around(dec!(100), &config(10, 1.5, 0.5)).unwrap_err();
        assert!(err.to_string().contains("factors"));
    }

    #[test]
    fn test_rejects_nan_factor() {
        let err = PriceGrid::around(dec!(100), &config(10, f64::NAN, 1.5)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidGrid);
    }

    #[test]
    fn test_from_prices_keeps_order() {
        let grid = PriceGrid::from_prices(vec![dec!(3), dec!(1), dec!(2)]);
        assert_eq!(grid.as_ref(), &[dec!(3), dec!(1), dec!(2)]);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_rejects_out_of_range_bounds() {
        let err = PriceGrid::around(Decimal::MAX, &GridConfig::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidGrid);

        let err = PriceGrid::around(dec!(100), &config(10, 0.5, 1e27)).unwrap_err();
        assert!(err.to_string().contains("upper bound"));

        let err = PriceGrid::around(dec!(100), &config(usize::MAX, 0.5, 1.5)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidGrid);
    }
}
