//! Payoff curve summary.

use rust_decimal::Decimal;
use serde::Serialize;

/// Extremes of an evaluated payoff curve.
///
/// Computed over the grid only; unbounded tails show up as the value at the
/// grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayoffSummary {
    /// Largest P/L on the grid.
    pub max_profit: Decimal,
    /// First grid price reaching `max_profit`.
    pub max_profit_price: Decimal,
    /// Smallest P/L on the grid.
    pub max_loss: Decimal,
    /// First grid price reaching `max_loss`.
    pub max_loss_price: Decimal,
}

impl PayoffSummary {
    /// Summarize a curve evaluated on `grid`.
    ///
    /// Returns `None` for an empty grid or when lengths differ.
    #[must_use]
    pub fn from_curve(grid: &[Decimal], curve: &[Decimal]) -> Option<Self> {
        if grid.len() != curve.len() {
            return None;
        }
        let mut points = grid.iter().copied().zip(curve.iter().copied());
        let (price, value) = points.next()?;

        let mut summary = Self {
            max_profit: value,
            max_profit_price: price,
            max_loss: value,
            max_loss_price: price,
        };
        for (price, value) in points {
            if value > summary.max_profit {
                summary.max_profit = value;
                summary.max_profit_price = price;
            }
            if value < summary.max_loss {
                summary.max_loss = value;
                summary.max_loss_price = price;
            }
        }
        Some(summary)
    }

    /// Max profit to max loss ratio, `None` when the curve never loses.
    #[must_use]
    pub fn reward_to_risk(&self) -> Option<Decimal> {
        (self.max_loss < Decimal::ZERO).then(|| self.max_profit / -self.max_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_curve() {
        let grid = [dec!(80), dec!(88), dec!(100), dec!(105), dec!(120)];
        let curve = [dec!(-3), dec!(0), dec!(2), dec!(2), dec!(-3)];
        let summary = PayoffSummary::from_curve(&grid, &curve).unwrap();

        assert_eq!(summary.max_profit, dec!(2));
        assert_eq!(summary.max_profit_price, dec!(100));
        assert_eq!(summary.max_loss, dec!(-3));
        assert_eq!(summary.max_loss_price, dec!(80));
        assert_eq!(summary.reward_to_risk(), Some(dec!(2) / dec!(3)));
    }

    #[test]
    fn test_never_losing_curve() {
        let summary = PayoffSummary::from_curve(&[dec!(1), dec!(2)], &[dec!(0), dec!(4)]).unwrap();
        assert_eq!(summary.reward_to_risk(), None);
    }

    #[test]
    fn test_empty_or_mismatched() {
        assert!(PayoffSummary::from_curve(&[], &[]).is_none());
        assert!(PayoffSummary::from_curve(&[dec!(1)], &[]).is_none());
    }
}
