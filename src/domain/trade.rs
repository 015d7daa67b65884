//! Trade plans derived from a projection.
//!
//! A [`TradePlan`] is the actionable form of a position-size vector: one
//! [`TradeLeg`] per outcome whose adjustment is large enough to place.
//!
//! # Examples
//!
//! ```
//! use cohere::domain::trade::{Side, TradePlan};
//! use rust_decimal::Decimal;
//!
//! let plan = TradePlan::from_sizes(&[-9.53, 4.2, 0.001], Decimal::new(1, 2));
//!
//! assert_eq!(plan.legs().len(), 2);
//! assert_eq!(plan.legs()[0].side, Side::Sell);
//! assert_eq!(plan.legs()[1].side, Side::Buy);
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Share precision used when rounding sizes.
pub const SHARE_DECIMALS: u32 = 2;

/// Direction of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Increase exposure to the outcome.
    Buy,
    /// Reduce exposure to the outcome.
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => f.write_str("buy"),
            Self::Sell => f.write_str("sell"),
        }
    }
}

/// A single outcome adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeLeg {
    /// Index of the outcome in the price vector.
    pub outcome: usize,
    pub side: Side,
    /// Unsigned share count, rounded to [`SHARE_DECIMALS`].
    pub shares: Decimal,
}

/// Legs to move a market from its prices toward the projected prices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradePlan {
    legs: Vec<TradeLeg>,
}

impl TradePlan {
    /// Build a plan from signed share adjustments.
    ///
    /// Legs whose rounded size is below `min_shares` are dropped, as are
    /// non-finite sizes.
    #[must_use]
    pub fn from_sizes(sizes: &[f64], min_shares: Decimal) -> Self {
        let legs = sizes
            .iter()
            .enumerate()
            .filter_map(|(outcome, size)| {
                let shares = Decimal::from_f64(size.abs())?.round_dp(SHARE_DECIMALS);
                if shares.is_zero() || shares < min_shares {
                    return None;
                }
                let side = if *size > 0.0 { Side::Buy } else { Side::Sell };
                Some(TradeLeg {
                    outcome,
                    side,
                    shares,
                })
            })
            .collect();
        Self { legs }
    }

    #[must_use]
    pub fn legs(&self) -> &[TradeLeg] {
        &self.legs
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Leg for a given outcome, if one was placed.
    #[must_use]
    pub fn leg(&self, outcome: usize) -> Option<&TradeLeg> {
        self.legs.iter().find(|leg| leg.outcome == outcome)
    }

    /// Total shares bought across all legs.
    #[must_use]
    pub fn shares_bought(&self) -> Decimal {
        self.total(Side::Buy)
    }

    /// Total shares sold across all legs.
    #[must_use]
    pub fn shares_sold(&self) -> Decimal {
        self.total(Side::Sell)
    }

    fn total(&self, side: Side) -> Decimal {
        self.legs
            .iter()
            .filter(|leg| leg.side == side)
            .map(|leg| leg.shares)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn from_sizes_rounds_and_signs() {
        let plan = TradePlan::from_sizes(&[-9.531, 4.2049, 0.0], dec!(0.01));

        assert_eq!(plan.legs().len(), 2);
        assert_eq!(
            plan.leg(0),
            Some(&TradeLeg {
                outcome: 0,
                side: Side::Sell,
                shares: dec!(9.53),
            })
        );
        assert_eq!(plan.leg(1).map(|l| l.shares), Some(dec!(4.20)));
        assert!(plan.leg(2).is_none());
    }

    #[test]
    fn from_sizes_drops_dust_and_nan() {
        let plan = TradePlan::from_sizes(&[0.004, f64::NAN, 2.0], dec!(0.5));
        assert_eq!(plan.legs().len(), 1);
        assert_eq!(plan.legs()[0].outcome, 2);
    }

    #[test]
    fn totals_by_side() {
        let plan = TradePlan::from_sizes(&[1.5, -2.25, 3.0], Decimal::ZERO);
        assert_eq!(plan.shares_bought(), dec!(4.5));
        assert_eq!(plan.shares_sold(), dec!(2.25));
    }

    #[test]
    fn empty_plan() {
        let plan = TradePlan::from_sizes(&[], Decimal::ZERO);
        assert!(plan.is_empty());
        assert_eq!(plan.shares_bought(), Decimal::ZERO);
    }
}
