//! Trade translation for LMSR markets.
//!
//! Turns a projection `(mu*, theta)` into a per-outcome direction
//! `ln(mu*/theta)` and, for a market maker with liquidity `b`, the share
//! adjustment `b * ln(mu*/theta)` that moves the quoted prices to `mu*`.
//!
//! - Cost function: `C(q) = b * ln(sum(exp(q_i/b)))`
//! - Prices: `P_i = exp(q_i/b) / sum_k(exp(q_k/b))`

use rust_decimal::Decimal;

use super::solver::bregman::KlDivergence;
use crate::domain::price::{self, DEFAULT_EPSILON};
use crate::domain::trade::TradePlan;
use crate::error::{ProjectionError, Result};

/// Direction `ln(mu*/theta)` per outcome; positive means buy.
///
/// # Errors
///
/// Returns an error if either vector is empty, non-finite, or the lengths differ.
pub fn trading_direction(mu_star: &[f64], theta: &[f64]) -> Result<Vec<f64>> {
    KlDivergence::default().gradient(mu_star, theta)
}

/// Share adjustment `b * ln(mu*/theta)` per outcome.
///
/// # Errors
///
/// Returns an error for invalid vectors or a non-positive liquidity parameter.
pub fn position_size(mu_star: &[f64], theta: &[f64], liquidity: f64) -> Result<Vec<f64>> {
    validate_liquidity(liquidity)?;
    let direction = trading_direction(mu_star, theta)?;
    Ok(direction.into_iter().map(|d| liquidity * d).collect())
}

/// Position sizes rounded into a [`TradePlan`].
///
/// # Errors
///
/// Returns an error for invalid vectors or a non-positive liquidity parameter.
pub fn plan(mu_star: &[f64], theta: &[f64], liquidity: f64, min_shares: Decimal) -> Result<TradePlan> {
    let sizes = position_size(mu_star, theta, liquidity)?;
    Ok(TradePlan::from_sizes(&sizes, min_shares))
}

/// Compute the LMSR cost function `C(q)`.
///
/// Uses the log-sum-exp shift so large quantities do not overflow.
///
/// # Errors
///
/// Returns an error for an empty or non-finite `q` or a non-positive `b`.
pub fn lmsr_cost(q: &[f64], liquidity: f64) -> Result<f64> {
    price::validate(q)?;
    validate_liquidity(liquidity)?;
    let scaled: Vec<f64> = q.iter().map(|qi| qi / liquidity).collect();
    let max = scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sum_exp: f64 = scaled.iter().map(|s| (s - max).exp()).sum();
    Ok(liquidity * (max + sum_exp.ln()))
}

/// Compute LMSR prices from quantities. Prices always sum to 1.
///
/// # Errors
///
/// Returns an error for an empty or non-finite `q` or a non-positive `b`.
pub fn lmsr_prices(q: &[f64], liquidity: f64) -> Result<Vec<f64>> {
    price::validate(q)?;
    validate_liquidity(liquidity)?;
    let scaled: Vec<f64> = q.iter().map(|qi| qi / liquidity).collect();
    let max = scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scaled.iter().map(|s| (s - max).exp()).collect();
    let sum_exp: f64 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / sum_exp).collect())
}

/// Cost of buying `sizes` from a market maker currently quoting `theta`.
///
/// The market state is reconstructed as `q_i = b * ln(theta_i)`, so the
/// result is `C(q + sizes) - C(q)`.
///
/// # Errors
///
/// Returns an error for invalid vectors or a non-positive liquidity parameter.
pub fn trade_cost(theta: &[f64], sizes: &[f64], liquidity: f64) -> Result<f64> {
    price::validate_pair(sizes, theta)?;
    validate_liquidity(liquidity)?;
    let q: Vec<f64> = theta
        .iter()
        .map(|t| liquidity * price::clip(*t, DEFAULT_EPSILON).ln())
        .collect();
    let after: Vec<f64> = q.iter().zip(sizes).map(|(qi, s)| qi + s).collect();
    Ok(lmsr_cost(&after, liquidity)? - lmsr_cost(&q, liquidity)?)
}

fn validate_liquidity(liquidity: f64) -> Result<()> {
    if !(liquidity.is_finite() && liquidity > 0.0) {
        return Err(ProjectionError::InvalidLiquidity(liquidity).into());
    }
    Ok(())
}
