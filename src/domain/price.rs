//! Price vector helpers shared by every projector.
//!
//! A price vector is a plain `[f64]` slice with one price per outcome. Raw
//! market prices are not required to sum to one: that deviation is the
//! mispricing being measured.

use crate::error::ProjectionError;

/// Default clipping floor keeping probabilities away from zero.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Reject empty vectors and non-finite coordinates.
pub fn validate(prices: &[f64]) -> Result<(), ProjectionError> {
    if prices.is_empty() {
        return Err(ProjectionError::Empty);
    }
    if let Some(index) = prices.iter().position(|p| !p.is_finite()) {
        return Err(ProjectionError::NonFinite { index });
    }
    Ok(())
}

/// Reject a pair of vectors whose lengths differ.
pub fn ensure_same_len(expected: &[f64], actual: &[f64]) -> Result<(), ProjectionError> {
    if expected.len() != actual.len() {
        return Err(ProjectionError::DimensionMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    Ok(())
}

/// Validate both vectors and require equal length.
pub fn validate_pair(mu: &[f64], theta: &[f64]) -> Result<(), ProjectionError> {
    validate(theta)?;
    ensure_same_len(theta, mu)?;
    validate(mu)
}

/// Clip a single probability into `[epsilon, 1]`.
#[inline]
#[must_use]
pub fn clip(value: f64, epsilon: f64) -> f64 {
    value.max(epsilon).min(1.0)
}

/// Uniform distribution over `n` outcomes.
#[must_use]
pub fn uniform(n: usize) -> Vec<f64> {
    vec![1.0 / n as f64; n]
}

/// Total mass `sum(prices)`.
#[must_use]
pub fn mass(prices: &[f64]) -> f64 {
    prices.iter().sum()
}

/// Inner product `a . b`.
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Convex combination `(1 - gamma) * from + gamma * to`.
#[must_use]
pub fn interpolate(from: &[f64], to: &[f64], gamma: f64) -> Vec<f64> {
    from.iter()
        .zip(to)
        .map(|(a, b)| (1.0 - gamma) * a + gamma * b)
        .collect()
}
