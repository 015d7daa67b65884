//! Bregman divergence for LMSR.
//!
//! For the Logarithmic Market Scoring Rule (LMSR):
//!
//! - Cost function: `C(q) = b * log(sum(exp(q_i/b)))`
//! - Conjugate: `R(mu) = sum(mu_i * ln(mu_i))` (negative entropy)
//! - Bregman divergence: `D(mu||theta) = sum(mu_i * ln(mu_i/theta_i))`
//!
//! Both arguments are clipped element-wise into `[epsilon, 1]` before any
//! logarithm is taken, so prices of exactly 0 or 1 are safe.

use crate::domain::price::{self, clip, DEFAULT_EPSILON};
use crate::error::Result;

/// KL divergence with a configurable clipping floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KlDivergence {
    epsilon: f64,
}

impl Default for KlDivergence {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl KlDivergence {
    #[must_use]
    pub const fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// `D(mu||theta) = sum(mu_i * ln(mu_i/theta_i))`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is empty, non-finite, or the lengths differ.
    pub fn value(&self, mu: &[f64], theta: &[f64]) -> Result<f64> {
        price::validate_pair(mu, theta)?;
        Ok(self.value_unchecked(mu, theta))
    }

    /// Element-wise `ln(mu_i/theta_i)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is empty, non-finite, or the lengths differ.
    pub fn gradient(&self, mu: &[f64], theta: &[f64]) -> Result<Vec<f64>> {
        price::validate_pair(mu, theta)?;
        Ok(self.gradient_unchecked(mu, theta))
    }

    /// Exact derivative of [`value`](Self::value): `ln(mu_i/theta_i) + 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is empty, non-finite, or the lengths differ.
    pub fn objective_gradient(&self, mu: &[f64], theta: &[f64]) -> Result<Vec<f64>> {
        price::validate_pair(mu, theta)?;
        Ok(self.objective_gradient_unchecked(mu, theta))
    }

    // Callers inside the solver validate lengths once up front.
    pub(crate) fn value_unchecked(&self, mu: &[f64], theta: &[f64]) -> f64 {
        mu.iter()
            .zip(theta)
            .map(|(m, t)| {
                let m = clip(*m, self.epsilon);
                let t = clip(*t, self.epsilon);
                m * (m.ln() - t.ln())
            })
            .sum()
    }

    pub(crate) fn gradient_unchecked(&self, mu: &[f64], theta: &[f64]) -> Vec<f64> {
        mu.iter()
            .zip(theta)
            .map(|(m, t)| clip(*m, self.epsilon).ln() - clip(*t, self.epsilon).ln())
            .collect()
    }

    pub(crate) fn objective_gradient_unchecked(&self, mu: &[f64], theta: &[f64]) -> Vec<f64> {
        let mut grad = self.gradient_unchecked(mu, theta);
        for g in &mut grad {
            *g += 1.0;
        }
        grad
    }
}

/// `D(mu||theta)` with the default clipping floor.
///
/// Not symmetric: `divergence(mu, theta) != divergence(theta, mu)` in general.
///
/// # Errors
///
/// Returns an error if either vector is empty, non-finite, or the lengths differ.
pub fn divergence(mu: &[f64], theta: &[f64]) -> Result<f64> {
    KlDivergence::default().value(mu, theta)
}

/// `ln(mu/theta)` element-wise with the default clipping floor.
///
/// # Errors
///
/// Returns an error if either vector is empty, non-finite, or the lengths differ.
pub fn gradient(mu: &[f64], theta: &[f64]) -> Result<Vec<f64>> {
    KlDivergence::default().gradient(mu, theta)
}
