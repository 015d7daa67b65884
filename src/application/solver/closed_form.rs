//! Closed-form Bregman projections for simple feasible sets.
//!
//! - Simplex: `mu* = theta / sum(theta)`
//! - Box: `mu*_i = clip(theta_i, lower_i, upper_i)`
//!
//! Both are exact and O(n). Profit is reported as `D(theta || mu*)`, the cost
//! of having been away from the feasible set, with the original prices as
//! the first argument.

use tracing::debug;

use super::bregman::KlDivergence;
use crate::domain::price;
use crate::domain::result::{Projection, ProjectionMethod};
use crate::error::{ProjectionError, Result};

/// Project onto the probability simplex by renormalization.
///
/// # Errors
///
/// Returns an error if `theta` is empty, non-finite, or has zero total mass.
pub fn project_simplex(theta: &[f64]) -> Result<Projection> {
    simplex(&KlDivergence::default(), theta)
}

/// Project onto the box `lower <= mu <= upper` by clipping.
///
/// # Errors
///
/// Returns an error if the vectors differ in length, contain non-finite
/// values, or any `lower_i > upper_i`.
pub fn project_box(theta: &[f64], lower: &[f64], upper: &[f64]) -> Result<Projection> {
    boxed(&KlDivergence::default(), theta, lower, upper)
}

pub(crate) fn simplex(kl: &KlDivergence, theta: &[f64]) -> Result<Projection> {
    price::validate(theta)?;
    let total = price::mass(theta);
    if total == 0.0 {
        return Err(ProjectionError::ZeroMass.into());
    }

    let mu: Vec<f64> = theta.iter().map(|t| t / total).collect();
    let profit = kl.value_unchecked(theta, &mu);
    debug!(total, profit, "simplex projection");

    Ok(Projection {
        mu,
        profit,
        certified: true,
        method: ProjectionMethod::Simplex,
        solve: None,
        epsilons: None,
    })
}

pub(crate) fn boxed(
    kl: &KlDivergence,
    theta: &[f64],
    lower: &[f64],
    upper: &[f64],
) -> Result<Projection> {
    price::validate(theta)?;
    price::ensure_same_len(theta, lower)?;
    price::ensure_same_len(theta, upper)?;
    price::validate(lower)?;
    price::validate(upper)?;
    if let Some(index) = lower.iter().zip(upper).position(|(l, u)| l > u) {
        return Err(ProjectionError::InvalidBounds {
            index,
            lower: lower[index],
            upper: upper[index],
        }
        .into());
    }

    let mu: Vec<f64> = theta
        .iter()
        .zip(lower.iter().zip(upper))
        .map(|(t, (l, u))| t.clamp(*l, *u))
        .collect();
    let profit = kl.value_unchecked(theta, &mu);
    debug!(profit, "box projection");

    Ok(Projection {
        mu,
        profit,
        certified: true,
        method: ProjectionMethod::Box,
        solve: None,
        epsilons: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn simplex_renormalizes() {
        let projection = project_simplex(&[0.35, 0.40, 0.35]).unwrap();
        let sum: f64 = projection.mu.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((projection.mu[0] - 0.35 / 1.1).abs() < 1e-12);
        assert!((projection.mu[1] - 0.40 / 1.1).abs() < 1e-12);
        // D(theta || theta / S) = S ln S
        assert!((projection.profit - 1.1 * 1.1_f64.ln()).abs() < 1e-9);
        assert_eq!(projection.method, ProjectionMethod::Simplex);
    }

    #[test]
    fn simplex_rejects_zero_mass() {
        let err = project_simplex(&[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, Error::Projection(ProjectionError::ZeroMass)));
    }

    #[test]
    fn simplex_of_coherent_prices_is_identity() {
        let projection = project_simplex(&[0.25, 0.75]).unwrap();
        assert_eq!(projection.mu, vec![0.25, 0.75]);
        assert!(projection.profit.abs() < 1e-15);
    }

    #[test]
    fn box_clips() {
        let projection = project_box(&[0.05, 0.5, 0.99], &[0.1; 3], &[0.9; 3]).unwrap();
        assert_eq!(projection.mu, vec![0.1, 0.5, 0.9]);
        assert!(projection.profit.is_finite());
    }

    #[test]
    fn box_rejects_inverted_bounds() {
        let err = project_box(&[0.5, 0.5], &[0.0, 0.7], &[1.0, 0.6]).unwrap_err();
        assert!(matches!(
            err,
            Error::Projection(ProjectionError::InvalidBounds { index: 1, .. })
        ));
    }

    #[test]
    fn box_rejects_mismatched_bounds() {
        let err = project_box(&[0.5, 0.5], &[0.0], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::Projection(ProjectionError::DimensionMismatch { .. })
        ));
    }
}
