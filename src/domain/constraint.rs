//! Constraint types for feasible price sets.
//!
//! Two representations live here:
//!
//! - [`LinearConstraint`]: `sum(coeffs[i] * x[i]) {>=, <=, =} rhs`, understood by
//!   the mixed-integer oracle and convertible into a residual constraint.
//! - [`Constraint`]: an arbitrary residual function tagged equality or
//!   inequality, consumed by the general convex projector.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Residual function `r(x)` evaluated at a candidate point.
pub type ResidualFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Gradient of a residual function.
pub type ResidualGradientFn = Arc<dyn Fn(&[f64]) -> Vec<f64> + Send + Sync>;

/// A single linear constraint: `sum(coeffs[i] * x[i]) {>=, <=, =} rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Coefficients for each variable.
    pub coefficients: Vec<f64>,
    /// Constraint sense (>=, <=, =).
    pub sense: ConstraintSense,
    /// Right-hand side value.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Create a >= constraint.
    #[must_use]
    pub const fn geq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    /// Create a <= constraint.
    #[must_use]
    pub const fn leq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// Create an = constraint.
    #[must_use]
    pub const fn eq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }

    /// `sum(x) = 1` over `n` variables.
    #[must_use]
    pub fn sum_to_one(n: usize) -> Self {
        Self::eq(vec![1.0; n], 1.0)
    }

    /// `x[if_index] >= x[then_index]`: the event at `then_index` implies the
    /// event at `if_index`.
    #[must_use]
    pub fn implies(n: usize, then_index: usize, if_index: usize) -> Self {
        let mut coefficients = vec![0.0; n];
        coefficients[if_index] = 1.0;
        coefficients[then_index] -= 1.0;
        Self::geq(coefficients, 0.0)
    }

    /// Left-hand side `sum(coeffs[i] * x[i])`.
    #[must_use]
    pub fn lhs(&self, x: &[f64]) -> f64 {
        self.coefficients.iter().zip(x).map(|(c, v)| c * v).sum()
    }

    /// Convert into a residual constraint with an analytic gradient.
    ///
    /// Inequalities are oriented so that a feasible point has a non-negative
    /// residual.
    #[must_use]
    pub fn to_residual(&self) -> Constraint {
        let (sign, kind) = match self.sense {
            ConstraintSense::Equal => (1.0, ConstraintKind::Equality),
            ConstraintSense::GreaterEqual => (1.0, ConstraintKind::Inequality),
            ConstraintSense::LessEqual => (-1.0, ConstraintKind::Inequality),
        };
        let linear = self.clone();
        let gradient: Vec<f64> = self.coefficients.iter().map(|c| sign * c).collect();
        Constraint {
            kind,
            residual: Arc::new(move |x: &[f64]| sign * (linear.lhs(x) - linear.rhs)),
            gradient: Some(Arc::new(move |_: &[f64]| gradient.clone())),
        }
    }
}

/// Constraint sense (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    /// Greater than or equal (>=).
    GreaterEqual,
    /// Less than or equal (<=).
    LessEqual,
    /// Equal (=).
    Equal,
}

/// Bounds on a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBounds {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl VariableBounds {
    /// Binary variable bounds [0, 1].
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }

    /// Bounds `[epsilon, 1 - epsilon]` keeping a probability off the boundary.
    #[must_use]
    pub fn interior(epsilon: f64) -> Self {
        Self {
            lower: epsilon,
            upper: 1.0 - epsilon,
        }
    }

    /// Clamp a value into these bounds.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.lower).min(self.upper)
    }
}

/// Whether a residual must vanish or stay non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// `r(x) = 0`.
    Equality,
    /// `r(x) >= 0`.
    Inequality,
}

/// A general constraint on the projected point.
#[derive(Clone)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub residual: ResidualFn,
    /// Analytic gradient; backends fall back to finite differences without it.
    pub gradient: Option<ResidualGradientFn>,
}

impl Constraint {
    /// Equality constraint `residual(x) = 0`.
    pub fn equality<F>(residual: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            kind: ConstraintKind::Equality,
            residual: Arc::new(residual),
            gradient: None,
        }
    }

    /// Inequality constraint `residual(x) >= 0`.
    pub fn inequality<F>(residual: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            kind: ConstraintKind::Inequality,
            residual: Arc::new(residual),
            gradient: None,
        }
    }

    /// Attach an analytic gradient.
    #[must_use]
    pub fn with_gradient<G>(mut self, gradient: G) -> Self
    where
        G: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        self.gradient = Some(Arc::new(gradient));
        self
    }

    /// Evaluate the residual.
    #[must_use]
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        (self.residual)(x)
    }

    /// Amount by which `x` violates this constraint (zero when satisfied).
    #[must_use]
    pub fn violation(&self, x: &[f64]) -> f64 {
        let r = self.evaluate(x);
        match self.kind {
            ConstraintKind::Equality => r.abs(),
            ConstraintKind::Inequality => (-r).max(0.0),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("kind", &self.kind)
            .field("analytic_gradient", &self.gradient.is_some())
            .finish()
    }
}

impl From<LinearConstraint> for Constraint {
    fn from(linear: LinearConstraint) -> Self {
        linear.to_residual()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_leq_residual_is_non_negative_when_satisfied() {
        let c = LinearConstraint::leq(vec![1.0, 1.0], 1.0).to_residual();
        assert_eq!(c.kind, ConstraintKind::Inequality);
        assert!((c.evaluate(&[0.3, 0.2]) - 0.5).abs() < 1e-12);
        assert_eq!(c.violation(&[0.3, 0.2]), 0.0);
        assert!((c.violation(&[0.8, 0.4]) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn implies_orders_the_pair() {
        let c = LinearConstraint::implies(2, 1, 0);
        assert_eq!(c.coefficients, vec![1.0, -1.0]);
        let r = c.to_residual();
        assert_eq!(r.violation(&[0.6, 0.4]), 0.0);
        assert!(r.violation(&[0.4, 0.6]) > 0.0);
        let grad = r.gradient.as_ref().map(|g| g(&[0.0, 0.0]));
        assert_eq!(grad, Some(vec![1.0, -1.0]));
    }

    #[test]
    fn equality_violation_is_absolute() {
        let c = Constraint::equality(|x: &[f64]| x.iter().sum::<f64>() - 1.0);
        assert!((c.violation(&[0.5, 0.7]) - 0.2).abs() < 1e-12);
        assert!((c.violation(&[0.5, 0.3]) - 0.2).abs() < 1e-12);
        assert!(c.gradient.is_none());
    }

    #[test]
    fn interior_bounds_clamp() {
        let b = VariableBounds::interior(1e-10);
        assert_eq!(b.clamp(0.0), 1e-10);
        assert_eq!(b.clamp(1.0), 1.0 - 1e-10);
        assert_eq!(b.clamp(0.4), 0.4);
    }
}
