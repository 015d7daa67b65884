//! Constrained nonlinear minimization port.
//!
//! The general convex projector hands its objective, analytic gradient,
//! coordinate bounds and constraint list to a [`SolverBackend`]. Which
//! backend runs is the caller's choice.

use crate::domain::constraint::{Constraint, VariableBounds};
use crate::error::Result;

/// Minimization problem handed to a backend.
///
/// ```text
/// minimize    objective(x)
/// subject to  residual_i(x) = 0   (equality constraints)
///             residual_j(x) >= 0  (inequality constraints)
///             lower <= x <= upper
/// ```
pub struct NonlinearProblem<'a> {
    pub objective: &'a (dyn Fn(&[f64]) -> f64 + Sync),
    pub gradient: &'a (dyn Fn(&[f64]) -> Vec<f64> + Sync),
    /// One entry per coordinate.
    pub bounds: &'a [VariableBounds],
    pub constraints: &'a [Constraint],
    /// Starting point; backends clamp it into the bounds.
    pub initial: &'a [f64],
}

impl NonlinearProblem<'_> {
    /// Number of decision variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.initial.len()
    }

    /// Largest constraint violation at `x`.
    #[must_use]
    pub fn max_violation(&self, x: &[f64]) -> f64 {
        self.constraints
            .iter()
            .map(|c| c.violation(x))
            .fold(0.0, f64::max)
    }
}

/// Candidate point returned by a backend.
#[derive(Debug, Clone)]
pub struct BackendSolution {
    pub point: Vec<f64>,
    /// False when the backend's tolerances were not met within its budget.
    pub success: bool,
    /// Total inner iterations performed.
    pub iterations: usize,
    /// Largest constraint violation at `point`.
    pub max_violation: f64,
}

/// Box-bounded constrained minimizer with analytic objective gradient.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
pub trait SolverBackend: Send + Sync {
    /// Return the backend name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Minimize the problem and report whether tolerances were met.
    ///
    /// Non-convergence is reported through [`BackendSolution::success`], not
    /// as an error.
    ///
    /// # Errors
    ///
    /// Returns an error only when the problem itself is malformed.
    fn minimize(&self, problem: &NonlinearProblem<'_>) -> Result<BackendSolution>;
}
