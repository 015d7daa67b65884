//! Bregman projection onto a convex set given by constraint functions.
//!
//! Minimizes `D(mu || theta)` subject to arbitrary equality/inequality
//! constraints by delegating to an injected [`SolverBackend`]. Each
//! coordinate is bounded to `[epsilon, 1 - epsilon]` so the objective stays
//! defined.

use std::sync::Arc;

use tracing::{debug, warn};

use super::bregman::KlDivergence;
use super::closed_form;
use crate::domain::constraint::{Constraint, VariableBounds};
use crate::domain::price;
use crate::domain::result::{Projection, ProjectionMethod};
use crate::error::Result;
use crate::port::outbound::backend::{NonlinearProblem, SolverBackend};

/// General convex projector backed by a nonlinear solver.
#[derive(Clone)]
pub struct GeneralProjector {
    backend: Arc<dyn SolverBackend>,
    divergence: KlDivergence,
}

impl GeneralProjector {
    #[must_use]
    pub fn new(backend: Arc<dyn SolverBackend>) -> Self {
        Self {
            backend,
            divergence: KlDivergence::default(),
        }
    }

    /// Override the clipping floor used by the objective and the bounds.
    #[must_use]
    pub fn with_divergence(mut self, divergence: KlDivergence) -> Self {
        self.divergence = divergence;
        self
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Project `theta` onto `{mu : constraints hold}`.
    ///
    /// Starts from `initial` if supplied, otherwise from the simplex
    /// projection of `theta`. When the backend misses its tolerance the
    /// returned projection has `certified == false` and a warning is logged;
    /// `mu` is then best-effort.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid inputs (empty, non-finite, mismatched
    /// lengths, zero mass without an initial guess) or a malformed problem.
    pub fn project(
        &self,
        theta: &[f64],
        constraints: &[Constraint],
        initial: Option<&[f64]>,
    ) -> Result<Projection> {
        price::validate(theta)?;
        let start = match initial {
            Some(guess) => {
                price::validate_pair(guess, theta)?;
                guess.to_vec()
            }
            None => closed_form::simplex(&self.divergence, theta)?.mu,
        };

        let kl = self.divergence;
        let objective = |mu: &[f64]| kl.value_unchecked(mu, theta);
        let gradient = |mu: &[f64]| kl.objective_gradient_unchecked(mu, theta);
        let bounds = vec![VariableBounds::interior(kl.epsilon()); theta.len()];

        let problem = NonlinearProblem {
            objective: &objective,
            gradient: &gradient,
            bounds: &bounds,
            constraints,
            initial: &start,
        };
        let solution = self.backend.minimize(&problem)?;

        if solution.success {
            debug!(
                backend = self.backend.name(),
                iterations = solution.iterations,
                "general projection converged"
            );
        } else {
            warn!(
                backend = self.backend.name(),
                iterations = solution.iterations,
                max_violation = solution.max_violation,
                "general projection did not converge; result is best-effort"
            );
        }

        let profit = kl.value_unchecked(theta, &solution.point);
        Ok(Projection {
            mu: solution.point,
            profit,
            certified: solution.success,
            method: ProjectionMethod::General,
            solve: None,
            epsilons: None,
        })
    }
}
