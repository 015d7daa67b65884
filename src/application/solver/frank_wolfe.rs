//! Frank-Wolfe algorithm for Bregman projection.
//!
//! The Frank-Wolfe (conditional gradient) algorithm solves:
//!
//! ```text
//! min_{mu in M} D(mu || theta)
//! ```
//!
//! where D is the Bregman divergence and M is the marginal polytope (the set
//! of coherent price vectors for the market).
//!
//! Instead of computing a full projection, it uses a linear minimization
//! oracle to iteratively improve the solution, making it practical for
//! polytopes described only through an integer program.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::bregman::KlDivergence;
use super::line_search::LineSearch;
use crate::domain::price::{self, DEFAULT_EPSILON};
use crate::domain::result::{IterationRecord, OptimizationResult, SolveStatus};
use crate::error::{Result, SolverError};
use crate::port::outbound::oracle::Oracle;

/// Configuration for the Frank-Wolfe algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrankWolfeConfig {
    /// Maximum number of iterations before terminating.
    pub max_iterations: usize,
    /// Convergence threshold for the duality gap.
    pub convergence_threshold: f64,
    /// Clipping floor for the divergence and its gradient.
    pub epsilon: f64,
    /// Step-size search along each segment.
    pub line_search: LineSearch,
}

impl Default for FrankWolfeConfig {
    fn default() -> Self {
        Self {
            max_iterations: 150,
            convergence_threshold: 1e-6,
            epsilon: DEFAULT_EPSILON,
            line_search: LineSearch::default(),
        }
    }
}

/// Frank-Wolfe algorithm implementation.
///
/// Stateless between calls: every [`solve`](Self::solve) builds its own
/// iterate and history, so one instance can serve concurrent solves.
#[derive(Debug, Clone, Default)]
pub struct FrankWolfe {
    config: FrankWolfeConfig,
}

impl FrankWolfe {
    /// Create a new Frank-Wolfe instance with the given configuration.
    #[must_use]
    pub const fn new(config: FrankWolfeConfig) -> Self {
        Self { config }
    }

    /// Return the current configuration.
    #[must_use]
    pub const fn config(&self) -> &FrankWolfeConfig {
        &self.config
    }

    /// Project `theta` onto the polytope behind `oracle`.
    ///
    /// Starts from `initial` when supplied, otherwise from the uniform
    /// distribution. Oracle failures end the run with
    /// [`SolveStatus::OracleFailed`] and the best iterate so far; exhausting
    /// the iteration budget ends it with [`SolveStatus::MaxIterationsExceeded`].
    /// Neither is an error: callers must check `converged`.
    ///
    /// # Errors
    ///
    /// Returns an error only for invalid inputs: empty or non-finite `theta`,
    /// or an `initial` point of the wrong length.
    pub fn solve(
        &self,
        theta: &[f64],
        oracle: &dyn Oracle,
        initial: Option<&[f64]>,
    ) -> Result<OptimizationResult> {
        price::validate(theta)?;
        let mut mu = match initial {
            Some(start) => {
                price::validate_pair(start, theta)?;
                start.to_vec()
            }
            None => price::uniform(theta.len()),
        };

        let started = Instant::now();
        let kl = KlDivergence::new(self.config.epsilon);
        let mut objective = kl.value_unchecked(&mu, theta);
        let mut history = Vec::with_capacity(self.config.max_iterations.min(1024));
        let mut status = SolveStatus::MaxIterationsExceeded;

        for iteration in 0..self.config.max_iterations {
            // ====================================================================
            // STEP 1: Gradient at the current iterate
            // ====================================================================
            // The exact derivative of D(mu || theta) is ln(mu/theta) + 1. The
            // constant drops out of the oracle argmin whenever all vertices
            // carry the same mass, and keeps the gap certified when they don't.
            let grad = kl.objective_gradient_unchecked(&mu, theta);

            // ====================================================================
            // STEP 2: Linear minimization oracle
            // ====================================================================
            let vertex = match solve_oracle(oracle, &grad) {
                Ok(vertex) => vertex,
                Err(err) => {
                    warn!(
                        oracle = oracle.name(),
                        iteration,
                        error = %err,
                        "oracle failed; returning best iterate"
                    );
                    status = SolveStatus::OracleFailed;
                    break;
                }
            };

            // ====================================================================
            // STEP 3: Line search along the segment mu -> vertex
            // ====================================================================
            // gamma = 0 is always a candidate, so the objective never increases
            // and the current iterate is always the best one seen.
            let (step, next_objective) = self.config.line_search.search(|gamma| {
                kl.value_unchecked(&price::interpolate(&mu, &vertex, gamma), theta)
            });

            // ====================================================================
            // STEP 4-5: Update and duality gap
            // ====================================================================
            // The Frank-Wolfe gap <grad, mu - s> bounds the suboptimality of mu_k.
            let gap: f64 = grad
                .iter()
                .zip(mu.iter().zip(&vertex))
                .map(|(g, (m, z))| g * (m - z))
                .sum();

            mu = price::interpolate(&mu, &vertex, step);
            objective = next_objective;

            history.push(IterationRecord {
                iteration,
                gap,
                objective,
                step,
                elapsed: started.elapsed(),
            });
            debug!(iteration, gap, objective, step, "frank-wolfe step");

            // ====================================================================
            // STEP 6: Convergence
            // ====================================================================
            if gap < self.config.convergence_threshold {
                status = SolveStatus::Converged;
                break;
            }
        }

        let converged = status == SolveStatus::Converged;
        let iterations = history.len();
        let elapsed = started.elapsed();
        if converged {
            info!(
                oracle = oracle.name(),
                iterations,
                objective,
                elapsed_ms = elapsed.as_millis() as u64,
                "frank-wolfe converged"
            );
        } else if status == SolveStatus::MaxIterationsExceeded {
            warn!(
                oracle = oracle.name(),
                iterations,
                gap = history.last().map(|r| r.gap),
                "frank-wolfe hit iteration limit before convergence"
            );
        }

        Ok(OptimizationResult {
            mu,
            objective,
            iterations,
            history,
            converged,
            status,
            elapsed,
        })
    }
}

/// Call the oracle and enforce its dimension contract.
fn solve_oracle(oracle: &dyn Oracle, gradient: &[f64]) -> Result<Vec<f64>> {
    let vertex = oracle.solve(gradient)?;
    if vertex.len() != gradient.len() {
        return Err(SolverError::OracleDimension {
            expected: gradient.len(),
            actual: vertex.len(),
        }
        .into());
    }
    if vertex.iter().any(|v| !v.is_finite()) {
        return Err(SolverError::OracleFailed("vertex has non-finite coordinates".into()).into());
    }
    Ok(vertex)
}
