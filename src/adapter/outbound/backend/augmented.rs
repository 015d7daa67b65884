//! Augmented-Lagrangian backend for box-bounded constrained minimization.
//!
//! Outer loop: multiplier updates on the augmented Lagrangian
//!
//! ```text
//! L(x) = f(x)
//!      + sum_eq   [ lambda_i * h_i(x) + rho/2 * h_i(x)^2 ]
//!      + sum_ineq [ (max(0, nu_j - rho * g_j(x))^2 - nu_j^2) / (2 rho) ]
//! ```
//!
//! with `h_i(x) = 0` and `g_j(x) >= 0`. Inner loop: projected gradient
//! descent onto the coordinate box with Armijo backtracking.

use tracing::{debug, trace};

use crate::domain::constraint::{Constraint, ConstraintKind, VariableBounds};
use crate::error::{Result, SolverError};
use crate::port::outbound::backend::{BackendSolution, NonlinearProblem, SolverBackend};

const ARMIJO: f64 = 1e-4;
const MIN_STEP: f64 = 1e-16;
const MAX_PENALTY: f64 = 1e8;
const FINITE_DIFFERENCE_STEP: f64 = 1e-7;

/// Tuning for [`AugmentedLagrangianBackend`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AugmentedLagrangianConfig {
    /// Multiplier updates before giving up.
    pub max_outer_iterations: usize,
    /// Projected-gradient steps per multiplier update.
    pub max_inner_iterations: usize,
    /// Stationarity tolerance on the projected gradient.
    pub tolerance: f64,
    /// Feasibility tolerance on the largest constraint violation.
    pub constraint_tolerance: f64,
    /// Initial penalty weight.
    pub initial_penalty: f64,
}

impl Default for AugmentedLagrangianConfig {
    fn default() -> Self {
        Self {
            max_outer_iterations: 50,
            max_inner_iterations: 500,
            tolerance: 1e-8,
            constraint_tolerance: 1e-8,
            initial_penalty: 10.0,
        }
    }
}

/// Native constrained minimizer; no external solver library required.
#[derive(Debug, Clone, Default)]
pub struct AugmentedLagrangianBackend {
    config: AugmentedLagrangianConfig,
}

impl AugmentedLagrangianBackend {
    #[must_use]
    pub const fn new(config: AugmentedLagrangianConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &AugmentedLagrangianConfig {
        &self.config
    }
}

/// Multiplier state for one outer iteration.
struct Multipliers {
    equality: Vec<f64>,
    inequality: Vec<f64>,
    penalty: f64,
}

impl Multipliers {
    fn value(&self, problem: &NonlinearProblem<'_>, x: &[f64]) -> f64 {
        let mut value = (problem.objective)(x);
        let (mut eq, mut ineq) = (0, 0);
        for c in problem.constraints {
            let r = c.evaluate(x);
            match c.kind {
                ConstraintKind::Equality => {
                    value += self.equality[eq] * r + 0.5 * self.penalty * r * r;
                    eq += 1;
                }
                ConstraintKind::Inequality => {
                    let nu = self.inequality[ineq];
                    let shifted = (nu - self.penalty * r).max(0.0);
                    value += (shifted * shifted - nu * nu) / (2.0 * self.penalty);
                    ineq += 1;
                }
            }
        }
        value
    }

    fn gradient(&self, problem: &NonlinearProblem<'_>, x: &[f64]) -> Vec<f64> {
        let mut grad = (problem.gradient)(x);
        let (mut eq, mut ineq) = (0, 0);
        for c in problem.constraints {
            let r = c.evaluate(x);
            let weight = match c.kind {
                ConstraintKind::Equality => {
                    let w = self.equality[eq] + self.penalty * r;
                    eq += 1;
                    w
                }
                ConstraintKind::Inequality => {
                    let w = -(self.inequality[ineq] - self.penalty * r).max(0.0);
                    ineq += 1;
                    w
                }
            };
            if weight != 0.0 {
                for (g, d) in grad.iter_mut().zip(constraint_gradient(c, x)) {
                    *g += weight * d;
                }
            }
        }
        grad
    }

    fn update(&mut self, problem: &NonlinearProblem<'_>, x: &[f64]) {
        let (mut eq, mut ineq) = (0, 0);
        for c in problem.constraints {
            let r = c.evaluate(x);
            match c.kind {
                ConstraintKind::Equality => {
                    self.equality[eq] += self.penalty * r;
                    eq += 1;
                }
                ConstraintKind::Inequality => {
                    self.inequality[ineq] = (self.inequality[ineq] - self.penalty * r).max(0.0);
                    ineq += 1;
                }
            }
        }
    }
}

fn constraint_gradient(constraint: &Constraint, x: &[f64]) -> Vec<f64> {
    if let Some(gradient) = &constraint.gradient {
        return gradient(x);
    }
    // Central differences
    let mut probe = x.to_vec();
    (0..x.len())
        .map(|i| {
            let original = probe[i];
            probe[i] = original + FINITE_DIFFERENCE_STEP;
            let up = constraint.evaluate(&probe);
            probe[i] = original - FINITE_DIFFERENCE_STEP;
            let down = constraint.evaluate(&probe);
            probe[i] = original;
            (up - down) / (2.0 * FINITE_DIFFERENCE_STEP)
        })
        .collect()
}

fn project(x: &[f64], bounds: &[VariableBounds]) -> Vec<f64> {
    x.iter().zip(bounds).map(|(v, b)| b.clamp(*v)).collect()
}

impl AugmentedLagrangianBackend {
    /// Projected gradient descent on the augmented Lagrangian.
    ///
    /// Returns the number of steps taken and whether stationarity was reached.
    fn minimize_inner(
        &self,
        problem: &NonlinearProblem<'_>,
        multipliers: &Multipliers,
        x: &mut Vec<f64>,
    ) -> (usize, bool) {
        let mut step = 1.0_f64;
        for iteration in 0..self.config.max_inner_iterations {
            let grad = multipliers.gradient(problem, x);
            let value = multipliers.value(problem, x);

            let stationarity = x
                .iter()
                .zip(project(
                    &x.iter().zip(&grad).map(|(v, g)| v - g).collect::<Vec<_>>(),
                    problem.bounds,
                ))
                .map(|(v, p)| (v - p).abs())
                .fold(0.0, f64::max);
            if stationarity < self.config.tolerance {
                return (iteration, true);
            }

            let mut t = (step * 2.0).min(1.0);
            let candidate = loop {
                let trial: Vec<f64> = project(
                    &x.iter().zip(&grad).map(|(v, g)| v - t * g).collect::<Vec<_>>(),
                    problem.bounds,
                );
                let decrease: f64 = grad
                    .iter()
                    .zip(x.iter().zip(&trial))
                    .map(|(g, (v, tv))| g * (v - tv))
                    .sum();
                if multipliers.value(problem, &trial) <= value - ARMIJO * decrease || t < MIN_STEP
                {
                    break trial;
                }
                t *= 0.5;
            };
            step = t;
            *x = candidate;
        }
        (self.config.max_inner_iterations, false)
    }
}

impl SolverBackend for AugmentedLagrangianBackend {
    fn name(&self) -> &'static str {
        "augmented_lagrangian"
    }

    fn minimize(&self, problem: &NonlinearProblem<'_>) -> Result<BackendSolution> {
        let n = problem.num_vars();
        if problem.bounds.len() != n {
            return Err(SolverError::Backend(format!(
                "expected {n} bounds, got {}",
                problem.bounds.len()
            ))
            .into());
        }

        let equalities = problem
            .constraints
            .iter()
            .filter(|c| c.kind == ConstraintKind::Equality)
            .count();
        let mut multipliers = Multipliers {
            equality: vec![0.0; equalities],
            inequality: vec![0.0; problem.constraints.len() - equalities],
            penalty: self.config.initial_penalty,
        };

        let mut x = project(problem.initial, problem.bounds);
        let mut total_iterations = 0;
        let mut previous_violation = f64::INFINITY;

        for outer in 0..self.config.max_outer_iterations {
            let (steps, stationary) = self.minimize_inner(problem, &multipliers, &mut x);
            total_iterations += steps;

            let violation = problem.max_violation(&x);
            trace!(outer, steps, violation, penalty = multipliers.penalty, "outer iteration");
            if stationary && violation < self.config.constraint_tolerance {
                debug!(outer, total_iterations, "augmented lagrangian converged");
                return Ok(BackendSolution {
                    point: x,
                    success: true,
                    iterations: total_iterations,
                    max_violation: violation,
                });
            }

            multipliers.update(problem, &x);
            if violation > 0.25 * previous_violation {
                multipliers.penalty = (multipliers.penalty * 10.0).min(MAX_PENALTY);
            }
            previous_violation = violation;
        }

        let max_violation = problem.max_violation(&x);
        Ok(BackendSolution {
            point: x,
            success: false,
            iterations: total_iterations,
            max_violation,
        })
    }
}
