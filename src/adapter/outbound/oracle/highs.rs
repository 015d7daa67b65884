//! Integer-program oracle backed by HiGHS via good_lp.
//!
//! For a combinatorial market the valid outcomes are the binary vectors
//! satisfying a set of linear constraints. The oracle solves
//!
//! ```text
//! minimize    gradient . z
//! subject to  constraints
//!             z in {0, 1}^n
//! ```

use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, variables, Expression, Solution, SolverModel};
use tracing::trace;

use crate::domain::constraint::{ConstraintSense, LinearConstraint};
use crate::error::{Result, SolverError};
use crate::port::outbound::oracle::Oracle;

/// HiGHS-backed oracle over the binary outcome vectors of a market.
#[derive(Debug, Clone)]
pub struct MipOracle {
    num_vars: usize,
    constraints: Vec<LinearConstraint>,
}

impl MipOracle {
    /// Create an oracle over `num_vars` binary variables.
    #[must_use]
    pub fn new(num_vars: usize, constraints: Vec<LinearConstraint>) -> Self {
        Self {
            num_vars,
            constraints,
        }
    }

    /// Mutually exclusive outcomes: exactly one variable is 1.
    #[must_use]
    pub fn exclusive(num_vars: usize) -> Self {
        Self::new(num_vars, vec![LinearConstraint::sum_to_one(num_vars)])
    }

    #[must_use]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }
}

impl Oracle for MipOracle {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, gradient: &[f64]) -> Result<Vec<f64>> {
        if gradient.len() != self.num_vars {
            return Err(SolverError::OracleDimension {
                expected: self.num_vars,
                actual: gradient.len(),
            }
            .into());
        }
        solve_binary_program(gradient, &self.constraints)
    }
}

fn solve_binary_program(objective: &[f64], constraints: &[LinearConstraint]) -> Result<Vec<f64>> {
    let n = objective.len();
    if n == 0 {
        return Ok(vec![]);
    }

    let mut vars = variables!();
    let var_list: Vec<_> = (0..n)
        .map(|_| vars.add(variable().binary()))
        .collect();

    let cost: Expression = var_list
        .iter()
        .zip(objective)
        .map(|(v, c)| *c * *v)
        .sum();

    let mut model = vars.minimise(&cost).using(highs);

    for constr in constraints {
        if constr.coefficients.len() != n {
            return Err(SolverError::OracleDimension {
                expected: n,
                actual: constr.coefficients.len(),
            }
            .into());
        }
        let lhs: Expression = var_list
            .iter()
            .zip(&constr.coefficients)
            .map(|(v, c)| *c * *v)
            .sum();
        let rhs = constr.rhs;

        model = match constr.sense {
            ConstraintSense::GreaterEqual => model.with(constraint!(lhs >= rhs)),
            ConstraintSense::LessEqual => model.with(constraint!(lhs <= rhs)),
            ConstraintSense::Equal => model.with(constraint!(lhs == rhs)),
        };
    }

    let solution = model
        .solve()
        .map_err(|e| SolverError::OracleFailed(format!("highs: {e}")))?;

    // Snap to {0, 1}; HiGHS reports integers within its feasibility tolerance.
    let vertex: Vec<f64> = var_list
        .iter()
        .map(|v| solution.value(*v).round())
        .collect();
    trace!(?vertex, "highs vertex");
    Ok(vertex)
}
