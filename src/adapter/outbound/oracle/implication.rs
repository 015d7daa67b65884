//! Oracle for a chain of logically nested events.

use crate::error::{Result, SolverError};
use crate::port::outbound::oracle::Oracle;

/// Events where each one implies the previous: `x_0 >= x_1 >= ... >= x_{n-1}`.
///
/// Valid outcomes are the prefix indicators `[1, .., 1, 0, .., 0]`, including
/// the all-zero and all-one vectors. With two events these are
/// `[0,0]`, `[1,0]` and `[1,1]`: "B implies A".
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplicationOracle;

impl ImplicationOracle {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Oracle for ImplicationOracle {
    fn name(&self) -> &'static str {
        "implication"
    }

    fn solve(&self, gradient: &[f64]) -> Result<Vec<f64>> {
        if let Some(index) = gradient.iter().position(|g| !g.is_finite()) {
            return Err(SolverError::OracleFailed(format!(
                "non-finite gradient at index {index}"
            ))
            .into());
        }

        // Prefix length k has objective sum(gradient[..k]); shortest wins ties.
        let mut best_len = 0;
        let mut best_value = 0.0;
        let mut prefix = 0.0;
        for (i, g) in gradient.iter().enumerate() {
            prefix += g;
            if prefix < best_value {
                best_len = i + 1;
                best_value = prefix;
            }
        }

        let mut vertex = vec![0.0; gradient.len()];
        vertex[..best_len].fill(1.0);
        Ok(vertex)
    }
}
