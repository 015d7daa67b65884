//! Oracle for a single market with mutually exclusive outcomes.

use super::argmin;
use crate::error::{Result, SolverError};
use crate::port::outbound::oracle::Oracle;

/// Exactly one outcome resolves true: the vertices are the unit vectors.
///
/// The minimizing vertex is the indicator of the smallest gradient entry,
/// lowest index first on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExclusiveOracle;

impl ExclusiveOracle {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Oracle for ExclusiveOracle {
    fn name(&self) -> &'static str {
        "exclusive"
    }

    fn solve(&self, gradient: &[f64]) -> Result<Vec<f64>> {
        let index = argmin(gradient)
            .ok_or_else(|| SolverError::OracleFailed("no finite gradient entry".into()))?;
        let mut vertex = vec![0.0; gradient.len()];
        vertex[index] = 1.0;
        Ok(vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_smallest_entry() {
        let vertex = ExclusiveOracle.solve(&[0.2, -0.4, 0.1]).unwrap();
        assert_eq!(vertex, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn ties_go_to_first_outcome() {
        let vertex = ExclusiveOracle.solve(&[0.5, 0.5]).unwrap();
        assert_eq!(vertex, vec![1.0, 0.0]);
    }

    #[test]
    fn empty_gradient_fails() {
        assert!(ExclusiveOracle.solve(&[]).is_err());
    }
}
