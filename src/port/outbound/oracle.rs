//! Linear minimization oracle port.
//!
//! Frank-Wolfe never sees the feasible polytope directly. It only asks an
//! [`Oracle`] for the vertex minimizing a linear functional:
//!
//! ```text
//! z = argmin_{z in Z} gradient . z
//! ```
//!
//! For a single mutually exclusive market this has a closed form; for a
//! combinatorial market it is an integer program.

use crate::error::Result;

/// Linear minimization oracle over a polytope.
///
/// # Contract
///
/// - Deterministic: the same gradient must yield the same vertex, otherwise
///   convergence traces are not reproducible.
/// - The returned vertex has the same dimension as the gradient.
/// - Errors are caught by the caller and end the solve early; they are never
///   retried.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so independent projections can run
/// on separate threads with a shared oracle.
pub trait Oracle: Send + Sync {
    /// Return the oracle name for logging.
    fn name(&self) -> &'static str;

    /// Return the vertex minimizing `gradient . z`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex cannot be produced (e.g. the backing
    /// integer program is infeasible or the solver fails).
    fn solve(&self, gradient: &[f64]) -> Result<Vec<f64>>;
}

impl<T: Oracle + ?Sized> Oracle for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, gradient: &[f64]) -> Result<Vec<f64>> {
        (**self).solve(gradient)
    }
}

impl<T: Oracle + ?Sized> Oracle for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, gradient: &[f64]) -> Result<Vec<f64>> {
        (**self).solve(gradient)
    }
}

/// Oracle backed by a closure.
pub struct FnOracle<F> {
    name: &'static str,
    solve: F,
}

impl<F> FnOracle<F>
where
    F: Fn(&[f64]) -> Result<Vec<f64>> + Send + Sync,
{
    pub const fn new(name: &'static str, solve: F) -> Self {
        Self { name, solve }
    }
}

impl<F> Oracle for FnOracle<F>
where
    F: Fn(&[f64]) -> Result<Vec<f64>> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn solve(&self, gradient: &[f64]) -> Result<Vec<f64>> {
        (self.solve)(gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    #[test]
    fn fn_oracle_delegates() {
        let oracle = FnOracle::new("first", |g: &[f64]| {
            let mut z = vec![0.0; g.len()];
            z[0] = 1.0;
            Ok(z)
        });
        assert_eq!(oracle.name(), "first");
        assert_eq!(oracle.solve(&[0.3, 0.1]).unwrap(), vec![1.0, 0.0]);
    }

    #[test]
    fn fn_oracle_propagates_errors() {
        let oracle = FnOracle::new("broken", |_: &[f64]| {
            Err(SolverError::OracleFailed("no vertex".into()).into())
        });
        assert!(oracle.solve(&[0.0]).is_err());
    }
}
