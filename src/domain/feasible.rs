//! Feasible sets of coherent prices.

use std::fmt;
use std::sync::Arc;

use super::constraint::Constraint;
use crate::port::outbound::oracle::Oracle;

/// Representation of the feasible set `M` a price vector is projected onto.
///
/// Immutable for the duration of a projection call.
#[derive(Clone)]
pub enum FeasibleSet {
    /// Probability simplex `{mu : sum(mu) = 1, mu >= 0}`.
    Simplex,
    /// Axis-aligned box `lower <= mu <= upper`.
    Box { lower: Vec<f64>, upper: Vec<f64> },
    /// Arbitrary equality/inequality constraints, solved by a backend.
    Constrained(Vec<Constraint>),
    /// Polytope reachable only through a linear minimization oracle.
    Polytope(Arc<dyn Oracle>),
}

impl FeasibleSet {
    /// Box with the same bounds on every coordinate.
    #[must_use]
    pub fn uniform_box(n: usize, lower: f64, upper: f64) -> Self {
        Self::Box {
            lower: vec![lower; n],
            upper: vec![upper; n],
        }
    }

    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Simplex => "simplex",
            Self::Box { .. } => "box",
            Self::Constrained(_) => "constrained",
            Self::Polytope(_) => "polytope",
        }
    }
}

impl fmt::Debug for FeasibleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simplex => f.write_str("Simplex"),
            Self::Box { lower, upper } => f
                .debug_struct("Box")
                .field("lower", lower)
                .field("upper", upper)
                .finish(),
            Self::Constrained(constraints) => {
                f.debug_tuple("Constrained").field(constraints).finish()
            }
            Self::Polytope(oracle) => f.debug_tuple("Polytope").field(&oracle.name()).finish(),
        }
    }
}
