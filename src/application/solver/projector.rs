//! Dispatch a projection to the projector matching the feasible set.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::barrier::{BarrierConfig, BarrierFrankWolfe};
use super::bregman::KlDivergence;
use super::closed_form;
use super::frank_wolfe::{FrankWolfe, FrankWolfeConfig};
use super::general::GeneralProjector;
use crate::domain::feasible::FeasibleSet;
use crate::domain::price;
use crate::domain::result::{Projection, ProjectionMethod};
use crate::error::Result;
use crate::port::outbound::backend::SolverBackend;

/// Bregman projector over every [`FeasibleSet`] representation.
///
/// Closed-form sets are projected exactly; constraint lists go to the
/// injected backend; oracle-backed polytopes run Frank-Wolfe, stabilized by
/// the barrier loop when a [`BarrierConfig`] is set.
#[derive(Clone)]
pub struct Projector {
    frank_wolfe: FrankWolfe,
    barrier: Option<BarrierConfig>,
    general: GeneralProjector,
}

impl Projector {
    #[must_use]
    pub fn new(config: FrankWolfeConfig, backend: Arc<dyn SolverBackend>) -> Self {
        let general =
            GeneralProjector::new(backend).with_divergence(KlDivergence::new(config.epsilon));
        Self {
            frank_wolfe: FrankWolfe::new(config),
            barrier: None,
            general,
        }
    }

    /// Stabilize oracle-backed projections with a contraction schedule.
    #[must_use]
    pub fn with_barrier(mut self, barrier: BarrierConfig) -> Self {
        self.barrier = Some(barrier);
        self
    }

    fn divergence(&self) -> KlDivergence {
        KlDivergence::new(self.frank_wolfe.config().epsilon)
    }

    /// Project `theta` onto `set`.
    ///
    /// Profit is `D(theta || mu*)` for every method.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid inputs; solver shortfalls are reported
    /// through [`Projection::certified`].
    #[instrument(skip_all, fields(set = set.kind(), outcomes = theta.len()))]
    pub fn project(&self, theta: &[f64], set: &FeasibleSet) -> Result<Projection> {
        let kl = self.divergence();
        let projection = match set {
            FeasibleSet::Simplex => closed_form::simplex(&kl, theta)?,
            FeasibleSet::Box { lower, upper } => closed_form::boxed(&kl, theta, lower, upper)?,
            FeasibleSet::Constrained(constraints) => {
                self.general.project(theta, constraints, None)?
            }
            FeasibleSet::Polytope(oracle) => match &self.barrier {
                Some(barrier) => {
                    let solver = BarrierFrankWolfe::new(self.frank_wolfe.clone(), barrier.clone());
                    let result = solver.solve(theta, oracle.as_ref(), None)?;
                    let profit = kl.value_unchecked(theta, result.mu());
                    Projection {
                        mu: result.best.mu.clone(),
                        profit,
                        certified: result.best.converged,
                        method: ProjectionMethod::Barrier,
                        epsilons: Some(result.epsilons),
                        solve: Some(result.best),
                    }
                }
                None => {
                    let result = self.frank_wolfe.solve(theta, oracle.as_ref(), None)?;
                    let profit = kl.value_unchecked(theta, &result.mu);
                    Projection {
                        mu: result.mu.clone(),
                        profit,
                        certified: result.converged,
                        method: ProjectionMethod::FrankWolfe,
                        solve: Some(result),
                        epsilons: None,
                    }
                }
            },
        };
        debug!(
            method = %projection.method,
            profit = projection.profit,
            certified = projection.certified,
            mass = price::mass(&projection.mu),
            "projection complete"
        );
        Ok(projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::uniform;
    use crate::error::{Error, ProjectionError};
    use crate::port::outbound::backend::{BackendSolution, NonlinearProblem};
    use crate::port::outbound::oracle::FnOracle;

    struct StartBackend;

    impl SolverBackend for StartBackend {
        fn name(&self) -> &'static str {
            "start"
        }

        fn minimize(&self, problem: &NonlinearProblem<'_>) -> Result<BackendSolution> {
            Ok(BackendSolution {
                point: problem.initial.to_vec(),
                success: true,
                iterations: 0,
                max_violation: 0.0,
            })
        }
    }

    fn projector() -> Projector {
        Projector::new(FrankWolfeConfig::default(), Arc::new(StartBackend))
    }

    #[test]
    fn dispatches_closed_form_sets() {
        let p = projector();
        let simplex = p.project(&[0.35, 0.40, 0.35], &FeasibleSet::Simplex).unwrap();
        assert_eq!(simplex.method, ProjectionMethod::Simplex);

        let boxed = p
            .project(&[0.35, 0.95], &FeasibleSet::uniform_box(2, 0.05, 0.9))
            .unwrap();
        assert_eq!(boxed.method, ProjectionMethod::Box);
        assert_eq!(boxed.mu, vec![0.35, 0.9]);
    }

    #[test]
    fn dispatches_constrained_sets_to_backend() {
        let p = projector();
        let projection = p
            .project(&[0.2, 0.2], &FeasibleSet::Constrained(vec![]))
            .unwrap();
        assert_eq!(projection.method, ProjectionMethod::General);
        assert_eq!(projection.mu, uniform(2));
    }

    #[test]
    fn dispatches_polytopes_to_frank_wolfe_or_barrier() {
        let oracle: Arc<dyn crate::port::Oracle> = Arc::new(FnOracle::new("first", |g: &[f64]| {
            let mut z = vec![0.0; g.len()];
            z[0] = 1.0;
            Ok(z)
        }));
        let set = FeasibleSet::Polytope(oracle);

        let plain = projector().project(&[0.6, 0.2], &set).unwrap();
        assert_eq!(plain.method, ProjectionMethod::FrankWolfe);
        assert!(plain.solve.is_some());

        let stabilized = projector()
            .with_barrier(BarrierConfig {
                initial_epsilon: 0.1,
                epsilon_reduction: 0.5,
                min_epsilon: 0.05,
                center: None,
            })
            .project(&[0.6, 0.2], &set)
            .unwrap();
        assert_eq!(stabilized.method, ProjectionMethod::Barrier);
        assert_eq!(stabilized.epsilons.as_deref(), Some(&[0.1, 0.05][..]));
    }

    #[test]
    fn zero_mass_simplex_is_fatal() {
        let err = projector()
            .project(&[0.0, 0.0], &FeasibleSet::Simplex)
            .unwrap_err();
        assert!(matches!(err, Error::Projection(ProjectionError::ZeroMass)));
    }
}
