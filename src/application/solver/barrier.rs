//! Barrier-stabilized Frank-Wolfe.
//!
//! Vertices of a marginal polytope sit on the boundary, where `ln(mu/theta)`
//! blows up as `mu -> 0`. Each outer pass contracts the polytope toward an
//! interior center:
//!
//! ```text
//! contracted_oracle(g) = (1 - eps) * oracle(g) + eps * center
//! ```
//!
//! then runs a full Frank-Wolfe solve, warm-started from the previous pass.
//! `eps` shrinks geometrically until it drops below `min_epsilon`. Contraction
//! changes the feasible set, so passes are not monotone and the best pass by
//! final objective is returned.

use tracing::{debug, info, warn};

use super::bregman::KlDivergence;
use super::frank_wolfe::FrankWolfe;
use crate::domain::price;
use crate::domain::result::{BarrierResult, OptimizationResult, SolveStatus};
use crate::error::{ConfigError, ProjectionError, Result};
use crate::port::outbound::oracle::Oracle;

/// Contraction schedule for the outer loop.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierConfig {
    /// Contraction applied in the first pass.
    pub initial_epsilon: f64,
    /// Multiplier applied to the contraction after every pass.
    pub epsilon_reduction: f64,
    /// Passes stop once the contraction falls below this value.
    pub min_epsilon: f64,
    /// Interior point to contract toward; uniform when `None`.
    pub center: Option<Vec<f64>>,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            initial_epsilon: 0.1,
            epsilon_reduction: 0.9,
            min_epsilon: 1e-6,
            center: None,
        }
    }
}

impl BarrierConfig {
    /// Check the schedule terminates and starts inside the polytope.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unusable schedule.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_epsilon > 0.0 && self.initial_epsilon < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "initial_epsilon",
                reason: "must be in (0, 1)".to_string(),
            }
            .into());
        }
        if !(self.epsilon_reduction > 0.0 && self.epsilon_reduction < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "epsilon_reduction",
                reason: "must be in (0, 1)".to_string(),
            }
            .into());
        }
        if !(self.min_epsilon > 0.0 && self.min_epsilon <= self.initial_epsilon) {
            return Err(ConfigError::InvalidValue {
                field: "min_epsilon",
                reason: "must be in (0, initial_epsilon]".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Contraction values in the order the passes run.
    #[must_use]
    pub fn schedule(&self) -> Vec<f64> {
        let mut epsilons = Vec::new();
        let mut epsilon = self.initial_epsilon;
        while epsilon >= self.min_epsilon {
            epsilons.push(epsilon);
            epsilon *= self.epsilon_reduction;
        }
        epsilons
    }
}

/// Oracle whose vertices are pulled toward `center` by `epsilon`.
pub struct ContractedOracle<'a> {
    inner: &'a dyn Oracle,
    epsilon: f64,
    center: &'a [f64],
}

impl<'a> ContractedOracle<'a> {
    #[must_use]
    pub const fn new(inner: &'a dyn Oracle, epsilon: f64, center: &'a [f64]) -> Self {
        Self {
            inner,
            epsilon,
            center,
        }
    }

    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Oracle for ContractedOracle<'_> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn solve(&self, gradient: &[f64]) -> Result<Vec<f64>> {
        let vertex = self.inner.solve(gradient)?;
        Ok(price::interpolate(&vertex, self.center, self.epsilon))
    }
}

/// Frank-Wolfe wrapped in a shrinking contraction loop.
#[derive(Debug, Clone, Default)]
pub struct BarrierFrankWolfe {
    frank_wolfe: FrankWolfe,
    config: BarrierConfig,
}

impl BarrierFrankWolfe {
    #[must_use]
    pub const fn new(frank_wolfe: FrankWolfe, config: BarrierConfig) -> Self {
        Self {
            frank_wolfe,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &BarrierConfig {
        &self.config
    }

    /// Run the contraction schedule and return the best pass.
    ///
    /// An oracle failure ends the schedule early; the best pass so far is
    /// still returned.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid inputs, an invalid schedule, or a center
    /// of the wrong length.
    pub fn solve(
        &self,
        theta: &[f64],
        oracle: &dyn Oracle,
        initial: Option<&[f64]>,
    ) -> Result<BarrierResult> {
        self.config.validate()?;
        price::validate(theta)?;
        let center = match &self.config.center {
            Some(center) => {
                price::validate_pair(center, theta)?;
                center.clone()
            }
            None => price::uniform(theta.len()),
        };

        let kl = KlDivergence::new(self.frank_wolfe.config().epsilon);
        let mut warm_start = initial.map(<[f64]>::to_vec);
        let mut best: Option<(usize, OptimizationResult)> = None;
        let mut epsilons = Vec::new();
        let mut pass_objectives = Vec::new();

        for epsilon in self.config.schedule() {
            let contracted = ContractedOracle::new(oracle, epsilon, &center);
            let result = self
                .frank_wolfe
                .solve(theta, &contracted, warm_start.as_deref())?;
            let objective = kl.value_unchecked(&result.mu, theta);
            debug!(
                epsilon,
                objective,
                iterations = result.iterations,
                status = %result.status,
                "barrier pass"
            );

            epsilons.push(epsilon);
            pass_objectives.push(objective);
            let failed = result.status == SolveStatus::OracleFailed;
            warm_start = Some(result.mu.clone());

            let improves = best
                .as_ref()
                .map_or(true, |(index, _)| objective < pass_objectives[*index]);
            if improves {
                best = Some((pass_objectives.len() - 1, result));
            }

            if failed {
                warn!(epsilon, "oracle failed; stopping barrier schedule");
                break;
            }
        }

        let (index, best) = best.ok_or(ProjectionError::Empty)?;
        info!(
            passes = epsilons.len(),
            best_epsilon = epsilons[index],
            objective = pass_objectives[index],
            converged = best.converged,
            "barrier frank-wolfe finished"
        );

        Ok(BarrierResult {
            best,
            best_epsilon: epsilons[index],
            epsilons,
            pass_objectives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::solver::frank_wolfe::FrankWolfeConfig;
    use crate::error::{Error, SolverError};
    use crate::port::outbound::oracle::FnOracle;

    fn one_hot(g: &[f64]) -> Result<Vec<f64>> {
        let best_idx = g
            .iter()
            .enumerate()
            .fold(0, |best, (i, v)| if *v < g[best] { i } else { best });
        let mut z = vec![0.0; g.len()];
        z[best_idx] = 1.0;
        Ok(z)
    }

    #[test]
    fn schedule_is_geometric_and_stops_below_min() {
        let config = BarrierConfig {
            initial_epsilon: 0.1,
            epsilon_reduction: 0.5,
            min_epsilon: 0.01,
            center: None,
        };
        let schedule = config.schedule();
        assert_eq!(schedule.len(), 4);
        assert!((schedule[3] - 0.0125).abs() < 1e-12);
        assert!(schedule.iter().all(|e| *e >= 0.01));
    }

    #[test]
    fn validate_rejects_bad_schedules() {
        let bad = BarrierConfig {
            epsilon_reduction: 1.0,
            ..BarrierConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "epsilon_reduction",
                ..
            }))
        ));
        let bad = BarrierConfig {
            min_epsilon: 0.5,
            ..BarrierConfig::default()
        };
        assert!(bad.validate().is_err());
        assert!(BarrierConfig::default().validate().is_ok());
    }

    #[test]
    fn contracted_oracle_pulls_toward_center() {
        let inner = FnOracle::new("one-hot", one_hot);
        let center = [0.5, 0.5];
        let contracted = ContractedOracle::new(&inner, 0.2, &center);
        let vertex = contracted.solve(&[0.0, 1.0]).unwrap();
        assert!((vertex[0] - 0.9).abs() < 1e-12);
        assert!((vertex[1] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn barrier_records_schedule_and_best_pass() {
        let solver = BarrierFrankWolfe::new(
            FrankWolfe::default(),
            BarrierConfig {
                initial_epsilon: 0.1,
                epsilon_reduction: 0.5,
                min_epsilon: 0.01,
                center: None,
            },
        );
        let oracle = FnOracle::new("one-hot", one_hot);
        let result = solver.solve(&[0.35, 0.40, 0.35], &oracle, None).unwrap();

        assert_eq!(result.passes(), 4);
        assert_eq!(result.pass_objectives.len(), 4);
        let min = result
            .pass_objectives
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        assert!((result.best.objective - min).abs() < 1e-15);
        assert!(result.mu().iter().all(|m| *m > 0.0 && *m < 1.0));
    }

    #[test]
    fn barrier_stops_on_oracle_failure() {
        let solver = BarrierFrankWolfe::new(
            FrankWolfe::new(FrankWolfeConfig::default()),
            BarrierConfig::default(),
        );
        let oracle = FnOracle::new("broken", |_: &[f64]| {
            Err(SolverError::OracleFailed("down".into()).into())
        });
        let result = solver.solve(&[0.3, 0.3, 0.3], &oracle, None).unwrap();
        assert_eq!(result.passes(), 1);
        assert_eq!(result.best.status, SolveStatus::OracleFailed);
    }

    #[test]
    fn barrier_rejects_mismatched_center() {
        let solver = BarrierFrankWolfe::new(
            FrankWolfe::default(),
            BarrierConfig {
                center: Some(vec![0.5, 0.5]),
                ..BarrierConfig::default()
            },
        );
        let oracle = FnOracle::new("one-hot", one_hot);
        assert!(solver.solve(&[0.3, 0.3, 0.4], &oracle, None).is_err());
    }
}
