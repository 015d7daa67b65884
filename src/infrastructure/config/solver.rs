//! Solver configuration sections: `[solver]`, `[barrier]` and `[backend]`.

use serde::Deserialize;

use crate::adapter::outbound::backend::AugmentedLagrangianConfig;
use crate::application::solver::{BarrierConfig, FrankWolfeConfig, LineSearch, LineSearchKind};
use crate::domain::price::DEFAULT_EPSILON;
use crate::error::{ConfigError, Result};

/// Frank-Wolfe settings from the `[solver]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolverAppConfig {
    /// Clipping floor for the divergence.
    pub epsilon: f64,
    pub max_iterations: usize,
    /// Duality gap below which a solve is certified.
    pub convergence_threshold: f64,
    /// Grid points per line search.
    pub num_trials: usize,
    pub line_search: LineSearchKind,
}

impl Default for SolverAppConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iterations: 150,
            convergence_threshold: 1e-6,
            num_trials: 20,
            line_search: LineSearchKind::default(),
        }
    }
}

impl SolverAppConfig {
    #[allow(clippy::result_large_err)]
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0 && self.epsilon < 0.5) {
            return Err(ConfigError::InvalidValue {
                field: "epsilon",
                reason: "must be between 0 and 0.5 (exclusive)".to_string(),
            }
            .into());
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_iterations",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !(self.convergence_threshold > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "convergence_threshold",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.num_trials < 2 {
            return Err(ConfigError::InvalidValue {
                field: "num_trials",
                reason: "must be at least 2".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Runtime Frank-Wolfe configuration.
    #[must_use]
    pub fn frank_wolfe(&self) -> FrankWolfeConfig {
        FrankWolfeConfig {
            max_iterations: self.max_iterations,
            convergence_threshold: self.convergence_threshold,
            epsilon: self.epsilon,
            line_search: LineSearch::from_kind(self.line_search, self.num_trials),
        }
    }
}

/// Contraction schedule from the `[barrier]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BarrierAppConfig {
    pub initial_epsilon: f64,
    pub epsilon_reduction: f64,
    pub min_epsilon: f64,
}

impl Default for BarrierAppConfig {
    fn default() -> Self {
        let defaults = BarrierConfig::default();
        Self {
            initial_epsilon: defaults.initial_epsilon,
            epsilon_reduction: defaults.epsilon_reduction,
            min_epsilon: defaults.min_epsilon,
        }
    }
}

impl BarrierAppConfig {
    /// Runtime barrier configuration contracting toward the uniform point.
    #[must_use]
    pub fn barrier(&self) -> BarrierConfig {
        BarrierConfig {
            initial_epsilon: self.initial_epsilon,
            epsilon_reduction: self.epsilon_reduction,
            min_epsilon: self.min_epsilon,
            center: None,
        }
    }
}

/// Augmented-Lagrangian settings from the `[backend]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendAppConfig {
    pub max_outer_iterations: usize,
    pub max_inner_iterations: usize,
    pub tolerance: f64,
    pub constraint_tolerance: f64,
}

impl Default for BackendAppConfig {
    fn default() -> Self {
        let defaults = AugmentedLagrangianConfig::default();
        Self {
            max_outer_iterations: defaults.max_outer_iterations,
            max_inner_iterations: defaults.max_inner_iterations,
            tolerance: defaults.tolerance,
            constraint_tolerance: defaults.constraint_tolerance,
        }
    }
}

impl BackendAppConfig {
    #[allow(clippy::result_large_err)]
    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_outer_iterations == 0 || self.max_inner_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend_iterations",
                reason: "iteration counts must be greater than 0".to_string(),
            }
            .into());
        }
        if !(self.tolerance > 0.0 && self.constraint_tolerance > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "backend_tolerance",
                reason: "tolerances must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    #[must_use]
    pub fn augmented_lagrangian(&self) -> AugmentedLagrangianConfig {
        AugmentedLagrangianConfig {
            max_outer_iterations: self.max_outer_iterations,
            max_inner_iterations: self.max_inner_iterations,
            tolerance: self.tolerance,
            constraint_tolerance: self.constraint_tolerance,
            ..AugmentedLagrangianConfig::default()
        }
    }
}
