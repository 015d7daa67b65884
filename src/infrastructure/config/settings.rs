//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; a missing section takes its defaults.
//!
//! # Example
//!
//! ```no_run
//! use cohere::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::logging::{LoggingConfig, LOG_FORMATS};
use super::solver::{BackendAppConfig, BarrierAppConfig, SolverAppConfig};
use super::trade::TradeAppConfig;
use crate::adapter::outbound::backend::AugmentedLagrangianBackend;
use crate::application::solver::Projector;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Frank-Wolfe settings.
    #[serde(default)]
    pub solver: SolverAppConfig,

    /// Contraction schedule used when barrier stabilization is requested.
    #[serde(default)]
    pub barrier: BarrierAppConfig,

    /// General convex projector backend settings.
    #[serde(default)]
    pub backend: BackendAppConfig,

    /// Trade sizing.
    #[serde(default)]
    pub trade: TradeAppConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        self.solver.validate()?;
        self.barrier.barrier().validate()?;
        self.backend.validate()?;
        self.trade.validate()?;
        Ok(())
    }

    /// Build a projector wired with the configured solver and backend.
    ///
    /// Oracle-backed projections run the barrier schedule when `barrier` is set.
    #[must_use]
    pub fn projector(&self, barrier: bool) -> Projector {
        let backend = AugmentedLagrangianBackend::new(self.backend.augmented_lagrangian());
        let projector = Projector::new(self.solver.frank_wolfe(), Arc::new(backend));
        if barrier {
            projector.with_barrier(self.barrier.barrier())
        } else {
            projector
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
