use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Caller misuse detected while validating projection inputs.
///
/// These are never retried: they indicate the inputs themselves are wrong.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("price vector cannot be empty")]
    Empty,

    #[error("dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },

    #[error("price vector has zero total mass")]
    ZeroMass,

    #[error("invalid bounds at index {index}: lower {lower} > upper {upper}")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },

    #[error("liquidity parameter must be positive and finite, got {0}")]
    InvalidLiquidity(f64),
}

/// Failures raised by injected solver capabilities.
#[derive(Error, Debug, Clone)]
pub enum SolverError {
    #[error("oracle failed: {0}")]
    OracleFailed(String),

    #[error("oracle returned {actual} coordinates, expected {expected}")]
    OracleDimension { expected: usize, actual: usize },

    #[error("solver backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
