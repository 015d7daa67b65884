//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Bregman projection of prediction-market prices onto coherent sets
#[derive(Parser, Debug)]
#[command(name = "cohere")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the cohere CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project market prices onto a coherent set and size the correcting trade
    Project(ProjectArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `cohere check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Path to a configuration file.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for `cohere project`.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Comma-separated market prices, one per outcome
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub prices: Vec<f64>,

    /// Feasible set: simplex, box, exclusive, implication, constrained, mip
    #[arg(long, default_value = "simplex")]
    pub set: String,

    /// Lower bound for every outcome (box set)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub lower: f64,

    /// Upper bound for every outcome (box set)
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub upper: f64,

    /// Stabilize oracle-backed projections with the barrier schedule
    #[arg(long)]
    pub barrier: bool,

    /// LMSR liquidity parameter; overrides the configured value
    #[arg(long, allow_hyphen_values = true)]
    pub liquidity: Option<f64>,

    /// Configuration file; defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
