//! `cohere check`: diagnostic checks.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate a configuration file without running a projection.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;
    let frank_wolfe = config.solver.frank_wolfe();
    let schedule = config.barrier.barrier().schedule();

    if output::is_json() {
        output::json_output(&json!({
            "command": "check.config",
            "path": path.display().to_string(),
            "valid": true,
            "max_iterations": frank_wolfe.max_iterations,
            "convergence_threshold": frank_wolfe.convergence_threshold,
            "line_search_trials": frank_wolfe.line_search.num_trials(),
            "barrier_passes": schedule.len(),
            "liquidity": config.trade.liquidity,
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);
    output::field("Iterations", frank_wolfe.max_iterations);
    output::field("Gap", format!("{:e}", frank_wolfe.convergence_threshold));
    output::field("Line search", format!("{:?}", config.solver.line_search).to_lowercase());
    output::field("Barrier", format!("{} passes", schedule.len()));
    output::field("Liquidity", config.trade.liquidity);
    output::field("Min shares", config.trade.min_shares);

    Ok(())
}
