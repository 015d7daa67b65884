//! `cohere project`: project prices and print the correcting trade.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::info;

use super::command::ProjectArgs;
use super::output;
#[cfg(feature = "highs")]
use crate::adapter::outbound::oracle::MipOracle;
use crate::adapter::outbound::oracle::{ExclusiveOracle, ImplicationOracle};
use crate::application::trade;
use crate::domain::constraint::LinearConstraint;
use crate::domain::feasible::FeasibleSet;
use crate::domain::result::Projection;
use crate::domain::trade::TradePlan;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Feasible sets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    /// Probability simplex, closed form.
    Simplex,
    /// Uniform box `[lower, upper]`, closed form.
    Box,
    /// Mutually exclusive outcomes through Frank-Wolfe.
    Exclusive,
    /// Nested events `x_0 >= x_1 >= ...` through Frank-Wolfe.
    Implication,
    /// Sum-to-one constraint through the solver backend.
    Constrained,
    /// Mutually exclusive outcomes through the HiGHS integer program.
    #[cfg(feature = "highs")]
    Mip,
}

impl SetKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simplex => "simplex",
            Self::Box => "box",
            Self::Exclusive => "exclusive",
            Self::Implication => "implication",
            Self::Constrained => "constrained",
            #[cfg(feature = "highs")]
            Self::Mip => "mip",
        }
    }

    /// Feasible set over `n` outcomes.
    #[must_use]
    pub fn feasible_set(&self, n: usize, lower: f64, upper: f64) -> FeasibleSet {
        match self {
            Self::Simplex => FeasibleSet::Simplex,
            Self::Box => FeasibleSet::uniform_box(n, lower, upper),
            Self::Exclusive => FeasibleSet::Polytope(Arc::new(ExclusiveOracle)),
            Self::Implication => FeasibleSet::Polytope(Arc::new(ImplicationOracle::new())),
            Self::Constrained => {
                FeasibleSet::Constrained(vec![LinearConstraint::sum_to_one(n).into()])
            }
            #[cfg(feature = "highs")]
            Self::Mip => FeasibleSet::Polytope(Arc::new(MipOracle::exclusive(n))),
        }
    }
}

impl FromStr for SetKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simplex" => Ok(Self::Simplex),
            "box" => Ok(Self::Box),
            "exclusive" => Ok(Self::Exclusive),
            "implication" => Ok(Self::Implication),
            "constrained" => Ok(Self::Constrained),
            #[cfg(feature = "highs")]
            "mip" => Ok(Self::Mip),
            other => Err(ConfigError::InvalidValue {
                field: "set",
                reason: format!("unknown feasible set '{other}'"),
            }),
        }
    }
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Outcome")]
    outcome: usize,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Coherent")]
    coherent: String,
    #[tabled(rename = "Direction")]
    direction: String,
    #[tabled(rename = "Trade")]
    trade: String,
}

/// Everything `project` computes, as emitted in JSON mode.
#[derive(Debug, Serialize)]
pub struct ProjectionReport {
    pub set: &'static str,
    pub prices: Vec<f64>,
    pub projection: Projection,
    pub direction: Vec<f64>,
    pub liquidity: f64,
    pub plan: TradePlan,
    /// LMSR cost of executing the full position sizes.
    pub cost: f64,
}

/// Run the projection described by `args` without printing anything.
///
/// # Errors
///
/// Returns an error for an unknown set name or invalid prices, bounds or
/// liquidity.
pub fn build_report(args: &ProjectArgs, config: &Config) -> Result<ProjectionReport> {
    let kind: SetKind = args.set.parse()?;
    let theta = &args.prices;
    let set = kind.feasible_set(theta.len(), args.lower, args.upper);
    let liquidity = args.liquidity.unwrap_or(config.trade.liquidity);

    let projection = config.projector(args.barrier).project(theta, &set)?;
    let direction = trade::trading_direction(&projection.mu, theta)?;
    let sizes = trade::position_size(&projection.mu, theta, liquidity)?;
    let plan = trade::plan(&projection.mu, theta, liquidity, config.trade.min_shares)?;
    let cost = trade::trade_cost(theta, &sizes, liquidity)?;

    info!(
        set = kind.as_str(),
        method = %projection.method,
        profit = projection.profit,
        legs = plan.legs().len(),
        "projection computed"
    );

    Ok(ProjectionReport {
        set: kind.as_str(),
        prices: theta.clone(),
        projection,
        direction,
        liquidity,
        plan,
        cost,
    })
}

/// Execute `cohere project`.
///
/// # Errors
///
/// Propagates [`build_report`] failures and JSON serialization errors.
pub fn execute(args: &ProjectArgs, config: &Config) -> Result<()> {
    let report = build_report(args, config)?;

    if output::is_json() {
        let mut value = serde_json::to_value(&report)?;
        if let Some(object) = value.as_object_mut() {
            object.insert("command".to_string(), json!("project"));
        }
        output::json_output(&value);
        return Ok(());
    }

    render(&report);
    Ok(())
}

fn render(report: &ProjectionReport) {
    let projection = &report.projection;
    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Projection");

    let rows: Vec<OutcomeRow> = report
        .prices
        .iter()
        .zip(&projection.mu)
        .zip(&report.direction)
        .enumerate()
        .map(|(outcome, ((price, mu), direction))| OutcomeRow {
            outcome,
            price: format!("{price:.4}"),
            coherent: format!("{mu:.4}"),
            direction: format!("{direction:+.4}"),
            trade: report
                .plan
                .leg(outcome)
                .map_or_else(|| "-".to_string(), |leg| format!("{} {}", leg.side, leg.shares)),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::section("Summary");
    output::field("Set", report.set);
    output::field("Method", projection.method);
    let profit = format!("{:.6}", projection.profit);
    if projection.profit > 0.0 {
        output::field("Profit", output::positive(profit));
    } else {
        output::field("Profit", output::muted(profit));
    }
    if let Some(solve) = &projection.solve {
        output::field("Iterations", solve.iterations);
        if let Some(gap) = solve.final_gap() {
            output::field("Final gap", format!("{gap:.3e}"));
        }
    }
    if let Some(epsilons) = &projection.epsilons {
        output::field("Barrier passes", epsilons.len());
    }
    output::field("Liquidity", report.liquidity);
    let cost = format!("{:.4}", report.cost);
    if report.cost < 0.0 {
        output::field("Trade cost", output::positive(cost));
    } else {
        output::field("Trade cost", output::negative(cost));
    }

    if projection.certified {
        output::success("Projection certified");
    } else {
        output::warning("Solver stopped before reaching its tolerance; result is best-effort");
    }
    if report.plan.is_empty() {
        output::success("Prices are already coherent; no trade needed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::ProjectionMethod;
    use crate::error::Error;

    fn args(prices: &[f64], set: &str) -> ProjectArgs {
        ProjectArgs {
            prices: prices.to_vec(),
            set: set.to_string(),
            lower: 0.0,
            upper: 1.0,
            barrier: false,
            liquidity: None,
            config: None,
        }
    }

    #[test]
    fn parses_set_names() {
        assert_eq!("Simplex".parse::<SetKind>().unwrap(), SetKind::Simplex);
        assert_eq!(" implication ".parse::<SetKind>().unwrap(), SetKind::Implication);
        assert!(matches!(
            "torus".parse::<SetKind>(),
            Err(ConfigError::InvalidValue { field: "set", .. })
        ));
    }

    #[test]
    fn simplex_report_carries_plan_and_cost() {
        let report = build_report(&args(&[0.35, 0.40, 0.35], "simplex"), &Config::default()).unwrap();
        assert_eq!(report.projection.method, ProjectionMethod::Simplex);
        assert_eq!(report.plan.legs().len(), 3);
        assert!(report.cost.is_finite());
        assert!(report.direction.iter().all(|d| *d < 0.0));
    }

    #[test]
    fn coherent_prices_need_no_trade() {
        let report = build_report(&args(&[0.25, 0.75], "simplex"), &Config::default()).unwrap();
        assert!(report.plan.is_empty());
        assert!(report.projection.profit.abs() < 1e-12);
    }

    #[test]
    fn unknown_set_is_a_config_error() {
        let err = build_report(&args(&[0.5, 0.5], "torus"), &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn liquidity_override_is_validated() {
        let mut bad = args(&[0.35, 0.40, 0.35], "simplex");
        bad.liquidity = Some(0.0);
        assert!(build_report(&bad, &Config::default()).is_err());
    }
}
