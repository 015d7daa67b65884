//! Solve outcomes and per-iteration diagnostics.
//!
//! Everything here is created fresh by one projection call and handed back
//! to the caller; nothing is shared between solves.

use std::time::Duration;

use serde::Serialize;

/// Terminal state of a Frank-Wolfe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Duality gap fell below the convergence threshold.
    Converged,
    /// Iteration budget exhausted before the gap condition was met.
    MaxIterationsExceeded,
    /// The linear oracle signalled an error; the best iterate so far is returned.
    OracleFailed,
}

impl SolveStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Converged => "converged",
            Self::MaxIterationsExceeded => "max_iterations_exceeded",
            Self::OracleFailed => "oracle_failed",
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostics for one Frank-Wolfe step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IterationRecord {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Duality gap `g . (mu_k - z_k)` at the start of the step.
    pub gap: f64,
    /// Objective `D(mu_{k+1} || theta)` after the update.
    pub objective: f64,
    /// Step size chosen by the line search.
    pub step: f64,
    /// Time since the solve started.
    pub elapsed: Duration,
}

/// Result of a Frank-Wolfe solve.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    /// Final iterate.
    pub mu: Vec<f64>,
    /// Final objective `D(mu || theta)`.
    pub objective: f64,
    /// Number of iterations that produced a record.
    pub iterations: usize,
    /// Ordered, append-only iteration history.
    pub history: Vec<IterationRecord>,
    /// Whether the duality gap condition was met.
    pub converged: bool,
    pub status: SolveStatus,
    /// Wall time of the whole solve.
    pub elapsed: Duration,
}

impl OptimizationResult {
    /// Gap recorded by the last iteration, if any ran.
    #[must_use]
    pub fn final_gap(&self) -> Option<f64> {
        self.history.last().map(|r| r.gap)
    }

    /// Gap sequence in iteration order.
    #[must_use]
    pub fn gaps(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.gap).collect()
    }
}

/// Result of a barrier-stabilized solve.
#[derive(Debug, Clone, Serialize)]
pub struct BarrierResult {
    /// Best pass by final objective.
    pub best: OptimizationResult,
    /// Contraction applied during the best pass.
    pub best_epsilon: f64,
    /// Contraction schedule in the order the passes ran.
    pub epsilons: Vec<f64>,
    /// Final objective of every pass, aligned with `epsilons`.
    pub pass_objectives: Vec<f64>,
}

impl BarrierResult {
    #[must_use]
    pub fn mu(&self) -> &[f64] {
        &self.best.mu
    }

    #[must_use]
    pub fn passes(&self) -> usize {
        self.epsilons.len()
    }
}

/// How a projection was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMethod {
    Simplex,
    Box,
    General,
    FrankWolfe,
    Barrier,
}

impl std::fmt::Display for ProjectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Simplex => "simplex",
            Self::Box => "box",
            Self::General => "general",
            Self::FrankWolfe => "frank_wolfe",
            Self::Barrier => "barrier",
        };
        f.write_str(name)
    }
}

/// Outcome of projecting a price vector onto a feasible set.
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    /// Projected prices `mu*`.
    pub mu: Vec<f64>,
    /// `D(theta || mu*)`: cost of the original point relative to the set.
    pub profit: f64,
    /// False when an iterative method stopped short of its tolerance; `mu`
    /// is then best-effort.
    pub certified: bool,
    pub method: ProjectionMethod,
    /// Iterative diagnostics for oracle-backed projections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solve: Option<OptimizationResult>,
    /// Contraction schedule when the barrier stabilizer ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsilons: Option<Vec<f64>>,
}
