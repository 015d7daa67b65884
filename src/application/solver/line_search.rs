//! Step-size search along a Frank-Wolfe segment.
//!
//! The objective along `(1 - gamma) * mu + gamma * z` is convex in `gamma`
//! but has no closed-form minimizer when `z` is a combinatorial vertex, so
//! the step is searched over `[0, 1]`.

use serde::Deserialize;

/// Golden ratio conjugate `(sqrt(5) - 1) / 2`.
const INV_PHI: f64 = 0.618_033_988_749_894_9;

const MAX_GOLDEN_ITERATIONS: usize = 200;

/// Step-size search strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSearch {
    /// Evaluate `num_trials` equally spaced points in `[0, 1]` and keep the
    /// first minimum found.
    Grid { num_trials: usize },
    /// Run the grid, then golden-section search inside the bracket around the
    /// best grid point. The refined step replaces the grid step only when it
    /// is strictly better, so ties and determinism follow the grid.
    Refined { num_trials: usize, tolerance: f64 },
}

impl Default for LineSearch {
    fn default() -> Self {
        Self::Refined {
            num_trials: 20,
            tolerance: 1e-12,
        }
    }
}

/// Line search kind as named in configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSearchKind {
    Grid,
    #[default]
    Refined,
}

impl LineSearch {
    /// Build a strategy of the given kind with `num_trials` grid points.
    #[must_use]
    pub fn from_kind(kind: LineSearchKind, num_trials: usize) -> Self {
        match kind {
            LineSearchKind::Grid => Self::Grid { num_trials },
            LineSearchKind::Refined => Self::Refined {
                num_trials,
                tolerance: 1e-12,
            },
        }
    }

    #[must_use]
    pub const fn num_trials(&self) -> usize {
        match self {
            Self::Grid { num_trials } | Self::Refined { num_trials, .. } => *num_trials,
        }
    }

    /// Return `(gamma, f(gamma))` minimizing `f` over `[0, 1]`.
    pub fn search<F>(&self, f: F) -> (f64, f64)
    where
        F: Fn(f64) -> f64,
    {
        match *self {
            Self::Grid { num_trials } => grid(&f, num_trials).1,
            Self::Refined {
                num_trials,
                tolerance,
            } => {
                let (index, (gamma, value)) = grid(&f, num_trials);
                let last = num_trials.max(2) - 1;
                let lo = grid_point(index.saturating_sub(1), last);
                let hi = grid_point((index + 1).min(last), last);
                let (refined, refined_value) = golden_section(&f, lo, hi, tolerance);
                if refined_value < value {
                    (refined, refined_value)
                } else {
                    (gamma, value)
                }
            }
        }
    }
}

fn grid_point(index: usize, last: usize) -> f64 {
    index as f64 / last as f64
}

/// Scan the grid in increasing `gamma`; strict comparison keeps the lowest
/// `gamma` among equal values. Non-finite values never win.
fn grid<F>(f: &F, num_trials: usize) -> (usize, (f64, f64))
where
    F: Fn(f64) -> f64,
{
    let last = num_trials.max(2) - 1;
    let mut best = (0, (0.0, f(0.0)));
    for index in 1..=last {
        let gamma = grid_point(index, last);
        let value = f(gamma);
        if value < best.1 .1 || (!best.1 .1.is_finite() && value.is_finite()) {
            best = (index, (gamma, value));
        }
    }
    best
}

fn golden_section<F>(f: &F, mut lo: f64, mut hi: f64, tolerance: f64) -> (f64, f64)
where
    F: Fn(f64) -> f64,
{
    let mut c = hi - INV_PHI * (hi - lo);
    let mut d = lo + INV_PHI * (hi - lo);
    let mut fc = f(c);
    let mut fd = f(d);
    for _ in 0..MAX_GOLDEN_ITERATIONS {
        if hi - lo < tolerance {
            break;
        }
        if fc <= fd {
            hi = d;
            d = c;
            fd = fc;
            c = hi - INV_PHI * (hi - lo);
            fc = f(c);
        } else {
            lo = c;
            c = d;
            fc = fd;
            d = lo + INV_PHI * (hi - lo);
            fd = f(d);
        }
    }
    let gamma = 0.5 * (lo + hi);
    (gamma, f(gamma))
}
