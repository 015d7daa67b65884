//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use cohere::adapter::outbound::backend::AugmentedLagrangianBackend;
use cohere::adapter::outbound::oracle::{ExclusiveOracle, VertexOracle};
use cohere::application::solver::{FrankWolfeConfig, Projector};
use cohere::port::Oracle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Three mutually exclusive outcomes priced at a combined 1.10.
pub const OVERPRICED: [f64; 3] = [0.35, 0.40, 0.35];

/// Two events where the second implies the first, priced incoherently.
pub const DEPENDENT: [f64; 2] = [0.40, 0.70];

/// Deterministic RNG so randomized checks are reproducible.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random vector of `n` prices in `[low, high)`.
pub fn random_prices(rng: &mut StdRng, n: usize, low: f64, high: f64) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(low..high)).collect()
}

/// Random strictly positive point on the probability simplex.
pub fn random_distribution(rng: &mut StdRng, n: usize) -> Vec<f64> {
    let raw = random_prices(rng, n, 0.05, 1.0);
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|v| v / total).collect()
}

pub fn projector() -> Projector {
    Projector::new(
        FrankWolfeConfig::default(),
        Arc::new(AugmentedLagrangianBackend::default()),
    )
}

pub fn exclusive_oracle() -> Arc<dyn Oracle> {
    Arc::new(ExclusiveOracle)
}

/// Valid outcomes of "B implies A": neither, A only, both.
pub fn dependent_oracle() -> VertexOracle {
    VertexOracle::new(vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]])
        .expect("valid vertex list")
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

pub fn assert_vec_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (a, e) in actual.iter().zip(expected) {
        assert_close(*a, *e, tolerance);
    }
}
