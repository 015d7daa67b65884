mod support;

use cohere::adapter::outbound::oracle::ExclusiveOracle;
use cohere::application::solver::{
    project_simplex, BarrierConfig, BarrierFrankWolfe, FrankWolfe, FrankWolfeConfig,
};
use cohere::domain::{FeasibleSet, ProjectionMethod};

use support::{assert_vec_close, OVERPRICED};

fn scenario_config() -> BarrierConfig {
    BarrierConfig {
        initial_epsilon: 0.1,
        epsilon_reduction: 0.8,
        min_epsilon: 1e-4,
        center: None,
    }
}

#[test]
fn barrier_result_is_strictly_interior() {
    let solver = BarrierFrankWolfe::new(FrankWolfe::default(), scenario_config());
    let result = solver.solve(&OVERPRICED, &ExclusiveOracle, None).unwrap();

    assert!(
        result.mu().iter().all(|m| *m > 0.0 && *m < 1.0),
        "mu = {:?}",
        result.mu()
    );
}

#[test]
fn barrier_records_the_full_schedule() {
    let solver = BarrierFrankWolfe::new(FrankWolfe::default(), scenario_config());
    let result = solver.solve(&OVERPRICED, &ExclusiveOracle, None).unwrap();

    // 0.1 * 0.8^30 >= 1e-4 > 0.1 * 0.8^31
    assert_eq!(result.passes(), 31);
    assert_eq!(result.epsilons[0], 0.1);
    assert!(result.epsilons.windows(2).all(|w| w[1] < w[0]));
    assert!(result.epsilons.iter().all(|e| *e >= 1e-4));
    assert!(result.epsilons.contains(&result.best_epsilon));
}

#[test]
fn barrier_keeps_the_best_pass() {
    let solver = BarrierFrankWolfe::new(FrankWolfe::default(), scenario_config());
    let result = solver.solve(&OVERPRICED, &ExclusiveOracle, None).unwrap();

    let best = result
        .pass_objectives
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    assert!((result.best.objective - best).abs() < 1e-12);
}

#[test]
fn interior_optimum_survives_contraction() {
    let solver = BarrierFrankWolfe::new(FrankWolfe::default(), scenario_config());
    let result = solver.solve(&OVERPRICED, &ExclusiveOracle, None).unwrap();
    let exact = project_simplex(&OVERPRICED).unwrap();

    assert_vec_close(result.mu(), &exact.mu, 1e-5);
}

#[test]
fn barrier_contracts_toward_a_custom_center() {
    let config = BarrierConfig {
        center: Some(vec![0.6, 0.2, 0.2]),
        ..scenario_config()
    };
    let solver = BarrierFrankWolfe::new(FrankWolfe::default(), config);
    let result = solver.solve(&[0.2, 0.5, 0.1], &ExclusiveOracle, None).unwrap();

    assert!(result.mu().iter().all(|m| *m > 0.0 && *m < 1.0));
    assert!((result.mu().iter().sum::<f64>() - 1.0).abs() < 1e-9);
}

#[test]
fn projector_routes_polytopes_through_the_barrier() {
    let projector = support::projector().with_barrier(scenario_config());
    let projection = projector
        .project(&OVERPRICED, &FeasibleSet::Polytope(support::exclusive_oracle()))
        .unwrap();

    assert_eq!(projection.method, ProjectionMethod::Barrier);
    assert_eq!(projection.epsilons.as_ref().map(Vec::len), Some(31));
    assert!(projection.certified);
    assert!(projection.profit > 0.0);
}

#[test]
fn invalid_schedule_is_rejected() {
    let solver = BarrierFrankWolfe::new(
        FrankWolfe::new(FrankWolfeConfig::default()),
        BarrierConfig {
            initial_epsilon: 1.5,
            ..scenario_config()
        },
    );
    assert!(solver.solve(&OVERPRICED, &ExclusiveOracle, None).is_err());
}
