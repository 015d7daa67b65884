mod support;

use std::io::Write;

use cohere::application::solver::LineSearch;
use cohere::domain::FeasibleSet;
use cohere::error::{ConfigError, Error};
use cohere::infrastructure::config::settings::Config;
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn config_loads_every_section() {
    let file = write_temp_config(
        r#"
[logging]
level = "debug"
format = "json"

[solver]
epsilon = 1e-9
max_iterations = 80
convergence_threshold = 1e-7
num_trials = 30
line_search = "grid"

[barrier]
initial_epsilon = 0.2
epsilon_reduction = 0.5
min_epsilon = 0.01

[backend]
max_outer_iterations = 20
max_inner_iterations = 300
tolerance = 1e-7
constraint_tolerance = 1e-6

[trade]
liquidity = 50.0
min_shares = "0.5"
"#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.logging.format, "json");
    let frank_wolfe = config.solver.frank_wolfe();
    assert_eq!(frank_wolfe.max_iterations, 80);
    assert_eq!(frank_wolfe.line_search, LineSearch::Grid { num_trials: 30 });
    assert_eq!(config.barrier.barrier().schedule().len(), 5);
    assert_eq!(config.backend.augmented_lagrangian().max_inner_iterations, 300);
    assert_eq!(config.trade.min_shares, dec!(0.5));
}

#[test]
fn config_rejects_small_line_search_grid() {
    let file = write_temp_config("[solver]\nnum_trials = 1\n");

    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "num_trials",
            ..
        })) => {}
        Err(err) => panic!("Expected num_trials error, got {err}"),
        Ok(config) => panic!(
            "Expected num_trials to be rejected, got {}",
            config.solver.num_trials
        ),
    }
}

#[test]
fn config_rejects_non_positive_liquidity() {
    let file = write_temp_config("[trade]\nliquidity = 0.0\n");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "liquidity",
            ..
        }))
    ));
}

#[test]
fn config_rejects_zero_iterations() {
    let file = write_temp_config("[solver]\nmax_iterations = 0\n");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "max_iterations",
            ..
        }))
    ));
}

#[test]
fn config_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn config_reports_malformed_toml() {
    let file = write_temp_config("[solver\nmax_iterations = 3\n");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn configured_projector_honors_iteration_budget() {
    let config = Config::parse_toml("[solver]\nmax_iterations = 1\n").unwrap();
    let projection = config
        .projector(false)
        .project(&[0.2, 0.5, 0.1], &FeasibleSet::Polytope(support::exclusive_oracle()))
        .unwrap();

    assert!(!projection.certified);
    assert_eq!(projection.solve.unwrap().iterations, 1);
}
