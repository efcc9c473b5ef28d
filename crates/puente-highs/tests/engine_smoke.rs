//! Smoke tests for the raw engine handle, below the session layer.

use puente_core::ObjectiveSense;
use puente_highs::{engine_version, EngineError, EngineStatus, HighsEngine};

#[test]
fn test_engine_round_trip() {
    // Initialize tracing for diagnostics
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    // Minimize x with bounds [1, infinity): the optimum rests at 1.
    let mut engine = HighsEngine::new().expect("failed to acquire engine");
    engine
        .set_bool_option(c"output_flag", false)
        .expect("failed to silence engine");
    engine
        .set_int_option(c"random_seed", 7)
        .expect("failed to seed engine");
    engine
        .pass_mip(
            1,
            0,
            ObjectiveSense::Minimize,
            &[1.0],
            &[1.0],
            &[f64::INFINITY],
            &[],
            &[],
            &[0, 0],
            &[],
            &[],
            &[false],
        )
        .expect("failed to load model");
    assert_eq!(engine.num_variables(), 1);
    assert_eq!(engine.num_constraints(), 0);

    engine.run().expect("failed to run solve");
    assert_eq!(engine.model_status(), EngineStatus::Optimal);
    assert!(engine.has_primal_solution());

    let objective = engine.objective_value();
    assert!(
        (objective - 1.0).abs() < 1e-6,
        "Expected objective ~1.0, got {}",
        objective
    );
    let solution = engine.primal_solution(1, 0).expect("missing solution");
    assert!(
        (solution[0] - 1.0).abs() < 1e-6,
        "Expected x ~1.0, got {}",
        solution[0]
    );
}

#[test]
fn test_integer_variable_is_enforced() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    // Maximize an integer x subject to x <= 1.5: rounding is not allowed,
    // so the engine must settle on 1.
    let mut engine = HighsEngine::new().expect("failed to acquire engine");
    engine
        .set_bool_option(c"output_flag", false)
        .expect("failed to silence engine");
    engine
        .pass_mip(
            1,
            1,
            ObjectiveSense::Maximize,
            &[1.0],
            &[0.0],
            &[10.0],
            &[f64::NEG_INFINITY],
            &[1.5],
            &[0, 1],
            &[0],
            &[1.0],
            &[true],
        )
        .expect("failed to load model");
    engine.run().expect("failed to run solve");
    assert_eq!(engine.model_status(), EngineStatus::Optimal);

    let solution = engine.primal_solution(1, 1).expect("missing solution");
    assert!(
        (solution[0] - 1.0).abs() < 1e-6,
        "Expected integer x = 1.0, got {}",
        solution[0]
    );
}

#[test]
fn test_info_values_are_readable_after_run() {
    let mut engine = HighsEngine::new().expect("failed to acquire engine");
    engine
        .set_bool_option(c"output_flag", false)
        .expect("failed to silence engine");
    engine
        .pass_mip(
            1,
            0,
            ObjectiveSense::Minimize,
            &[1.0],
            &[0.0],
            &[10.0],
            &[],
            &[],
            &[0, 0],
            &[],
            &[],
            &[true],
        )
        .expect("failed to load model");
    engine.run().expect("failed to run solve");

    let nodes = engine
        .int64_info(c"mip_node_count")
        .expect("missing node count");
    assert!(nodes >= 0, "Expected non-negative node count, got {}", nodes);
    assert!(engine.double_info(c"mip_gap").is_some());
    assert!(engine.int_info(c"primal_solution_status").is_some());
}

#[test]
fn test_unknown_option_is_rejected() {
    let mut engine = HighsEngine::new().expect("failed to acquire engine");
    let err = engine
        .set_int_option(c"no_such_option", 1)
        .expect_err("unknown option must be rejected");
    assert!(matches!(err, EngineError::Call { .. }));
}

#[test]
fn test_version_is_reported() {
    let version = engine_version().expect("missing version string");
    assert!(!version.is_empty());
    assert!(
        version.chars().next().is_some_and(|c| c.is_ascii_digit()),
        "Expected a numeric version, got {}",
        version
    );
}
