//! Integration tests: physics module + solver module
//!
//! These tests verify that models, the evolver and the stepping methods
//! work correctly together.

use arp_rs::error::ArpError;
use arp_rs::physics::PhysicalModel;
use arp_rs::solver::{
    AbortHandle, EulerSolver, EvolverPhase, FieldEvolver, RK4Solver, RecordPolicy, RunStatus,
    Solver, SolverConfiguration,
};

mod common;
use common::{
    create_simple_scenario, final_value, relative_error, ConstantGrowth, ExponentialDecay,
    LateBlowup, Y,
};

// =================================================================================================
// Basic Integration Tests
// =================================================================================================

#[test]
fn test_euler_with_exponential_decay() {
    let scenario = create_simple_scenario(Box::new(ExponentialDecay::new(5, 0.1)));
    let config = SolverConfiguration::time_evolution(10.0, 1000);
    let result = EulerSolver::new().solve(&scenario, &config).unwrap();

    assert_eq!(result.time_points.len(), 1001);
    assert!(result.time_points[0].abs() < 1e-10);
    assert!((result.time_points.last().unwrap() - 10.0).abs() < 1e-10);

    // Euler with dt=0.01 should have ~1% error
    let error = relative_error(final_value(&result, Y), (-1.0f64).exp());
    assert!(error < 0.02, "Error {} too large", error);
}

#[test]
fn test_rk4_with_exponential_decay() {
    let scenario = create_simple_scenario(Box::new(ExponentialDecay::new(5, 0.1)));
    let config = SolverConfiguration::time_evolution(10.0, 100);
    let result = RK4Solver::new().solve(&scenario, &config).unwrap();

    let error = relative_error(final_value(&result, Y), (-1.0f64).exp());
    assert!(error < 1e-5, "Error {} too large for RK4", error);
}

#[test]
fn test_euler_is_exact_for_constant_growth() {
    let scenario = create_simple_scenario(Box::new(ConstantGrowth::new(3, 2.0)));
    let config = SolverConfiguration::time_evolution(5.0, 10);
    let result = EulerSolver::new().solve(&scenario, &config).unwrap();

    assert!((final_value(&result, Y) - 10.0).abs() < 1e-10);
}

#[test]
fn test_start_time_shifts_time_points() {
    let scenario = create_simple_scenario(Box::new(ConstantGrowth::new(1, 1.0)));
    let config = SolverConfiguration::time_evolution(2.0, 4).with_start_time(10.0);
    let result = RK4Solver.solve(&scenario, &config).unwrap();

    assert_eq!(result.time_points, vec![10.0, 10.5, 11.0, 11.5, 12.0]);
    assert!((result.final_time - 12.0).abs() < 1e-12);
}

#[test]
fn test_final_only_keeps_initial_and_final() {
    let scenario = create_simple_scenario(Box::new(ExponentialDecay::new(3, 1.0)));
    let config =
        SolverConfiguration::time_evolution(1.0, 50).with_recording(RecordPolicy::FinalOnly);
    let result = RK4Solver.solve(&scenario, &config).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.state_trajectory[1], result.final_state);
}

// =================================================================================================
// Abort and divergence
// =================================================================================================

#[test]
fn test_pre_raised_abort_returns_initial_state() {
    let scenario = create_simple_scenario(Box::new(ExponentialDecay::new(4, 1.0)));
    let config = SolverConfiguration::time_evolution(1.0, 100);
    let handle = AbortHandle::new();
    handle.abort();

    let mut evolver = FieldEvolver::new(&RK4Solver, &scenario, &config)
        .unwrap()
        .with_abort_handle(handle.clone());
    let result = evolver.run().unwrap();

    assert_eq!(evolver.phase(), EvolverPhase::Aborted);
    assert_eq!(result.status, RunStatus::Aborted { completed_steps: 0 });
    assert_eq!(result.final_state, scenario.initial);
    assert!(!result.is_converged());
    assert!(handle.is_aborted());
}

#[test]
fn test_divergence_reports_step() {
    // Euler evaluates the slope at t_n only: t_4 = 0.4 is the first past 0.35
    let scenario = create_simple_scenario(Box::new(LateBlowup { threshold: 0.35 }));
    let config = SolverConfiguration::time_evolution(1.0, 10);

    let mut evolver = FieldEvolver::new(&EulerSolver, &scenario, &config).unwrap();
    match evolver.run() {
        Err(ArpError::NumericalDivergence {
            step,
            quantity,
            index,
            value,
            ..
        }) => {
            assert_eq!(step, 5);
            assert_eq!(quantity, "y");
            assert_eq!(index, 0);
            assert!(value.is_infinite());
        }
        other => panic!("expected divergence, got {:?}", other.map(|r| r.len())),
    }
    assert_eq!(evolver.phase(), EvolverPhase::Diverged);
}

// =================================================================================================
// Error Detection Tests
// =================================================================================================

#[test]
fn test_solver_detects_invalid_config() {
    let scenario = create_simple_scenario(Box::new(ConstantGrowth::new(5, 1.0)));

    let zero_steps = SolverConfiguration::time_evolution(1.0, 0);
    assert!(matches!(
        EulerSolver.solve(&scenario, &zero_steps),
        Err(ArpError::Configuration(_))
    ));

    let negative_time = SolverConfiguration::time_evolution(-1.0, 10);
    assert!(matches!(
        RK4Solver.solve(&scenario, &negative_time),
        Err(ArpError::Configuration(_))
    ));
}

#[test]
fn test_initial_state_length_must_match_model() {
    let model = ConstantGrowth::new(5, 1.0);
    let wrong = ConstantGrowth::new(3, 1.0).setup_initial_state();
    let scenario = create_simple_scenario(Box::new(model)).with_initial_state(wrong);

    let config = SolverConfiguration::time_evolution(1.0, 10);
    assert!(matches!(
        RK4Solver.solve(&scenario, &config),
        Err(ArpError::Configuration(_))
    ));
}
