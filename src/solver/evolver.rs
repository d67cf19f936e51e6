//! Fixed-step integration driver
//!
//! # Lifecycle
//!
//! ```text
//!   Initialized ──run()──► Stepping ──all steps──► Converged
//!                              │
//!                              ├──abort requested──► Aborted
//!                              └──NaN / Inf───────► Diverged
//! ```
//!
//! The evolver owns the state for the duration of `run`. The only object
//! shared with other threads is the [`AbortHandle`].

use crate::error::{ArpError, ArpResult};
use crate::physics::PhysicalState;
use crate::solver::{
    validate_state, RunStatus, Scenario, SimulationResult, Solver, SolverConfiguration,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Upper bound on the trajectory buffers reserved before the first step
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;

// =================================================================================================
// Abort hook
// =================================================================================================

/// Cooperative cancellation flag
///
/// Cloning shares the flag. The evolver checks it once per step, before the
/// step is computed.
///
/// # Example
///
/// ```rust
/// use arp_rs::solver::AbortHandle;
///
/// let handle = AbortHandle::new();
/// let remote = handle.clone();
/// remote.abort();
/// assert!(handle.is_aborted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the run to stop
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// =================================================================================================
// Evolver
// =================================================================================================

/// Phase of a [`FieldEvolver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolverPhase {
    Initialized,
    Stepping,
    Converged,
    Aborted,
    Diverged,
}

/// Drives a stepping method over a scenario
///
/// # Example
///
/// ```rust
/// use arp_rs::models::AdaptiveCouplingModel;
/// use arp_rs::physics::{DiffusionOperator, Grid};
/// use arp_rs::solver::{EvolverPhase, FieldEvolver, RK4Solver, Scenario, SolverConfiguration};
/// use nalgebra::DVector;
///
/// let grid = Grid::uniform(1.0, 2.0, 4).unwrap();
/// let model = AdaptiveCouplingModel::new(
///     &DVector::from_element(4, 1.0), 1.0, 1.0, DiffusionOperator::disabled(&grid), 0.0,
/// );
/// let scenario = Scenario::from_model(Box::new(model));
/// let config = SolverConfiguration::time_evolution(1.0, 10);
///
/// let mut evolver = FieldEvolver::new(&RK4Solver, &scenario, &config).unwrap();
/// let result = evolver.run().unwrap();
///
/// assert_eq!(evolver.phase(), EvolverPhase::Converged);
/// assert!(result.is_converged());
/// ```
pub struct FieldEvolver<'a> {
    method: &'a dyn Solver,
    scenario: &'a Scenario,
    config: &'a SolverConfiguration,
    abort: Option<AbortHandle>,
    phase: EvolverPhase,
}

impl<'a> FieldEvolver<'a> {
    /// # Errors
    ///
    /// `ArpError::Configuration` if the configuration or the scenario is invalid.
    pub fn new(
        method: &'a dyn Solver,
        scenario: &'a Scenario,
        config: &'a SolverConfiguration,
    ) -> ArpResult<Self> {
        config.validate()?;
        scenario.validate()?;

        Ok(Self {
            method,
            scenario,
            config,
            abort: None,
            phase: EvolverPhase::Initialized,
        })
    }

    /// Attach an abort handle
    pub fn with_abort_handle(mut self, handle: AbortHandle) -> Self {
        self.abort = Some(handle);
        self
    }

    pub fn phase(&self) -> EvolverPhase {
        self.phase
    }

    fn abort_requested(&self) -> bool {
        self.abort.as_ref().is_some_and(AbortHandle::is_aborted)
    }

    /// Run every configured step
    ///
    /// # Errors
    ///
    /// - `ArpError::Configuration` if the evolver already ran
    /// - `ArpError::NumericalDivergence` on the first non-finite value
    pub fn run(&mut self) -> ArpResult<SimulationResult> {
        if self.phase != EvolverPhase::Initialized {
            return Err(ArpError::config(format!(
                "evolver already ran (phase {:?})",
                self.phase
            )));
        }
        self.phase = EvolverPhase::Stepping;

        let scenario = self.scenario;
        let model = scenario.model.as_ref();
        let time_steps = self.config.time_steps;
        let dt = self.config.dt();
        let record = self.config.record;

        log::info!(
            "{}: {} steps of {} (dt = {:.6e}, t0 = {})",
            model.name(),
            time_steps,
            self.method.name(),
            dt,
            self.config.start_time
        );

        // ====== Setup ======

        let mut state = scenario.initial.clone();

        // Trajectories longer than the reservation grow on push
        let capacity = record.capacity(time_steps).min(MAX_PREALLOCATED_SAMPLES);
        let mut time_points = Vec::with_capacity(capacity);
        let mut state_trajectory: Vec<PhysicalState> = Vec::with_capacity(capacity);

        time_points.push(self.config.start_time);
        state_trajectory.push(state.clone());

        // ====== Time Integration ======

        let mut completed_steps = 0;
        let mut last_recorded = 0;

        for step in 0..time_steps {
            if self.abort_requested() {
                self.phase = EvolverPhase::Aborted;
                log::warn!(
                    "{}: aborted after {} of {} steps",
                    model.name(),
                    step,
                    time_steps
                );
                break;
            }

            let t = self.config.time_at(step);
            state = self.method.step(model, t, &state, dt);

            // t_{n+1} from the index, no accumulation
            let t_next = self.config.time_at(step + 1);

            if let Err(error) = validate_state(&state, step + 1, t_next) {
                self.phase = EvolverPhase::Diverged;
                log::error!("{}: {}", model.name(), error);
                return Err(error);
            }

            completed_steps = step + 1;

            if record.records(completed_steps, time_steps) {
                time_points.push(t_next);
                state_trajectory.push(state.clone());
                last_recorded = completed_steps;
            }
        }

        // ====== Build Result ======

        let final_time = self.config.time_at(completed_steps);
        let status = if self.phase == EvolverPhase::Aborted {
            if last_recorded != completed_steps {
                time_points.push(final_time);
                state_trajectory.push(state.clone());
            }
            RunStatus::Aborted { completed_steps }
        } else {
            self.phase = EvolverPhase::Converged;
            RunStatus::Converged
        };

        log::debug!(
            "{}: recorded {} samples, final t = {}",
            model.name(),
            time_points.len(),
            final_time
        );

        let mut result =
            SimulationResult::new(time_points, state_trajectory, state, final_time, status);

        result.add_metadata("model", model.name());
        result.add_metadata("solver", self.method.name());
        result.add_metadata("time steps", &time_steps.to_string());
        result.add_metadata("completed steps", &completed_steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &self.config.total_time.to_string());
        result.add_metadata(
            "function evaluations",
            &(self.method.evaluations_per_step() * completed_steps).to_string(),
        );

        log::info!("{}: finished with status {:?}", model.name(), result.status);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity};
    use crate::solver::{EulerSolver, RK4Solver, RecordPolicy};
    use std::sync::atomic::AtomicUsize;

    const Y: PhysicalQuantity = PhysicalQuantity::Custom("y");

    /// dy/dt = rate
    struct Linear {
        rate: f64,
    }

    impl PhysicalModel for Linear {
        fn points(&self) -> usize {
            1
        }

        fn compute_physics(&self, _time: f64, _state: &PhysicalState) -> PhysicalState {
            PhysicalState::new(Y, PhysicalData::Scalar(self.rate))
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(Y, PhysicalData::Scalar(0.0))
        }

        fn name(&self) -> &str {
            "Linear"
        }
    }

    /// dy/dt = t
    struct TimeRamp;

    impl PhysicalModel for TimeRamp {
        fn points(&self) -> usize {
            1
        }

        fn compute_physics(&self, time: f64, _state: &PhysicalState) -> PhysicalState {
            PhysicalState::new(Y, PhysicalData::Scalar(time))
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(Y, PhysicalData::Scalar(0.0))
        }

        fn name(&self) -> &str {
            "Ramp"
        }
    }

    /// dy/dt = 1, raising an abort on a given right-hand side evaluation
    struct AbortOnCall {
        handle: AbortHandle,
        trigger: usize,
        calls: AtomicUsize,
    }

    impl PhysicalModel for AbortOnCall {
        fn points(&self) -> usize {
            1
        }

        fn compute_physics(&self, _time: f64, _state: &PhysicalState) -> PhysicalState {
            if self.calls.fetch_add(1, Ordering::Relaxed) + 1 == self.trigger {
                self.handle.abort();
            }
            PhysicalState::new(Y, PhysicalData::Scalar(1.0))
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(Y, PhysicalData::Scalar(0.0))
        }

        fn name(&self) -> &str {
            "AbortOnCall"
        }
    }

    fn scenario(rate: f64) -> Scenario {
        Scenario::from_model(Box::new(Linear { rate }))
    }

    #[test]
    fn test_phase_transitions() {
        let scenario = scenario(1.0);
        let config = SolverConfiguration::time_evolution(1.0, 4);
        let mut evolver = FieldEvolver::new(&EulerSolver, &scenario, &config).unwrap();

        assert_eq!(evolver.phase(), EvolverPhase::Initialized);
        evolver.run().unwrap();
        assert_eq!(evolver.phase(), EvolverPhase::Converged);
        assert!(evolver.run().is_err());
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let scenario = scenario(1.0);
        let config = SolverConfiguration::time_evolution(1.0, 0);
        assert!(matches!(
            FieldEvolver::new(&EulerSolver, &scenario, &config),
            Err(ArpError::Configuration(_))
        ));
    }

    #[test]
    fn test_stride_recording() {
        let scenario = scenario(1.0);
        let config = SolverConfiguration::time_evolution(10.0, 10)
            .with_recording(RecordPolicy::Every(4));
        let result = EulerSolver.solve(&scenario, &config).unwrap();

        // initial, 4, 8, final
        assert_eq!(result.time_points, vec![0.0, 4.0, 8.0, 10.0]);
        assert_eq!(result.state_trajectory.len(), 4);
        assert_eq!(result.final_state.scalar(Y), Some(10.0));
    }

    #[test]
    fn test_final_only_recording() {
        let scenario = scenario(2.0);
        let config = SolverConfiguration::time_evolution(1.0, 100)
            .with_recording(RecordPolicy::FinalOnly);
        let result = RK4Solver.solve(&scenario, &config).unwrap();

        assert_eq!(result.len(), 2);
        assert!((result.final_time - 1.0).abs() < 1e-12);
        assert!((result.final_state.scalar(Y).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_start_time_is_passed_to_model() {
        let scenario = Scenario::from_model(Box::new(TimeRamp));
        let config = SolverConfiguration::time_evolution(1.0, 10).with_start_time(1.0);
        let result = RK4Solver.solve(&scenario, &config).unwrap();

        // y(2) - y(1) = (4 - 1) / 2, exact for RK4 on a linear rate
        assert!((result.final_state.scalar(Y).unwrap() - 1.5).abs() < 1e-12);
        assert_eq!(result.time_points[0], 1.0);
    }

    #[test]
    fn test_pre_raised_abort() {
        let scenario = scenario(1.0);
        let config = SolverConfiguration::time_evolution(1.0, 10);
        let handle = AbortHandle::new();
        handle.abort();

        let mut evolver = FieldEvolver::new(&RK4Solver, &scenario, &config)
            .unwrap()
            .with_abort_handle(handle);
        let result = evolver.run().unwrap();

        assert_eq!(evolver.phase(), EvolverPhase::Aborted);
        assert_eq!(result.status, RunStatus::Aborted { completed_steps: 0 });
        assert_eq!(result.final_state, scenario.initial);
        assert_eq!(result.len(), 1);
        assert_eq!(result.metadata.get("function evaluations"), Some(&"0".to_string()));
    }

    #[test]
    fn test_abort_during_run_keeps_last_state() {
        let handle = AbortHandle::new();
        // RK4 evaluates four times per step: call 12 ends step 3
        let scenario = Scenario::from_model(Box::new(AbortOnCall {
            handle: handle.clone(),
            trigger: 12,
            calls: AtomicUsize::new(0),
        }));
        let config = SolverConfiguration::time_evolution(10.0, 10)
            .with_recording(RecordPolicy::FinalOnly);

        let mut evolver = FieldEvolver::new(&RK4Solver, &scenario, &config)
            .unwrap()
            .with_abort_handle(handle);
        let result = evolver.run().unwrap();

        assert_eq!(evolver.phase(), EvolverPhase::Aborted);
        assert_eq!(result.status, RunStatus::Aborted { completed_steps: 3 });
        assert_eq!(result.final_state.scalar(Y), Some(3.0));
        assert_eq!(result.final_time, 3.0);
        assert_eq!(result.time_points, vec![0.0, 3.0]);
        assert_eq!(result.state_trajectory.len(), 2);
        assert_eq!(result.state_trajectory[1], result.final_state);
    }

    #[test]
    fn test_abort_with_huge_step_count() {
        let scenario = scenario(1.0);
        let config = SolverConfiguration::time_evolution(1.0, usize::MAX);
        let handle = AbortHandle::new();
        handle.abort();

        let mut evolver = FieldEvolver::new(&EulerSolver, &scenario, &config)
            .unwrap()
            .with_abort_handle(handle);
        let result = evolver.run().unwrap();

        assert_eq!(result.status, RunStatus::Aborted { completed_steps: 0 });
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_metadata() {
        let scenario = scenario(1.0);
        let config = SolverConfiguration::time_evolution(100.0, 500);
        let result = RK4Solver.solve(&scenario, &config).unwrap();

        assert_eq!(result.metadata.get("solver"), Some(&"Runge-Kutta 4".to_string()));
        assert_eq!(result.metadata.get("time steps"), Some(&"500".to_string()));
        assert_eq!(result.metadata.get("function evaluations"), Some(&"2000".to_string()));
        assert_eq!(result.metadata.get("model"), Some(&"Linear".to_string()));
    }

    #[test]
    fn test_divergence_reports_step() {
        let scenario = scenario(f64::INFINITY);
        let config = SolverConfiguration::time_evolution(1.0, 10);
        let mut evolver = FieldEvolver::new(&EulerSolver, &scenario, &config).unwrap();

        match evolver.run() {
            Err(ArpError::NumericalDivergence { step, quantity, index, .. }) => {
                assert_eq!(step, 1);
                assert_eq!(quantity, "y");
                assert_eq!(index, 0);
            }
            other => panic!("expected divergence, got {:?}", other),
        }
        assert_eq!(evolver.phase(), EvolverPhase::Diverged);
    }
}
