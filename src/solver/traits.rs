//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - `Solver` is a *stepping method*: it advances a state by one time step.
//! - `FieldEvolver` owns the loop (validation, time bookkeeping, recording,
//!   abort, divergence checks), so every method shares one driver.
//! - `SolverConfiguration` says how long and how finely to integrate.
//! - `SimulationResult` carries the recorded trajectory and the final state.

use crate::error::{ArpError, ArpResult};
use crate::physics::{PhysicalModel, PhysicalQuantity, PhysicalState};
use crate::solver::{FieldEvolver, Scenario};
use ndarray::Array2;
use std::collections::HashMap;

// =================================================================================================
// Solver trait
// =================================================================================================

/// A one-step time integration scheme
///
/// # Implementing a New Method
///
/// ```rust
/// use arp_rs::physics::{PhysicalModel, PhysicalState};
/// use arp_rs::solver::Solver;
///
/// /// Explicit midpoint rule
/// struct Midpoint;
///
/// impl Solver for Midpoint {
///     fn step(&self, model: &dyn PhysicalModel, time: f64, state: &PhysicalState, dt: f64) -> PhysicalState {
///         let k1 = model.compute_physics(time, state);
///         let mid = state.clone() + k1 * (dt / 2.0);
///         let k2 = model.compute_physics(time + dt / 2.0, &mid);
///         state.clone() + k2 * dt
///     }
///
///     fn evaluations_per_step(&self) -> usize { 2 }
///
///     fn name(&self) -> &str { "Midpoint" }
/// }
/// ```
pub trait Solver: Send + Sync {
    /// Advance `state` from `time` to `time + dt`
    fn step(
        &self,
        model: &dyn PhysicalModel,
        time: f64,
        state: &PhysicalState,
        dt: f64,
    ) -> PhysicalState;

    /// Right-hand side evaluations per step (reported in metadata)
    fn evaluations_per_step(&self) -> usize;

    /// Solver name (used in metadata and logs)
    fn name(&self) -> &str;

    /// Integrate a scenario to the end with this method
    ///
    /// # Errors
    ///
    /// - `ArpError::Configuration` if the configuration or the scenario is invalid
    /// - `ArpError::NumericalDivergence` if NaN/Inf appears in the state
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> ArpResult<SimulationResult>
    where
        Self: Sized,
    {
        FieldEvolver::new(self, scenario, config)?.run()
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Which intermediate states a run keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPolicy {
    /// Initial state, every `stride`-th step, and the last step
    Every(usize),

    /// Initial and final state only
    FinalOnly,
}

impl Default for RecordPolicy {
    fn default() -> Self {
        RecordPolicy::Every(1)
    }
}

impl RecordPolicy {
    /// Whether the state after step `step` (1-based) of `total` is kept
    pub fn records(&self, step: usize, total: usize) -> bool {
        if step == total {
            return true;
        }
        match self {
            RecordPolicy::Every(stride) => *stride > 0 && step % stride == 0,
            RecordPolicy::FinalOnly => false,
        }
    }

    /// Number of samples recorded by a complete run of `total` steps
    ///
    /// Saturates at `usize::MAX`.
    pub fn capacity(&self, total: usize) -> usize {
        match self {
            RecordPolicy::Every(stride) if *stride > 0 => {
                let strided = total / stride;
                let extra = usize::from(total % stride != 0);
                strided.saturating_add(extra).saturating_add(1)
            }
            _ => 2,
        }
    }
}

/// Fixed-step time integration settings
///
/// # Examples
///
/// ```rust
/// use arp_rs::solver::{RecordPolicy, SolverConfiguration};
///
/// // 600 time units in 1000 steps
/// let config = SolverConfiguration::time_evolution(600.0, 1000);
/// assert_eq!(config.dt(), 0.6);
///
/// // Two periods of 0.5, 800 steps per period, keep only the end
/// let config = SolverConfiguration::from_periods(0.5, 2.0, 800)
///     .with_recording(RecordPolicy::FinalOnly);
/// assert_eq!(config.time_steps, 1600);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Length of the integration interval
    pub total_time: f64,

    /// Number of fixed steps
    pub time_steps: usize,

    /// Value of the independent variable at the initial state
    pub start_time: f64,

    pub record: RecordPolicy,
}

impl SolverConfiguration {
    /// Create a time evolution configuration starting at t = 0
    pub fn time_evolution(total_time: f64, time_steps: usize) -> Self {
        Self {
            total_time,
            time_steps,
            start_time: 0.0,
            record: RecordPolicy::default(),
        }
    }

    /// Integrate over `total_periods` periods with `steps_per_period` steps each
    ///
    /// The step count is rounded to the nearest integer, so
    /// `dt = period * total_periods / time_steps`.
    pub fn from_periods(period: f64, total_periods: f64, steps_per_period: usize) -> Self {
        let steps = (total_periods * steps_per_period as f64).round();
        let time_steps = if steps.is_finite() && steps > 0.0 {
            steps as usize
        } else {
            0
        };
        Self::time_evolution(period * total_periods, time_steps)
    }

    pub fn with_start_time(mut self, start_time: f64) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_recording(mut self, record: RecordPolicy) -> Self {
        self.record = record;
        self
    }

    /// Step size
    pub fn dt(&self) -> f64 {
        self.total_time / self.time_steps as f64
    }

    /// Time reached after `step` steps, computed from the index
    pub fn time_at(&self, step: usize) -> f64 {
        self.start_time + step as f64 * self.dt()
    }

    /// Validate configuration
    pub fn validate(&self) -> ArpResult<()> {
        if !self.total_time.is_finite() || self.total_time <= 0.0 {
            return Err(ArpError::config(format!(
                "total time must be positive and finite, got {}",
                self.total_time
            )));
        }
        if self.time_steps == 0 {
            return Err(ArpError::config("time steps must be greater than 0"));
        }
        if !self.start_time.is_finite() {
            return Err(ArpError::config("start time must be finite"));
        }
        if self.record == RecordPolicy::Every(0) {
            return Err(ArpError::config("recording stride must be at least 1"));
        }
        Ok(())
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every configured step was performed
    Converged,

    /// Stopped by an abort request after `completed_steps` steps
    Aborted { completed_steps: usize },
}

/// Output of a run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Times of the recorded samples
    pub time_points: Vec<f64>,

    /// Recorded states, aligned with `time_points`
    pub state_trajectory: Vec<PhysicalState>,

    /// Last computed state
    pub final_state: PhysicalState,

    /// Time of `final_state`
    pub final_time: f64,

    pub status: RunStatus,

    /// Run information (solver, steps, dt, ...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    pub fn new(
        time_points: Vec<f64>,
        state_trajectory: Vec<PhysicalState>,
        final_state: PhysicalState,
        final_time: f64,
        status: RunStatus,
    ) -> Self {
        Self {
            time_points,
            state_trajectory,
            final_state,
            final_time,
            status,
            metadata: HashMap::new(),
        }
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    pub fn is_converged(&self) -> bool {
        self.status == RunStatus::Converged
    }

    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Recorded samples of one quantity, one row per sample
    ///
    /// Returns `None` if a sample lacks the quantity or if the samples differ
    /// in length.
    pub fn quantity_history(&self, quantity: PhysicalQuantity) -> Option<Array2<f64>> {
        let first = self.state_trajectory.first()?.get(quantity)?;
        let columns = first.len();

        let mut values = Vec::with_capacity(self.state_trajectory.len() * columns);
        for state in &self.state_trajectory {
            let data = state.get(quantity)?;
            if data.len() != columns {
                return None;
            }
            values.extend_from_slice(data.as_slice());
        }

        Array2::from_shape_vec((self.state_trajectory.len(), columns), values).ok()
    }
}
