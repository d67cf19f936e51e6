//! Simulation scenario definition
//!
//! A scenario combines a physical model with the state it starts from.

use crate::error::{ArpError, ArpResult};
use crate::physics::traits::{PhysicalModel, PhysicalState};

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Physical model (equations)
/// - Initial state
///
/// # Design
///
/// The same scenario can be solved with different numerical methods.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust,ignore
/// let scenario = Scenario::from_model(model);
///
/// let rk4 = RK4Solver.solve(&scenario, &config)?;
/// let euler = EulerSolver.solve(&scenario, &config)?;
/// ```
pub struct Scenario {
    /// Physical model (equations)
    pub model: Box<dyn PhysicalModel>,

    /// State at the start time
    pub initial: PhysicalState,
}

impl Scenario {
    /// Create a scenario with an explicit initial state
    pub fn new(model: Box<dyn PhysicalModel>, initial: PhysicalState) -> Self {
        Self { model, initial }
    }

    /// Create a scenario starting from the model's own initial state
    pub fn from_model(model: Box<dyn PhysicalModel>) -> Self {
        let initial = model.setup_initial_state();
        Self { model, initial }
    }

    /// Replace the initial state
    pub fn with_initial_state(mut self, initial: PhysicalState) -> Self {
        self.initial = initial;
        self
    }

    /// Check the initial state against the model
    ///
    /// The state must hold at least one quantity, every value must be finite,
    /// and vector quantities must have one entry per model point.
    pub fn validate(&self) -> ArpResult<()> {
        if self.initial.is_empty() {
            return Err(ArpError::config(format!(
                "initial state of {} is empty",
                self.model.name()
            )));
        }

        let points = self.model.points();
        for quantity in self.initial.available_quantities() {
            if let Some(data) = self.initial.get(quantity) {
                if data.is_vector() && data.len() != points {
                    return Err(ArpError::config(format!(
                        "{} has {} values but {} expects {} points",
                        quantity,
                        data.len(),
                        self.model.name(),
                        points
                    )));
                }
            }
        }

        if let Some((quantity, index, value)) = self.initial.first_non_finite() {
            return Err(ArpError::config(format!(
                "initial {}[{}] is not finite ({})",
                quantity, index, value
            )));
        }

        Ok(())
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.get_model_name())
            .field("points", &self.model.points())
            .field("quantities", &self.initial.available_quantities())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
