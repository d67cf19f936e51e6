//! Numerical solvers
//!
//! This module provides the time integration machinery. A stepping method is
//! applied to the equations of a physical model within a specific scenario.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (equations)
//!    - Initial state
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Total time, number of steps, start time
//!    - Recording policy
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - One step of the scheme, independent of physics
//!
//! 4. **Driver** (`FieldEvolver`) - The loop
//!    - Phases, finiteness checks, trajectory, abort hook
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │  Physical Model │  (equations)
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Scenario        │ ← WHAT to solve
//! │ (model + y₀)    │
//! └────────┬────────┘
//!          │        ┌──────────────────────┐
//!          │        │ Solver Configuration │ ← HOW to solve
//!          │        └──────────┬───────────┘
//! ┌────────▼───────────────────▼───┐
//! │ FieldEvolver + Solver (RK4...) │ ← The method
//! └────────┬───────────────────────┘
//!          │
//! ┌────────▼────────────┐
//! │ Simulation Result   │ ← The solution
//! │ (trajectory + meta) │
//! └─────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use arp_rs::models::{CosmologyInitial, CosmologyModel, CosmologyParameters};
//! use arp_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration};
//!
//! # fn main() -> arp_rs::error::ArpResult<()> {
//! let parameters: CosmologyParameters = serde_json::from_str(
//!     r#"{"Om": 0.3, "Or": 0.0, "lambda_h": 0.0, "alpha_c": 0.0, "mu_c": 0.0, "beta_h": 0.0,
//!         "a_c": 1.0, "gamma_h": 0.0, "kappa": 0.0, "rho_holo": 0.0, "Lp2": 1.0}"#,
//! ).unwrap();
//! let model = CosmologyModel::new(parameters, CosmologyInitial::default())?;
//!
//! let scenario = Scenario::from_model(Box::new(model));
//! let config = SolverConfiguration::time_evolution(1.0, 100);
//! let result = RK4Solver.solve(&scenario, &config)?;
//!
//! assert_eq!(result.len(), 101);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every entry point returns [`ArpResult`](crate::error::ArpResult):
//! - invalid configuration or scenario → `ArpError::Configuration`
//! - NaN/Inf after a step → `ArpError::NumericalDivergence`

// =================================================================================================
// Module Declarations
// =================================================================================================
mod evolver;
mod methods;
mod scenario;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use evolver::{AbortHandle, EvolverPhase, FieldEvolver};
pub use methods::{EulerSolver, RK4Solver};
pub use scenario::Scenario;
pub use traits::{RecordPolicy, RunStatus, SimulationResult, Solver, SolverConfiguration};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{ArpError, ArpResult};
use crate::physics::PhysicalState;

/// Validate physical state for numerical issues
///
/// Checks that the state does not contain NaN or Inf values, which would
/// indicate numerical instability or errors in the physics computation.
///
/// # Arguments
///
/// * `state` - Physical state to validate
/// * `step` - Step that produced the state (for error reporting)
/// * `time` - Time of the state
///
/// # Returns
///
/// `Ok(())` if state is valid, `ArpError::NumericalDivergence` naming the first
/// offending value otherwise.
pub(crate) fn validate_state(state: &PhysicalState, step: usize, time: f64) -> ArpResult<()> {
    match state.first_non_finite() {
        None => Ok(()),
        Some((quantity, index, value)) => Err(ArpError::NumericalDivergence {
            step,
            time,
            quantity: quantity.to_string(),
            index,
            value,
        }),
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicalData, PhysicalQuantity};

    #[test]
    fn test_validate_finite_state() {
        let state = PhysicalState::new(
            PhysicalQuantity::Coupling,
            PhysicalData::from_vec(vec![1.0, 2.0]),
        );
        assert!(validate_state(&state, 1, 0.1).is_ok());
    }

    #[test]
    fn test_validate_detects_nan() {
        let state = PhysicalState::new(
            PhysicalQuantity::Coupling,
            PhysicalData::from_vec(vec![1.0, f64::NAN]),
        );

        match validate_state(&state, 7, 0.7) {
            Err(ArpError::NumericalDivergence {
                step,
                quantity,
                index,
                value,
                ..
            }) => {
                assert_eq!(step, 7);
                assert_eq!(quantity, "Coupling");
                assert_eq!(index, 1);
                assert!(value.is_nan());
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
