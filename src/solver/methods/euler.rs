//! Forward Euler numerical solver
//!
//! # Mathematical Background
//!
//! ```text
//! y_{n+1} = y_n + dt * f(t_n, y_n)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: First-order accurate (error ~ O(dt))
//! - **Stability**: Conditionally stable (`μ dt < 2` for the relaxation term)
//! - **Complexity**: 1 function evaluation per step
//!
//! Used to cross-check RK4 runs: both methods share the same driver, so any
//! difference between them is purely numerical.

use crate::physics::{PhysicalModel, PhysicalState};
use crate::solver::Solver;

// =================================================================================================
// Forward Euler Solver
// =================================================================================================

/// Forward Euler time-stepping solver
///
/// # Example
///
/// ```rust
/// use arp_rs::solver::{EulerSolver, Solver};
///
/// assert_eq!(EulerSolver.name(), "Forward Euler");
/// assert_eq!(EulerSolver.evaluations_per_step(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
    fn step(
        &self,
        model: &dyn PhysicalModel,
        time: f64,
        state: &PhysicalState,
        dt: f64,
    ) -> PhysicalState {
        let slope = model.compute_physics(time, state);
        state.clone() + slope * dt
    }

    fn evaluations_per_step(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
