//! Numerical methods for solving differential equations
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Architecture
//!
//! A method only knows how to advance a state by one step. The loop around it
//! (time bookkeeping, recording, abort, divergence checks) lives in
//! [`FieldEvolver`](crate::solver::FieldEvolver), so adding a method never
//! duplicates the driver.
//!
//! # Available Methods
//!
//! - **[`RK4Solver`]**: Classical fourth-order Runge-Kutta
//!   - Order: Fourth-order O(dt⁴)
//!   - Cost: 4 function evaluations per step
//!   - Use: every production run
//!
//! - **[`EulerSolver`]**: Forward Euler method
//!   - Order: First-order O(dt)
//!   - Cost: 1 function evaluation per step
//!   - Use: cross-checks and benchmarks
//!
//! # Example
//!
//! ```rust
//! use arp_rs::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};
//! use arp_rs::solver::{EulerSolver, RK4Solver, Scenario, Solver, SolverConfiguration};
//!
//! struct Growth;
//!
//! impl PhysicalModel for Growth {
//!     fn points(&self) -> usize { 1 }
//!     fn compute_physics(&self, _t: f64, state: &PhysicalState) -> PhysicalState { state.clone() }
//!     fn setup_initial_state(&self) -> PhysicalState {
//!         PhysicalState::new(PhysicalQuantity::ScaleFactor, PhysicalData::Scalar(1.0))
//!     }
//!     fn name(&self) -> &str { "Growth" }
//! }
//!
//! # fn main() -> arp_rs::error::ArpResult<()> {
//! let scenario = Scenario::from_model(Box::new(Growth));
//! let config = SolverConfiguration::time_evolution(1.0, 100);
//!
//! let rk4 = RK4Solver::new().solve(&scenario, &config)?;
//! let euler = EulerSolver::new().solve(&scenario, &config)?;
//!
//! let exact = 1.0_f64.exp();
//! let rk4_error = (rk4.final_state.scalar(PhysicalQuantity::ScaleFactor).unwrap() - exact).abs();
//! let euler_error = (euler.final_state.scalar(PhysicalQuantity::ScaleFactor).unwrap() - exact).abs();
//! assert!(rk4_error < euler_error);
//! # Ok(())
//! # }
//! ```

pub mod euler;
mod rk4;

// Re-exports for convenience
pub use euler::EulerSolver;
pub use rk4::RK4Solver;
