//! Physical models
//!
//! This module provides the building blocks shared by every model:
//! traits, state containers, the sampling grid, the diffusion operator,
//! constants and the kinematic derivation.
//!
//! # Core Concepts
//!
//! - **Physical Model**: Computes the time derivative of the state
//! - **Physical State**: Container for all evolving quantities (coupling, scale factor, etc.)
//! - **Physical Quantity**: Type-safe identifier for physical variables
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to solve them (numerics)
//!
//! The same RK4 integrator therefore advances a field of N grid points and a
//! system of four cosmological scalars.
//!
//! # Implementing a New Physical Model
//!
//! ```rust
//! use arp_rs::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};
//!
//! /// dy/dt = -k y
//! struct Decay {
//!     rate: f64,
//! }
//!
//! impl PhysicalModel for Decay {
//!     fn points(&self) -> usize {
//!         1
//!     }
//!
//!     fn compute_physics(&self, _time: f64, state: &PhysicalState) -> PhysicalState {
//!         let y = state.scalar(PhysicalQuantity::Custom("y")).unwrap_or(0.0);
//!         PhysicalState::new(PhysicalQuantity::Custom("y"), PhysicalData::Scalar(-self.rate * y))
//!     }
//!
//!     fn setup_initial_state(&self) -> PhysicalState {
//!         PhysicalState::new(PhysicalQuantity::Custom("y"), PhysicalData::Scalar(1.0))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Decay"
//!     }
//! }
//!
//! let model = Decay { rate: 0.5 };
//! let rate = model.compute_physics(0.0, &model.setup_initial_state());
//! assert_eq!(rate.scalar(PhysicalQuantity::Custom("y")), Some(-0.5));
//! ```

// module declaration
pub mod constants;
pub mod data;
pub mod diffusion;
pub mod grid;
pub mod kinematics;
pub mod traits;

// re-export commonly used types for convenience
pub use constants::PhysicalConstants;
pub use data::PhysicalData;
pub use diffusion::DiffusionOperator;
pub use grid::Grid;
pub use traits::{PhysicalModel, PhysicalQuantity, PhysicalState};
