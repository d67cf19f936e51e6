//! arp-rs: Adaptive Effective-Coupling Field Simulation
//!
//! Numerical evolution of a scalar "effective coupling" field that relaxes
//! toward a baseline under a source proportional to the squared mass density,
//! optionally diffusing across a grid, and calibrated to match a known value
//! at one anchor point.
//!
//! Two formulations share one integrator:
//!
//! - **Spatial**: `G_eff(r)` over galactic radius, turned into a rotation curve
//!   (circular velocity and centripetal acceleration).
//! - **Temporal**: coupling channels as functions of cosmic time, driving the
//!   scale factor and a vacuum density.
//!
//! # Architecture
//!
//! 1. **Separation of Physics and Numerics**
//!    - Models ([`models`]) implement [`PhysicalModel`](physics::PhysicalModel):
//!      what to solve
//!    - Stepping methods ([`solver`]) implement [`Solver`](solver::Solver):
//!      how to advance one step
//!    - One driver ([`FieldEvolver`](solver::FieldEvolver)) owns the loop
//!
//! 2. **Fail fast, write late**
//!    - Configurations are validated on load ([`config`])
//!    - Artifacts ([`output`]) are written only for converged runs
//!
//! # Quick Start
//!
//! ```rust
//! use arp_rs::config::GalaxyConfig;
//! use arp_rs::physics::PhysicalConstants;
//! use arp_rs::simulation::GalaxySimulation;
//!
//! # fn main() -> arp_rs::error::ArpResult<()> {
//! let config = GalaxyConfig::from_json_str(r#"{
//!     "mass":   { "Mb": 1.0e10, "a_bulge": 1.0 },
//!     "arp":    { "mu": 4.376, "steps_per_period": 100 },
//!     "grid":   { "r_min": 0.01, "r_max": 40.0, "nr": 50 },
//!     "anchor": { "R0": 8.0, "V0": 220.0 }
//! }"#)?;
//!
//! let curve = GalaxySimulation::new(config, PhysicalConstants::default())?.run()?;
//!
//! assert_eq!(curve.len(), 50);
//! assert!(curve.velocity.iter().all(|v| v.is_finite()));
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: state containers, grid, constants, diffusion, kinematics
//! - [`models`]: density profiles and the coupling models
//! - [`calibration`]: anchor calibration of the reaction gain
//! - [`solver`]: stepping methods and the evolver
//! - [`simulation`]: configuration-to-result pipelines
//! - [`config`]: JSON parameter files
//! - [`output`]: CSV export and plots
//! - [`error`]: error taxonomy

pub mod calibration;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod physics;
pub mod simulation;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use arp_rs::prelude::*;
    //! ```
    pub use crate::error::{ArpError, ArpResult};
    pub use crate::physics::{
        PhysicalConstants, PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState,
    };
    pub use crate::simulation::{CosmologySimulation, GalaxySimulation, InflationSimulation};
    pub use crate::solver::{
        AbortHandle, EulerSolver, RK4Solver, RecordPolicy, Scenario, SimulationResult, Solver,
        SolverConfiguration,
    };
}
