//! Physical models of the adaptive coupling
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait.
//! The solver calls `compute_physics` at each stage of each time step: models are
//! responsible for the physics (reaction, relaxation, diffusion, expansion), the
//! solver for the time integration.
//!
//! # Available Models
//!
//! ## [`AdaptiveCouplingModel`]: spatial field
//!
//! The effective coupling sampled on a radial grid, sourced by the squared
//! density of a [`DensityModel`] and relaxing toward its calibrated steady state.
//! The converged field feeds the rotation-curve kinematics.
//!
//! ## [`CosmologyModel`]: temporal system
//!
//! Scale factor, two coupling channels and a holographic density evolved together.
//!
//! ## [`VacuumInflationModel`]: single-channel inflation
//!
//! Scale factor driven by a decaying vacuum energy and a suppressed coupling.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod cosmology;
pub mod density;
pub mod galaxy;
pub mod inflation;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use cosmology::{CosmicEvolution, CosmologyInitial, CosmologyModel, CosmologyParameters};
pub use density::{DensityComponents, DensityField, DensityModel, MassProfile};
pub use galaxy::{AdaptiveCouplingModel, RotationCurve};
pub use inflation::{InflationHistory, InflationParameters, VacuumInflationModel};
