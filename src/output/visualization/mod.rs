//! Visualization of simulation results
//!
//! Static PNG/SVG plots rendered with `plotters`.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`) and presets
//! - **curves**: Rotation curve, acceleration profile and scale factor plots
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use arp_rs::output::visualization::{plot_acceleration_profile, plot_rotation_curve};
//! use arp_rs::physics::PhysicalConstants;
//!
//! plot_rotation_curve(&curve, "rotation_curve.png", None)?;
//! plot_acceleration_profile(&curve, &PhysicalConstants::default(), "acceleration_profile.png", None)?;
//! ```

pub mod config;
pub mod curves;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};

pub use curves::{plot_acceleration_profile, plot_rotation_curve, plot_scale_factor, plot_series};
