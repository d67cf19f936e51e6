//! Output of simulation results
//!
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV tables for external analysis
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/      ← Plots
//! │   ├── config.rs
//! │   └── curves.rs
//! └── export/             ← Tables
//!     └── csv.rs
//! ```
//!
//! Writers return `Result<(), Box<dyn Error>>`. The pipelines in
//! [`simulation`](crate::simulation) wrap them into
//! [`ArpError::Output`](crate::error::ArpError::Output) and call them only for
//! converged runs.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use arp_rs::output::{export_rotation_curve_csv, plot_rotation_curve, CsvConfig};
//!
//! export_rotation_curve_csv(&curve, "rotation_curve.csv", &CsvConfig::default())?;
//! plot_rotation_curve(&curve, "rotation_curve.png", None)?;
//! ```

pub mod export;
pub mod visualization;

pub use visualization::{
    plot_acceleration_profile, plot_rotation_curve, plot_scale_factor, plot_series, PlotConfig,
};

pub use export::{
    export_columns_csv, export_evolution_csv, export_inflation_csv, export_rotation_curve_csv,
    CsvConfig, CsvMetadata,
};
