//! Data export
//!
//! Writers for tabular results. Only CSV is provided; every function returns
//! `Result<(), Box<dyn Error>>` and checks its input before touching the
//! filesystem.
//!
//! | Result type | Function |
//! |-------------|----------|
//! | `RotationCurve` | [`export_rotation_curve_csv`] |
//! | `CosmicEvolution` | [`export_evolution_csv`] |
//! | `InflationHistory` | [`export_inflation_csv`] |
//! | raw columns | [`export_columns_csv`] |

pub mod csv;

pub use csv::{
    export_columns_csv, export_evolution_csv, export_inflation_csv, export_rotation_curve_csv,
    format_number, CsvConfig, CsvMetadata, Notation,
};
