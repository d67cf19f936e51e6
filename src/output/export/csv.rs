//! CSV export for simulation results
//!
//! Every writer in this module works column-wise: a list of headers and one
//! slice of values per header. The domain helpers
//! ([`export_rotation_curve_csv`], [`export_evolution_csv`],
//! [`export_inflation_csv`]) only pick the columns of their result type and
//! delegate to [`export_columns_csv`].
//!
//! All data is validated before the output file is created: a failed export
//! never leaves a truncated file behind.
//!
//! # Example
//!
//! ```rust,ignore
//! use arp_rs::output::export::{export_rotation_curve_csv, CsvConfig, CsvMetadata};
//!
//! let mut config = CsvConfig::default();
//! config.metadata = Some(CsvMetadata::new("Adaptive Coupling", "Runge-Kutta 4"));
//! export_rotation_curve_csv(&curve, "out/rotation_curve.csv", &config)?;
//! ```
//!
//! Produces:
//!
//! ```text
//! # Adaptive Coupling Simulation Data
//! # Generated: 2026-03-14T09:12:44.512+00:00
//! # Model: Adaptive Coupling
//! # Solver: Runge-Kutta 4
//! #
//! r_kpc,rho_bulge,rho_disk,...
//! 1.00000000e-2,...
//! ```

use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::{CosmicEvolution, InflationHistory, RotationCurve};
use crate::solver::SimulationResult;

// =================================================================================================
// Configuration
// =================================================================================================

/// How numbers are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// `{:.p}`: fixed number of decimals
    Fixed,
    /// `{:.pe}`: mantissa with `p` decimals and an exponent
    Scientific,
}

/// CSV export configuration
///
/// The default writes comma-separated scientific notation with 8 decimals.
/// Accelerations around `1e-10` m/s² and couplings around `4e-6` would be
/// flattened to zero by a fixed-point format, hence the scientific default.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Decimals written after the separator (default: 8)
    pub precision: usize,

    /// Number rendering (default: scientific)
    pub notation: Notation,

    /// Write the `#` metadata header (default: true)
    pub include_metadata: bool,

    /// Metadata shown in the header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 8,
            notation: Notation::Scientific,
            include_metadata: true,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European format: `;` delimiter, `,` decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Self::default()
        }
    }

    /// Scientific notation with 15 decimals, enough to round-trip an f64
    pub fn high_precision() -> Self {
        Self {
            precision: 15,
            ..Self::default()
        }
    }

    /// Bare table: no `#` header lines
    pub fn without_metadata() -> Self {
        Self {
            include_metadata: false,
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_notation(mut self, notation: Notation, precision: usize) -> Self {
        self.notation = notation;
        self.precision = precision;
        self
    }
}

/// Run description written into the CSV header
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub model_name: String,
    pub solver_name: String,
    pub total_time: Option<f64>,
    pub time_steps: Option<usize>,

    /// Extra `key: value` lines, written in key order
    pub custom: BTreeMap<String, String>,
}

impl CsvMetadata {
    pub fn new(model_name: &str, solver_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            solver_name: solver_name.to_string(),
            ..Self::default()
        }
    }

    /// Build metadata from the `model`, `solver`, `total time` and
    /// `time steps` entries a [`SimulationResult`] carries
    pub fn from_simulation(result: &SimulationResult) -> Self {
        let lookup = |key: &str| result.metadata.get(key).cloned().unwrap_or_default();

        Self {
            model_name: lookup("model"),
            solver_name: lookup("solver"),
            total_time: result.metadata.get("total time").and_then(|v| v.parse().ok()),
            time_steps: result.metadata.get("time steps").and_then(|v| v.parse().ok()),
            custom: BTreeMap::new(),
        }
    }

    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.custom.insert(key.to_string(), value.to_string());
    }
}

// =================================================================================================
// Formatting helpers
// =================================================================================================

fn write_metadata_header(
    writer: &mut impl Write,
    metadata: Option<&CsvMetadata>,
) -> std::io::Result<()> {
    writeln!(writer, "# Adaptive Coupling Simulation Data")?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(meta) = metadata {
        if !meta.model_name.is_empty() {
            writeln!(writer, "# Model: {}", meta.model_name)?;
        }
        if !meta.solver_name.is_empty() {
            writeln!(writer, "# Solver: {}", meta.solver_name)?;
        }
        if let Some(total_time) = meta.total_time {
            writeln!(writer, "# Total time: {}", total_time)?;
        }
        if let Some(time_steps) = meta.time_steps {
            writeln!(writer, "# Time steps: {}", time_steps)?;
        }
        for (key, value) in &meta.custom {
            writeln!(writer, "# {}: {}", key, value)?;
        }
    }

    writeln!(writer, "#")
}

/// Render one value according to the configuration
pub fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = match config.notation {
        Notation::Fixed => format!("{:.*}", config.precision, value),
        Notation::Scientific => format!("{:.*e}", config.precision, value),
    };

    if config.decimal_separator == '.' {
        formatted
    } else {
        formatted.replace('.', &config.decimal_separator.to_string())
    }
}

// =================================================================================================
// Export functions
// =================================================================================================

/// Write named columns of equal length as a CSV table
///
/// # Errors
///
/// - headers and columns differ in count, or no column is given
/// - columns differ in length
/// - a value is NaN or infinite
/// - the file cannot be created or written
///
/// The checks run before the file is created.
pub fn export_columns_csv(
    headers: &[&str],
    columns: &[&[f64]],
    output_path: impl AsRef<Path>,
    config: &CsvConfig,
) -> Result<(), Box<dyn Error>> {
    if headers.is_empty() {
        return Err("No columns to export".into());
    }
    if headers.len() != columns.len() {
        return Err(format!(
            "{} headers but {} columns",
            headers.len(),
            columns.len()
        )
        .into());
    }

    let rows = columns[0].len();
    for (header, column) in headers.iter().zip(columns) {
        if column.len() != rows {
            return Err(format!(
                "Column '{}' has {} values, expected {}",
                header,
                column.len(),
                rows
            )
            .into());
        }
        if let Some(row) = column.iter().position(|v| !v.is_finite()) {
            return Err(format!(
                "Column '{}' holds a non-finite value at row {}",
                header, row
            )
            .into());
        }
    }

    let file = File::create(output_path.as_ref())?;
    let mut writer = BufWriter::new(file);

    if config.include_metadata {
        write_metadata_header(&mut writer, config.metadata.as_ref())?;
    }

    let delimiter = config.delimiter.to_string();
    writeln!(writer, "{}", headers.join(&delimiter))?;

    for row in 0..rows {
        let line: Vec<String> = columns
            .iter()
            .map(|column| format_number(column[row], config))
            .collect();
        writeln!(writer, "{}", line.join(&delimiter))?;
    }

    writer.flush()?;
    log::debug!(
        "Wrote {} rows x {} columns to {}",
        rows,
        headers.len(),
        output_path.as_ref().display()
    );
    Ok(())
}

/// Export a radial profile
///
/// Columns: `r_kpc, rho_bulge, rho_disk, rho_gas, rho_total, M_enc_Msun,
/// G_eff, v_kms, a_m_s2`
pub fn export_rotation_curve_csv(
    curve: &RotationCurve,
    output_path: impl AsRef<Path>,
    config: &CsvConfig,
) -> Result<(), Box<dyn Error>> {
    let columns = curve.columns();
    let headers: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let values: Vec<&[f64]> = columns.iter().map(|(_, column)| column.as_slice()).collect();

    export_columns_csv(&headers, &values, output_path, config)
}

/// Export a cosmological evolution
///
/// Columns: `t, a, Gc, Gh, rhoL, H`
pub fn export_evolution_csv(
    evolution: &CosmicEvolution,
    output_path: impl AsRef<Path>,
    config: &CsvConfig,
) -> Result<(), Box<dyn Error>> {
    let columns = evolution.columns();
    let headers: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let values: Vec<&[f64]> = columns.iter().map(|(_, column)| *column).collect();

    export_columns_csv(&headers, &values, output_path, config)
}

/// Export a vacuum-inflation history
///
/// Columns: `t, a, rho_vac, G_eff`
pub fn export_inflation_csv(
    history: &InflationHistory,
    output_path: impl AsRef<Path>,
    config: &CsvConfig,
) -> Result<(), Box<dyn Error>> {
    let columns = history.columns();
    let headers: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let values: Vec<&[f64]> = columns.iter().map(|(_, column)| *column).collect();

    export_columns_csv(&headers, &values, output_path, config)
}

// =================================================================================================
// Tests
// =================================================================================================
