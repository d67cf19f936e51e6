//! JSON run configuration
//!
//! # Galaxy file
//!
//! ```json
//! {
//!   "mass":   { "Mb": 1e10, "a_bulge": 1.0, "Md": 5e10, "Rd": 2.6 },
//!   "arp":    { "mu": 4.376, "target_ratio": 1.0, "D": 0.0, "R0": 8.0, "t_units_T0": 2.0 },
//!   "grid":   { "r_min": 0.01, "r_max": 40.0, "nr": 400 },
//!   "anchor": { "R0": 8.0, "V0": 220.0 }
//! }
//! ```
//!
//! # Cosmology file
//!
//! Rate parameters at the top level, optional `init` and `t` groups:
//!
//! ```json
//! {
//!   "Om": 0.3, "Or": 1e-4, "lambda_h": 0.5, "alpha_c": 0.0, "mu_c": 0.0, "beta_h": 0.0,
//!   "a_c": 1.0, "gamma_h": 0.0, "kappa": 0.0, "rho_holo": 0.0, "Lp2": 1.0,
//!   "init": { "a": 1.0, "Gc": 1.0 },
//!   "t": { "t_start": 0.0, "t_end": 1.0, "n_steps": 100 }
//! }
//! ```
//!
//! Missing required keys fail with `ArpError::Configuration`; the message
//! names the key.

use crate::error::{ArpError, ArpResult};
use crate::models::cosmology::{CosmologyInitial, CosmologyParameters};
use crate::models::density::MassProfile;
use crate::models::inflation::InflationParameters;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

fn parse_json<T: DeserializeOwned>(text: &str) -> ArpResult<T> {
    serde_json::from_str(text).map_err(|e| ArpError::config(e.to_string()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ArpResult<T> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ArpError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_json(&text)
}

fn require_positive(key: &str, value: f64) -> ArpResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ArpError::config(format!(
            "{} must be positive and finite, got {}",
            key, value
        )));
    }
    Ok(())
}

fn require_non_negative(key: &str, value: f64) -> ArpResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ArpError::config(format!(
            "{} must be non-negative and finite, got {}",
            key, value
        )));
    }
    Ok(())
}

// =================================================================================================
// Galaxy configuration
// =================================================================================================

fn default_target_ratio() -> f64 {
    1.0
}

fn default_pivot_radius() -> f64 {
    8.0
}

fn default_periods() -> f64 {
    2.0
}

fn default_steps_per_period() -> usize {
    800
}

/// Coupling dynamics (`arp` group)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArpParameters {
    /// Reaction gain α from the parameter file
    ///
    /// Accepted so older parameter files load, but never used: the gain is
    /// always recalibrated from the anchor.
    #[serde(rename = "alpha", default)]
    pub gain: Option<f64>,

    /// Relaxation rate μ \[1/time\]
    pub mu: f64,

    /// Steady state at the pivot, as a multiple of the baseline
    #[serde(default = "default_target_ratio")]
    pub target_ratio: f64,

    /// Diffusion coefficient
    #[serde(rename = "D", default)]
    pub diffusion: f64,

    /// Pivot radius where the calibration applies \[kpc\]
    #[serde(rename = "R0", default = "default_pivot_radius")]
    pub pivot_radius: f64,

    /// Integration length in orbital periods
    #[serde(rename = "t_units_T0", default = "default_periods")]
    pub periods: f64,

    #[serde(default = "default_steps_per_period")]
    pub steps_per_period: usize,
}

impl ArpParameters {
    pub fn validate(&self) -> ArpResult<()> {
        require_non_negative("arp.mu", self.mu)?;
        require_non_negative("arp.target_ratio", self.target_ratio)?;
        require_non_negative("arp.D", self.diffusion)?;
        require_positive("arp.R0", self.pivot_radius)?;
        require_positive("arp.t_units_T0", self.periods)?;
        if self.steps_per_period == 0 {
            return Err(ArpError::config("arp.steps_per_period must be at least 1"));
        }
        Ok(())
    }
}

/// Radial sampling (`grid` group)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    pub r_min: f64,
    pub r_max: f64,
    pub nr: usize,
}

impl GridConfig {
    pub fn validate(&self) -> ArpResult<()> {
        require_positive("grid.r_min", self.r_min)?;
        if !self.r_max.is_finite() || self.r_max <= self.r_min {
            return Err(ArpError::config(format!(
                "grid.r_max ({}) must exceed grid.r_min ({})",
                self.r_max, self.r_min
            )));
        }
        if self.nr < 2 {
            return Err(ArpError::config(format!(
                "grid.nr must be at least 2, got {}",
                self.nr
            )));
        }
        Ok(())
    }
}

/// Reference orbit fixing the period (`anchor` group)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorConfig {
    /// Reference radius \[kpc\]
    #[serde(rename = "R0")]
    pub radius: f64,

    /// Circular velocity at the reference radius \[km/s\]
    #[serde(rename = "V0")]
    pub velocity: f64,
}

impl AnchorConfig {
    pub fn validate(&self) -> ArpResult<()> {
        require_positive("anchor.R0", self.radius)?;
        require_positive("anchor.V0", self.velocity)
    }

    /// Orbital period `2π R0 / V0` \[kpc / (km/s)\]
    pub fn period(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius / self.velocity
    }
}

/// Complete galaxy run description
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalaxyConfig {
    pub mass: MassProfile,
    pub arp: ArpParameters,
    pub grid: GridConfig,
    pub anchor: AnchorConfig,
}

impl GalaxyConfig {
    /// Parse and validate
    pub fn from_json_str(text: &str) -> ArpResult<Self> {
        let config: Self = parse_json(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate
    pub fn from_path(path: impl AsRef<Path>) -> ArpResult<Self> {
        let config: Self = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ArpResult<()> {
        self.mass.validate()?;
        self.arp.validate()?;
        self.grid.validate()?;
        self.anchor.validate()
    }
}

// =================================================================================================
// Cosmology configuration
// =================================================================================================

/// Integration interval (`t` group)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeSpan {
    pub t_start: f64,
    pub t_end: f64,
    pub n_steps: usize,
}

impl Default for TimeSpan {
    fn default() -> Self {
        Self {
            t_start: 0.0,
            t_end: 1.0,
            n_steps: 100,
        }
    }
}

impl TimeSpan {
    pub fn validate(&self) -> ArpResult<()> {
        if !self.t_start.is_finite() || !self.t_end.is_finite() || self.t_end <= self.t_start {
            return Err(ArpError::config(format!(
                "t.t_end ({}) must exceed t.t_start ({})",
                self.t_end, self.t_start
            )));
        }
        if self.n_steps == 0 {
            return Err(ArpError::config("t.n_steps must be at least 1"));
        }
        Ok(())
    }

    pub fn duration(&self) -> f64 {
        self.t_end - self.t_start
    }
}

/// Complete cosmology run description
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CosmologyConfig {
    #[serde(flatten)]
    pub parameters: CosmologyParameters,

    #[serde(default)]
    pub init: CosmologyInitial,

    #[serde(default, rename = "t")]
    pub time: TimeSpan,
}

impl CosmologyConfig {
    pub fn from_json_str(text: &str) -> ArpResult<Self> {
        let config: Self = parse_json(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ArpResult<Self> {
        let config: Self = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ArpResult<()> {
        self.parameters.validate()?;
        self.init.validate()?;
        self.time.validate()
    }
}

// =================================================================================================
// Inflation configuration
// =================================================================================================

/// Inflation run description (flat JSON object)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct InflationConfig {
    #[serde(flatten)]
    pub parameters: InflationParameters,
}

impl InflationConfig {
    pub fn from_json_str(text: &str) -> ArpResult<Self> {
        let config: Self = parse_json(text)?;
        config.parameters.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ArpResult<Self> {
        let config: Self = read_json(path.as_ref())?;
        config.parameters.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GALAXY: &str = r#"{
        "mass": { "Mb": 1e10, "a_bulge": 1.0 },
        "arp": { "mu": 4.376 },
        "grid": { "r_min": 0.01, "r_max": 40.0, "nr": 100 },
        "anchor": { "R0": 8.0, "V0": 220.0 }
    }"#;

    const COSMOLOGY: &str = r#"{
        "Om": 0.3, "Or": 0.0, "lambda_h": 0.0, "alpha_c": 0.0, "mu_c": 0.0, "beta_h": 0.0,
        "a_c": 1.0, "gamma_h": 0.0, "kappa": 0.0, "rho_holo": 0.0, "Lp2": 1.0
    }"#;

    #[test]
    fn test_galaxy_defaults() {
        let config = GalaxyConfig::from_json_str(GALAXY).unwrap();

        assert_eq!(config.arp.target_ratio, 1.0);
        assert_eq!(config.arp.diffusion, 0.0);
        assert_eq!(config.arp.gain, None);
        assert_eq!(config.arp.pivot_radius, 8.0);
        assert_eq!(config.arp.periods, 2.0);
        assert_eq!(config.arp.steps_per_period, 800);
        assert_eq!(config.mass.disk_scale_length, 2.5);
        assert!((config.anchor.period() - 2.0 * std::f64::consts::PI * 8.0 / 220.0).abs() < 1e-15);
    }

    #[test]
    fn test_missing_group_is_named() {
        let text = r#"{ "mass": {}, "arp": { "mu": 1.0 }, "anchor": { "R0": 8.0, "V0": 220.0 } }"#;
        match GalaxyConfig::from_json_str(text) {
            Err(ArpError::Configuration(message)) => assert!(message.contains("grid"), "{}", message),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_mu_is_named() {
        let text = GALAXY.replace(r#""mu": 4.376"#, r#""D": 0.5"#);
        match GalaxyConfig::from_json_str(&text) {
            Err(ArpError::Configuration(message)) => assert!(message.contains("mu"), "{}", message),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_arp_group_with_gain_is_accepted() {
        let text = GALAXY.replace(
            r#""arp": { "mu": 4.376 }"#,
            r#""arp": { "alpha": 0.0, "mu": 4.376, "D": 0.0, "R0": 8.0, "t_units_T0": 2.0 }"#,
        );
        let config = GalaxyConfig::from_json_str(&text).unwrap();

        assert_eq!(config.arp.gain, Some(0.0));
        assert_eq!(config.arp.mu, 4.376);
        assert_eq!(config.arp.periods, 2.0);
    }

    #[test]
    fn test_unknown_arp_key_rejected() {
        let text = GALAXY.replace(r#""mu": 4.376"#, r#""mu": 4.376, "beta": 1.0"#);
        match GalaxyConfig::from_json_str(&text) {
            Err(ArpError::Configuration(message)) => assert!(message.contains("beta"), "{}", message),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_invalid_grid() {
        let text = GALAXY.replace(r#""r_min": 0.01"#, r#""r_min": 0.0"#);
        assert!(GalaxyConfig::from_json_str(&text).is_err());

        let text = GALAXY.replace(r#""nr": 100"#, r#""nr": 1"#);
        assert!(GalaxyConfig::from_json_str(&text).is_err());
    }

    #[test]
    fn test_negative_mu_rejected() {
        let text = GALAXY.replace("4.376", "-1.0");
        assert!(matches!(
            GalaxyConfig::from_json_str(&text),
            Err(ArpError::Configuration(_))
        ));
    }

    #[test]
    fn test_cosmology_defaults() {
        let config = CosmologyConfig::from_json_str(COSMOLOGY).unwrap();

        assert_eq!(config.init, CosmologyInitial::default());
        assert_eq!(config.time, TimeSpan::default());
        assert_eq!(config.parameters.omega_matter, 0.3);
    }

    #[test]
    fn test_cosmology_missing_key_is_named() {
        let text = COSMOLOGY.replace(r#""Lp2": 1.0"#, r#""unused": 1.0"#);
        match CosmologyConfig::from_json_str(&text) {
            Err(ArpError::Configuration(message)) => assert!(message.contains("Lp2"), "{}", message),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_cosmology_partial_groups() {
        let text = COSMOLOGY.replace(
            r#""Lp2": 1.0"#,
            r#""Lp2": 1.0, "init": {"a": 0.5}, "t": {"t_end": 3.0}"#,
        );
        let config = CosmologyConfig::from_json_str(&text).unwrap();

        assert_eq!(config.init.a, 0.5);
        assert_eq!(config.init.cold_coupling, 1.0);
        assert_eq!(config.time.t_end, 3.0);
        assert_eq!(config.time.n_steps, 100);
    }

    #[test]
    fn test_missing_file() {
        let result = GalaxyConfig::from_path("/nonexistent/params.json");
        assert!(matches!(result, Err(ArpError::Configuration(_))));
    }

    #[test]
    fn test_inflation_config() {
        let text = r#"{"G": 1.0, "rho_vac_0": 1.0, "mu": 0.1, "alpha": 1.0, "a0": 1.0, "dt": 0.001, "t_max": 2.0}"#;
        let config = InflationConfig::from_json_str(text).unwrap();
        assert_eq!(config.parameters.steps(), 2000);
    }
}
