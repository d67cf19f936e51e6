//! Closed-form galactic mass profiles
//!
//! # Components
//!
//! | Component | Volume density                                                  | Enclosed mass                                  |
//! |-----------|-----------------------------------------------------------------|------------------------------------------------|
//! | Bulge     | $\frac{M_b}{2\pi} \frac{a}{r (r+a)^3}$ (Hernquist)              | $M_b \frac{r^2}{(r+a)^2}$                      |
//! | Disk      | $\Sigma_d / (2 z_0)$, $\Sigma_d = \frac{M_d}{2\pi R_d^2} e^{-r/R_d}$ | $M_d \left(1 - (1 + r/R_d) e^{-r/R_d}\right)$ |
//! | Gas       | $\Sigma_g (1 + A e^{-\frac{1}{2}((r-r_0)/\sigma)^2}) / (2 z_0)$ | $M_g \left(1 - (1 + r/R_g) e^{-r/R_g}\right)$ |
//!
//! Radii are in kpc, masses in Msun. The bulge denominator carries a `1e-12`
//! floor so `r = 0` stays finite.
//!
//! # Example
//!
//! ```rust
//! use arp_rs::models::density::{DensityField, MassProfile};
//! use arp_rs::physics::Grid;
//!
//! let profile = MassProfile {
//!     bulge_mass: 1e10,
//!     ..MassProfile::default()
//! };
//! let grid = Grid::uniform(0.1, 20.0, 50).unwrap();
//! let field = DensityField::evaluate(&profile, &grid);
//!
//! assert!(field.total[0] > field.total[49]);
//! ```

use crate::error::{ArpError, ArpResult};
use crate::physics::Grid;
use nalgebra::DVector;
use serde::Deserialize;
use std::f64::consts::PI;

// =================================================================================================
// DensityModel trait
// =================================================================================================

/// Volume density split into components, at one radius
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DensityComponents {
    pub bulge: f64,
    pub disk: f64,
    pub gas: f64,
}

impl DensityComponents {
    pub fn total(&self) -> f64 {
        self.bulge + self.disk + self.gas
    }
}

/// Radial mass distribution feeding the coupling source term
pub trait DensityModel: Send + Sync {
    /// Volume density components at radius `r` \[Msun/kpc³\]
    fn density(&self, r: f64) -> DensityComponents;

    /// Mass enclosed within radius `r` \[Msun\]
    fn enclosed_mass(&self, r: f64) -> f64;

    fn name(&self) -> &str;
}

// =================================================================================================
// MassProfile
// =================================================================================================

/// Hernquist bulge + exponential disk + exponential gas disk
///
/// JSON keys follow the usual astrophysical shorthand (`Mb`, `Rd`, ...). Every
/// key is optional; missing keys take the defaults below.
///
/// | Field               | Key               | Default |
/// |---------------------|-------------------|---------|
/// | `bulge_mass`        | `Mb`              | 0       |
/// | `bulge_scale`       | `a_bulge`         | 1       |
/// | `disk_mass`         | `Md`              | 0       |
/// | `disk_scale_length` | `Rd`              | 2.5     |
/// | `scale_height`      | `z0`              | 0.3     |
/// | `gas_mass`          | `Mg`              | 0       |
/// | `gas_scale_length`  | `Rg`              | 6       |
/// | `gas_bump_radius`   | `gas_bump_r0`     | none    |
/// | `gas_bump_width`    | `gas_bump_sigma`  | 1       |
/// | `gas_bump_amplitude`| `gas_bump_amp`    | 0       |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MassProfile {
    #[serde(rename = "Mb")]
    pub bulge_mass: f64,

    #[serde(rename = "a_bulge")]
    pub bulge_scale: f64,

    #[serde(rename = "Md")]
    pub disk_mass: f64,

    #[serde(rename = "Rd")]
    pub disk_scale_length: f64,

    /// Shared by the disk and the gas
    #[serde(rename = "z0")]
    pub scale_height: f64,

    #[serde(rename = "Mg")]
    pub gas_mass: f64,

    #[serde(rename = "Rg")]
    pub gas_scale_length: f64,

    #[serde(rename = "gas_bump_r0")]
    pub gas_bump_radius: Option<f64>,

    #[serde(rename = "gas_bump_sigma")]
    pub gas_bump_width: f64,

    #[serde(rename = "gas_bump_amp")]
    pub gas_bump_amplitude: f64,
}

impl Default for MassProfile {
    fn default() -> Self {
        Self {
            bulge_mass: 0.0,
            bulge_scale: 1.0,
            disk_mass: 0.0,
            disk_scale_length: 2.5,
            scale_height: 0.3,
            gas_mass: 0.0,
            gas_scale_length: 6.0,
            gas_bump_radius: None,
            gas_bump_width: 1.0,
            gas_bump_amplitude: 0.0,
        }
    }
}

impl MassProfile {
    /// Check physical constraints
    ///
    /// # Rules
    ///
    /// - every value finite
    /// - masses $\geq 0$, bulge scale $\geq 0$
    /// - $R_d$, $R_g$, $z_0 > 0$
    /// - bump width $> 0$ when a bump is active
    pub fn validate(&self) -> ArpResult<()> {
        let finite = [
            ("Mb", self.bulge_mass),
            ("a_bulge", self.bulge_scale),
            ("Md", self.disk_mass),
            ("Rd", self.disk_scale_length),
            ("z0", self.scale_height),
            ("Mg", self.gas_mass),
            ("Rg", self.gas_scale_length),
            ("gas_bump_sigma", self.gas_bump_width),
            ("gas_bump_amp", self.gas_bump_amplitude),
        ];
        for (key, value) in finite {
            if !value.is_finite() {
                return Err(ArpError::config(format!("mass.{} must be finite", key)));
            }
        }

        for (key, value) in [
            ("Mb", self.bulge_mass),
            ("Md", self.disk_mass),
            ("Mg", self.gas_mass),
            ("a_bulge", self.bulge_scale),
        ] {
            if value < 0.0 {
                return Err(ArpError::config(format!(
                    "mass.{} must be non-negative, got {}",
                    key, value
                )));
            }
        }

        for (key, value) in [
            ("Rd", self.disk_scale_length),
            ("Rg", self.gas_scale_length),
            ("z0", self.scale_height),
        ] {
            if value <= 0.0 {
                return Err(ArpError::config(format!(
                    "mass.{} must be positive, got {}",
                    key, value
                )));
            }
        }

        if let Some(radius) = self.gas_bump_radius {
            if !radius.is_finite() {
                return Err(ArpError::config("mass.gas_bump_r0 must be finite"));
            }
            if self.gas_bump_amplitude != 0.0 && self.gas_bump_width <= 0.0 {
                return Err(ArpError::config(format!(
                    "mass.gas_bump_sigma must be positive, got {}",
                    self.gas_bump_width
                )));
            }
        }

        Ok(())
    }

    fn bulge_density(&self, r: f64) -> f64 {
        let a = self.bulge_scale;
        self.bulge_mass / (2.0 * PI) * a / (r * (r + a).powi(3) + 1e-12)
    }

    fn disk_density(&self, r: f64) -> f64 {
        let rd = self.disk_scale_length;
        let sigma = self.disk_mass / (2.0 * PI * rd * rd) * (-r / rd).exp();
        sigma / (2.0 * self.scale_height)
    }

    fn gas_density(&self, r: f64) -> f64 {
        let rg = self.gas_scale_length;
        let mut sigma = self.gas_mass / (2.0 * PI * rg * rg) * (-r / rg).exp();

        if let Some(r0) = self.gas_bump_radius {
            if self.gas_bump_amplitude != 0.0 {
                let x = (r - r0) / self.gas_bump_width;
                sigma *= 1.0 + self.gas_bump_amplitude * (-0.5 * x * x).exp();
            }
        }

        sigma / (2.0 * self.scale_height)
    }
}

/// Mass of an exponential disk inside `r`
fn exponential_enclosed(mass: f64, scale: f64, r: f64) -> f64 {
    mass * (1.0 - (1.0 + r / scale) * (-r / scale).exp())
}

impl DensityModel for MassProfile {
    fn density(&self, r: f64) -> DensityComponents {
        DensityComponents {
            bulge: self.bulge_density(r),
            disk: self.disk_density(r),
            gas: self.gas_density(r),
        }
    }

    fn enclosed_mass(&self, r: f64) -> f64 {
        let a = self.bulge_scale;
        let bulge = if r + a > 0.0 {
            self.bulge_mass * r * r / ((r + a) * (r + a))
        } else {
            0.0
        };

        bulge
            + exponential_enclosed(self.disk_mass, self.disk_scale_length, r)
            + exponential_enclosed(self.gas_mass, self.gas_scale_length, r)
    }

    fn name(&self) -> &str {
        "Bulge + disk + gas"
    }
}

// =================================================================================================
// DensityField
// =================================================================================================

/// A density model sampled on a grid
#[derive(Debug, Clone, PartialEq)]
pub struct DensityField {
    pub radius: DVector<f64>,
    pub bulge: DVector<f64>,
    pub disk: DVector<f64>,
    pub gas: DVector<f64>,
    pub total: DVector<f64>,
    pub enclosed_mass: DVector<f64>,
}

impl DensityField {
    /// Sample `model` at every grid point
    pub fn evaluate(model: &dyn DensityModel, grid: &Grid) -> Self {
        let radius = grid.coordinates();
        let n = radius.len();

        let components: Vec<DensityComponents> = radius.iter().map(|&r| model.density(r)).collect();

        let bulge = DVector::from_fn(n, |i, _| components[i].bulge);
        let disk = DVector::from_fn(n, |i, _| components[i].disk);
        let gas = DVector::from_fn(n, |i, _| components[i].gas);
        let total = DVector::from_fn(n, |i, _| components[i].total());
        let enclosed_mass = radius.map(|r| model.enclosed_mass(r));

        Self {
            radius,
            bulge,
            disk,
            gas,
            total,
            enclosed_mass,
        }
    }

    pub fn len(&self) -> usize {
        self.radius.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    /// Total density at `r`, linearly interpolated on `grid`
    pub fn total_at(&self, grid: &Grid, r: f64) -> f64 {
        grid.interpolate(&self.total, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bulge_only() -> MassProfile {
        MassProfile {
            bulge_mass: 1e10,
            ..MassProfile::default()
        }
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let profile: MassProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, MassProfile::default());
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_json_keys() {
        let profile: MassProfile = serde_json::from_str(
            r#"{"Mb": 1e10, "a_bulge": 0.7, "Md": 5e10, "gas_bump_r0": 9.0, "gas_bump_amp": 0.5}"#,
        )
        .unwrap();

        assert_eq!(profile.bulge_mass, 1e10);
        assert_eq!(profile.bulge_scale, 0.7);
        assert_eq!(profile.disk_mass, 5e10);
        assert_eq!(profile.gas_bump_radius, Some(9.0));
        assert_eq!(profile.gas_bump_amplitude, 0.5);
        assert_eq!(profile.disk_scale_length, 2.5);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<MassProfile, _> = serde_json::from_str(r#"{"Mbulge": 1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_hernquist_bulge() {
        let profile = bulge_only();
        let r: f64 = 2.0;
        let expected = 1e10 / (2.0 * PI) * 1.0 / (r * (r + 1.0).powi(3) + 1e-12);

        assert_relative_eq!(profile.density(r).bulge, expected);
        assert_relative_eq!(profile.enclosed_mass(r), 1e10 * 4.0 / 9.0);
        assert!(profile.density(0.0).bulge.is_finite());
    }

    #[test]
    fn test_enclosed_mass_limits() {
        let profile = MassProfile {
            bulge_mass: 1e10,
            disk_mass: 5e10,
            gas_mass: 1e10,
            ..MassProfile::default()
        };

        assert_relative_eq!(profile.enclosed_mass(0.0), 0.0);
        assert_relative_eq!(profile.enclosed_mass(1e6), 7e10, max_relative = 1e-4);
    }

    #[test]
    fn test_gas_bump() {
        let plain = MassProfile {
            gas_mass: 1e9,
            ..MassProfile::default()
        };
        let bumped = MassProfile {
            gas_bump_radius: Some(8.0),
            gas_bump_amplitude: 1.0,
            ..plain.clone()
        };

        assert_relative_eq!(bumped.density(8.0).gas, 2.0 * plain.density(8.0).gas);
        assert_relative_eq!(
            bumped.density(30.0).gas,
            plain.density(30.0).gas,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_validation() {
        let mut profile = MassProfile::default();
        profile.scale_height = 0.0;
        assert!(profile.validate().is_err());

        let mut profile = MassProfile::default();
        profile.disk_mass = -1.0;
        assert!(profile.validate().is_err());

        let mut profile = MassProfile::default();
        profile.gas_bump_radius = Some(5.0);
        profile.gas_bump_amplitude = 1.0;
        profile.gas_bump_width = 0.0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_density_field() {
        let grid = Grid::uniform(0.01, 40.0, 100).unwrap();
        let field = DensityField::evaluate(&bulge_only(), &grid);

        assert_eq!(field.len(), 100);
        assert!(field.disk.iter().all(|&x| x == 0.0));
        assert!(field.total.iter().zip(field.total.iter().skip(1)).all(|(a, b)| a >= b));
        assert!(field.enclosed_mass.iter().zip(field.enclosed_mass.iter().skip(1)).all(|(a, b)| a <= b));

        let at_anchor = field.total_at(&grid, 8.0);
        assert!(at_anchor > 0.0);
        assert!(at_anchor < field.total[0]);
    }
}
