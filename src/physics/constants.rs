//! Physical constants
//!
//! Galactic quantities use kpc, km/s and solar masses, so the gravitational
//! constant is expressed in kpc (km/s)² / Msun.

/// Gravitational constant in SI units \[m³ kg⁻¹ s⁻²\]
pub const G_SI: f64 = 6.67430e-11;

/// Gravitational constant in galactic units \[kpc (km/s)² / Msun\]
pub const G_GALACTIC: f64 = 4.30091e-6;

/// Conversion of (km/s)²/kpc to m/s²
pub const KMS2_PER_KPC_TO_SI: f64 = 3.24078e-14;

/// Reference acceleration scale a0 \[m/s²\]
pub const REFERENCE_ACCELERATION: f64 = 1.2e-10;

/// Constants shared by the models and the kinematic derivation
///
/// Passed explicitly to everything that needs them. The defaults are the
/// galactic-unit values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Baseline coupling G
    pub gravitational_constant: f64,

    /// Factor converting v²/r to an acceleration in m/s²
    pub acceleration_conversion: f64,

    /// Reference acceleration drawn on acceleration plots
    pub reference_acceleration: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravitational_constant: G_GALACTIC,
            acceleration_conversion: KMS2_PER_KPC_TO_SI,
            reference_acceleration: REFERENCE_ACCELERATION,
        }
    }
}

impl PhysicalConstants {
    /// Same conversions with a different baseline coupling
    pub fn with_gravitational_constant(mut self, value: f64) -> Self {
        self.gravitational_constant = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = PhysicalConstants::default();
        assert_eq!(constants.gravitational_constant, 4.30091e-6);
        assert_eq!(constants.acceleration_conversion, 3.24078e-14);
        assert_eq!(constants.reference_acceleration, 1.2e-10);
    }

    #[test]
    fn test_override() {
        let constants = PhysicalConstants::default().with_gravitational_constant(1.0);
        assert_eq!(constants.gravitational_constant, 1.0);
        assert_eq!(constants.acceleration_conversion, KMS2_PER_KPC_TO_SI);
    }
}
