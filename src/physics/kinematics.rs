//! Kinematics derived from a converged coupling field
//!
//! ```text
//! v(r) = sqrt(max(G(r) M(<r) / r, 0))        [km/s]
//! a(r) = v(r)² / r * conversion              [m/s²]
//! ```
//!
//! Points with a non-positive radius give zero velocity and zero acceleration.

use crate::physics::PhysicalConstants;
use nalgebra::DVector;

/// Circular velocity at every point
///
/// # Panics
///
/// Panics if the three vectors differ in length.
pub fn circular_velocity(
    coupling: &DVector<f64>,
    enclosed_mass: &DVector<f64>,
    radius: &DVector<f64>,
) -> DVector<f64> {
    assert_eq!(coupling.len(), radius.len(), "coupling and radius lengths differ");
    assert_eq!(enclosed_mass.len(), radius.len(), "mass and radius lengths differ");

    DVector::from_fn(radius.len(), |i, _| {
        let r = radius[i];
        if r <= 0.0 {
            return 0.0;
        }
        (coupling[i] * enclosed_mass[i] / r).max(0.0).sqrt()
    })
}

/// Centripetal acceleration `v²/r`, converted to m/s²
pub fn centripetal_acceleration(
    velocity: &DVector<f64>,
    radius: &DVector<f64>,
    constants: &PhysicalConstants,
) -> DVector<f64> {
    assert_eq!(velocity.len(), radius.len(), "velocity and radius lengths differ");

    DVector::from_fn(radius.len(), |i, _| {
        let r = radius[i];
        if r <= 0.0 {
            return 0.0;
        }
        velocity[i] * velocity[i] / r * constants.acceleration_conversion
    })
}
