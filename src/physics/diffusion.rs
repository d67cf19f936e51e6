//! Second-difference diffusion with reflecting boundaries
//!
//! # Discretization
//!
//! ```text
//! interior : L[i]   = (f[i+1] - 2 f[i] + f[i-1]) / h²
//! i = 0    : L[0]   = 2 (f[1] - f[0]) / h²
//! i = N-1  : L[N-1] = 2 (f[N-2] - f[N-1]) / h²
//! ```
//!
//! The boundary rows mirror the nearest interior neighbour (zero flux), so a
//! constant field maps to zero everywhere.

use crate::error::{ArpError, ArpResult};
use crate::physics::Grid;
use nalgebra::DVector;

/// Neumann Laplacian of a sampled field
///
/// Returns zeros for a single point and an empty vector for an empty field.
///
/// # Example
///
/// ```rust
/// use arp_rs::physics::diffusion::laplacian;
/// use nalgebra::DVector;
///
/// let field = DVector::from_vec(vec![0.0, 1.0, 4.0, 9.0]);
/// let lap = laplacian(&field, 1.0);
/// assert_eq!(lap[1], 2.0);
/// ```
pub fn laplacian(field: &DVector<f64>, spacing: f64) -> DVector<f64> {
    let n = field.len();
    let mut result = DVector::zeros(n);

    if n < 2 {
        return result;
    }

    let inv_h2 = 1.0 / (spacing * spacing);

    result[0] = 2.0 * (field[1] - field[0]) * inv_h2;
    for i in 1..n - 1 {
        result[i] = (field[i + 1] - 2.0 * field[i] + field[i - 1]) * inv_h2;
    }
    result[n - 1] = 2.0 * (field[n - 2] - field[n - 1]) * inv_h2;

    result
}

/// Diffusion term `D * laplacian(field)` bound to a grid spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionOperator {
    coefficient: f64,
    spacing: f64,
}

impl DiffusionOperator {
    /// # Errors
    ///
    /// `ArpError::Configuration` when the coefficient is negative or not
    /// finite, or when it is non-zero on a grid with fewer than 3 points.
    pub fn new(coefficient: f64, grid: &Grid) -> ArpResult<Self> {
        if !coefficient.is_finite() || coefficient < 0.0 {
            return Err(ArpError::config(format!(
                "diffusion coefficient must be finite and non-negative, got {}",
                coefficient
            )));
        }
        if coefficient > 0.0 && grid.len() < 3 {
            return Err(ArpError::config(format!(
                "diffusion needs at least 3 grid points, got {}",
                grid.len()
            )));
        }

        Ok(Self {
            coefficient,
            spacing: grid.spacing(),
        })
    }

    /// Operator that contributes nothing
    pub fn disabled(grid: &Grid) -> Self {
        Self {
            coefficient: 0.0,
            spacing: grid.spacing(),
        }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn is_active(&self) -> bool {
        self.coefficient > 0.0
    }

    /// `coefficient * laplacian(field)`
    pub fn apply(&self, field: &DVector<f64>) -> DVector<f64> {
        if !self.is_active() {
            return DVector::zeros(field.len());
        }
        laplacian(field, self.spacing) * self.coefficient
    }
}
