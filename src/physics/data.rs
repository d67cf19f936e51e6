//! Physical data types
//!
//! This module provides the container for one physical quantity of the state.
//! A quantity is either a single scalar (temporal models: scale factor,
//! coupling channels, energy density) or a field sampled on a grid (spatial
//! models: the effective coupling at every radius).

use nalgebra::DVector;
use std::fmt;

/// Physical data container
///
/// # Storage Types
///
/// - **Scalar**: single value (0D), one named variable of a temporal system
/// - **Vector**: 1D array, a field sampled at the N points of a grid
///
/// # Memory Layout
///
/// - **Scalar**: 8 bytes
/// - **Vector[n]**: 8n bytes
///
/// # Examples
///
/// ```rust
/// use arp_rs::physics::PhysicalData;
///
/// let scale_factor = PhysicalData::from_scalar(1.0);
/// let coupling = PhysicalData::uniform_vector(100, 4.30091e-6);
///
/// assert!(scale_factor.is_scalar());
/// assert_eq!(coupling.len(), 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicalData {
    /// Scalar value (0D) - 8 bytes
    Scalar(f64),

    /// Vector (1D) - 8n bytes
    ///
    /// One entry per grid point, in grid order.
    Vector(DVector<f64>),
}

impl PhysicalData {
    // ======================================= constructors =======================================

    /// Create from scalar
    pub fn from_scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    /// Create from vector
    pub fn from_vec(vector: Vec<f64>) -> Self {
        Self::Vector(DVector::from_vec(vector))
    }

    /// Create from DVector
    pub fn from_vector(vector: DVector<f64>) -> Self {
        Self::Vector(vector)
    }

    /// Create uniform vector
    pub fn uniform_vector(size: usize, value: f64) -> Self {
        Self::Vector(DVector::from_element(size, value))
    }

    // ========================================== Queries ==========================================

    /// Check data is scalar
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Check data is a vector
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// Number of components (1 for a scalar)
    pub fn len(&self) -> usize {
        match self {
            PhysicalData::Scalar(_) => 1,
            PhysicalData::Vector(v) => v.len(),
        }
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Components as a slice, whatever the storage
    pub fn as_slice(&self) -> &[f64] {
        match self {
            PhysicalData::Scalar(value) => std::slice::from_ref(value),
            PhysicalData::Vector(value) => value.as_slice(),
        }
    }

    /// First NaN or Inf component, as `(index, value)`
    pub fn first_non_finite(&self) -> Option<(usize, f64)> {
        self.as_slice()
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
    }

    /// True when every component is finite
    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }

    // ======================================== Extractions ========================================

    /// Extract as a scalar (panic if not)
    pub fn as_scalar(&self) -> f64 {
        match self {
            PhysicalData::Scalar(value) => *value,
            _ => panic!("Not a scalar value"),
        }
    }

    /// Try to extract as a scalar
    pub fn try_as_scalar(&self) -> Option<f64> {
        match self {
            PhysicalData::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Extract as a DVector (panic if not)
    pub fn as_vector(&self) -> &DVector<f64> {
        match self {
            PhysicalData::Vector(value) => value,
            _ => panic!("Not a vector value"),
        }
    }

    /// Try to extract as a DVector
    pub fn try_as_vector(&self) -> Option<&DVector<f64>> {
        match self {
            PhysicalData::Vector(value) => Some(value),
            _ => None,
        }
    }

    // ====================================== Apply functions ======================================

    /// Apply a function f to every component
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        match self {
            PhysicalData::Scalar(value) => *value = f(*value),
            PhysicalData::Vector(value) => value.iter_mut().for_each(|x| *x = f(*x)),
        }
    }
}

// ================================== Simple arithmetic functions ==================================

impl std::ops::Add for PhysicalData {
    type Output = PhysicalData;

    fn add(self, rhs: Self) -> Self::Output {
        use PhysicalData::*;
        match (self, rhs) {
            (Scalar(x), Scalar(y)) => Scalar(x + y),
            (Scalar(x), Vector(y)) | (Vector(y), Scalar(x)) => Vector(y.add_scalar(x)),
            (Vector(x), Vector(y)) => {
                assert_eq!(x.len(), y.len(), "Vector length must match");
                Vector(x + y)
            }
        }
    }
}

impl std::ops::Mul<f64> for PhysicalData {
    type Output = PhysicalData;

    fn mul(self, scalar: f64) -> Self::Output {
        match self {
            PhysicalData::Scalar(x) => PhysicalData::Scalar(x * scalar),
            PhysicalData::Vector(x) => PhysicalData::Vector(x * scalar),
        }
    }
}

impl std::ops::Mul<PhysicalData> for f64 {
    type Output = PhysicalData;

    fn mul(self, rhs: PhysicalData) -> Self::Output {
        rhs * self
    }
}

// ======================== Display ============================

impl fmt::Display for PhysicalData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalData::Scalar(value) => write!(f, "Scalar ({})", value),
            PhysicalData::Vector(value) => write!(f, "Vector [{}]", value.len()),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        let data = PhysicalData::Scalar(42.0);
        assert!(data.is_scalar());
        assert_eq!(data.len(), 1);
        assert_eq!(data.as_slice(), &[42.0]);
    }

    #[test]
    fn test_vector() {
        let data = PhysicalData::uniform_vector(100, 1.0);
        assert!(data.is_vector());
        assert_eq!(data.len(), 100);
        assert!(data.try_as_scalar().is_none());
    }

    #[test]
    fn test_addition() {
        let a = PhysicalData::Scalar(1.0);
        let b = PhysicalData::Scalar(2.0);
        assert_eq!((a + b).as_scalar(), 3.0);

        let u = PhysicalData::from_vec(vec![1.0, 2.0]);
        let v = PhysicalData::from_vec(vec![0.5, -2.0]);
        assert_eq!((u + v).as_vector().as_slice(), &[1.5, 0.0]);
    }

    #[test]
    fn test_scalar_broadcast() {
        let u = PhysicalData::from_vec(vec![1.0, 2.0]);
        let shifted = PhysicalData::Scalar(1.0) + u;
        assert_eq!(shifted.as_vector().as_slice(), &[2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "Vector length must match")]
    fn test_mismatched_vectors() {
        let _ = PhysicalData::uniform_vector(2, 1.0) + PhysicalData::uniform_vector(3, 1.0);
    }

    #[test]
    fn test_multiplication() {
        let data = PhysicalData::uniform_vector(10, 2.0);
        let result = 3.0 * data;
        assert_eq!(result.as_vector()[0], 6.0);
    }

    #[test]
    fn test_first_non_finite() {
        let data = PhysicalData::from_vec(vec![1.0, f64::INFINITY, f64::NAN]);
        assert_eq!(data.first_non_finite(), Some((1, f64::INFINITY)));
        assert!(!data.is_finite());
        assert!(PhysicalData::Scalar(0.0).is_finite());
    }

    #[test]
    fn test_apply() {
        let mut data = PhysicalData::from_vec(vec![1.0, 4.0]);
        data.apply(f64::sqrt);
        assert_eq!(data.as_vector().as_slice(), &[1.0, 2.0]);
    }
}
