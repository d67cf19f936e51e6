//! Uniform one-dimensional grid
//!
//! Sample points over `[min, max]` with constant spacing. Spatial models evolve
//! one value per point; the grid also provides the piecewise linear
//! interpolation used to read a field at an arbitrary radius.

use crate::error::{ArpError, ArpResult};
use nalgebra::DVector;

/// Uniform grid of `points` samples over `[min, max]`
///
/// # Example
///
/// ```rust
/// use arp_rs::physics::Grid;
///
/// let grid = Grid::uniform(0.0, 10.0, 11).unwrap();
/// assert_eq!(grid.spacing(), 1.0);
/// assert_eq!(grid.coordinates()[10], 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    min: f64,
    max: f64,
    points: usize,
    spacing: f64,
}

impl Grid {
    /// Build a uniform grid
    ///
    /// # Errors
    ///
    /// `ArpError::Configuration` when `points < 2`, `max <= min`, or a bound is
    /// not finite.
    pub fn uniform(min: f64, max: f64, points: usize) -> ArpResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ArpError::config(format!(
                "grid bounds must be finite, got [{}, {}]",
                min, max
            )));
        }
        if max <= min {
            return Err(ArpError::config(format!(
                "grid upper bound ({}) must exceed lower bound ({})",
                max, min
            )));
        }
        if points < 2 {
            return Err(ArpError::config(format!(
                "grid needs at least 2 points, got {}",
                points
            )));
        }

        let spacing = (max - min) / (points - 1) as f64;

        Ok(Self {
            min,
            max,
            points,
            spacing,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of sample points
    pub fn len(&self) -> usize {
        self.points
    }

    /// Always false: a grid holds at least two points
    pub fn is_empty(&self) -> bool {
        self.points == 0
    }

    /// Distance between neighbouring points
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Coordinate of point `index`
    ///
    /// The last point is exactly `max`.
    pub fn coordinate(&self, index: usize) -> f64 {
        if index + 1 >= self.points {
            self.max
        } else {
            self.min + index as f64 * self.spacing
        }
    }

    /// Every coordinate, in increasing order
    pub fn coordinates(&self) -> DVector<f64> {
        DVector::from_fn(self.points, |i, _| self.coordinate(i))
    }

    /// Piecewise linear interpolation of `values` (one per grid point) at `x`
    ///
    /// Outside `[min, max]` the end values are returned.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the number of grid points.
    pub fn interpolate(&self, values: &DVector<f64>, x: f64) -> f64 {
        assert_eq!(
            values.len(),
            self.points,
            "Interpolated values must have one entry per grid point"
        );

        if x <= self.min {
            return values[0];
        }
        if x >= self.max {
            return values[self.points - 1];
        }

        let position = (x - self.min) / self.spacing;
        let left = (position.floor() as usize).min(self.points - 2);
        let fraction = (x - self.coordinate(left)) / self.spacing;

        values[left] + fraction * (values[left + 1] - values[left])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_spacing() {
        let grid = Grid::uniform(0.01, 40.0, 100).unwrap();
        assert_relative_eq!(grid.spacing(), 39.99 / 99.0);
        assert_eq!(grid.len(), 100);
        assert_eq!(grid.coordinates()[99], 40.0);
        assert_eq!(grid.coordinates()[0], 0.01);
    }

    #[test]
    fn test_invalid_grids() {
        assert!(Grid::uniform(1.0, 1.0, 10).is_err());
        assert!(Grid::uniform(2.0, 1.0, 10).is_err());
        assert!(Grid::uniform(0.0, 1.0, 1).is_err());
        assert!(Grid::uniform(0.0, f64::INFINITY, 10).is_err());
        assert!(Grid::uniform(f64::NAN, 1.0, 10).is_err());
    }

    #[test]
    fn test_interpolation_is_exact_for_linear_data() {
        let grid = Grid::uniform(0.0, 4.0, 5).unwrap();
        let values = grid.coordinates().map(|x| 3.0 * x + 1.0);

        assert_relative_eq!(grid.interpolate(&values, 2.5), 8.5);
        assert_relative_eq!(grid.interpolate(&values, 0.0), 1.0);
        assert_relative_eq!(grid.interpolate(&values, 4.0), 13.0);
    }

    #[test]
    fn test_interpolation_clamps_outside() {
        let grid = Grid::uniform(1.0, 2.0, 3).unwrap();
        let values = DVector::from_vec(vec![5.0, 6.0, 7.0]);

        assert_eq!(grid.interpolate(&values, -10.0), 5.0);
        assert_eq!(grid.interpolate(&values, 10.0), 7.0);
    }

    #[test]
    #[should_panic(expected = "one entry per grid point")]
    fn test_interpolation_length_mismatch() {
        let grid = Grid::uniform(0.0, 1.0, 3).unwrap();
        grid.interpolate(&DVector::zeros(2), 0.5);
    }
}
