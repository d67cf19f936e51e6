//! Helper functions for integration tests

#![allow(dead_code)]

use arp_rs::physics::{PhysicalModel, PhysicalQuantity};
use arp_rs::solver::{Scenario, SimulationResult};
use nalgebra::DVector;

/// Scenario starting from the model's own initial state
pub fn create_simple_scenario(model: Box<dyn PhysicalModel>) -> Scenario {
    Scenario::from_model(model)
}

/// First entry of `quantity` in the final state
pub fn final_value(result: &SimulationResult, quantity: PhysicalQuantity) -> f64 {
    result.final_state.get(quantity).unwrap().as_slice()[0]
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Sum of absolute differences between neighbours
pub fn total_variation(values: &DVector<f64>) -> f64 {
    values
        .as_slice()
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_total_variation() {
        let values = DVector::from_vec(vec![3.0, 1.0, 2.0]);
        assert!((total_variation(&values) - 3.0).abs() < 1e-12);
    }
}
