//! Mock physical models for testing
//!
//! These models have known analytical solutions (or known failure points),
//! making them ideal for validating the solvers and the evolver.

#![allow(dead_code)]

use arp_rs::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};

/// Quantity evolved by every mock model
pub const Y: PhysicalQuantity = PhysicalQuantity::Custom("y");

// =================================================================================================
// Exponential Decay: dy/dt = -k*y
// =================================================================================================

/// Exponential decay model: dy/dt = -k*y
///
/// Analytical solution: y(t) = y₀ * exp(-k*t)
pub struct ExponentialDecay {
    pub points: usize,
    pub decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(points: usize, decay_rate: f64) -> Self {
        Self { points, decay_rate }
    }

    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 * (-self.decay_rate * t).exp()
    }
}

impl PhysicalModel for ExponentialDecay {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_physics(&self, _time: f64, state: &PhysicalState) -> PhysicalState {
        let mut result = state.clone();
        if let Some(y) = result.get_mut(Y) {
            y.apply(|y| -self.decay_rate * y);
        }
        result
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(Y, PhysicalData::uniform_vector(self.points, 1.0))
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

// =================================================================================================
// Constant Growth: dy/dt = c
// =================================================================================================

/// Constant growth model: dy/dt = c
///
/// Euler is exact for this problem, RK4 too.
pub struct ConstantGrowth {
    pub points: usize,
    pub growth_rate: f64,
}

impl ConstantGrowth {
    pub fn new(points: usize, growth_rate: f64) -> Self {
        Self { points, growth_rate }
    }

    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 + self.growth_rate * t
    }
}

impl PhysicalModel for ConstantGrowth {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_physics(&self, _time: f64, _state: &PhysicalState) -> PhysicalState {
        PhysicalState::new(Y, PhysicalData::uniform_vector(self.points, self.growth_rate))
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(Y, PhysicalData::uniform_vector(self.points, 0.0))
    }

    fn name(&self) -> &str {
        "Constant Growth"
    }
}

// =================================================================================================
// Late Blowup: dy/dt = Inf once t > threshold
// =================================================================================================

/// Zero slope until `threshold`, infinite slope afterwards
pub struct LateBlowup {
    pub threshold: f64,
}

impl PhysicalModel for LateBlowup {
    fn points(&self) -> usize {
        2
    }

    fn compute_physics(&self, time: f64, _state: &PhysicalState) -> PhysicalState {
        let slope = if time > self.threshold { f64::INFINITY } else { 0.0 };
        PhysicalState::new(Y, PhysicalData::uniform_vector(2, slope))
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(Y, PhysicalData::uniform_vector(2, 1.0))
    }

    fn name(&self) -> &str {
        "Late Blowup"
    }
}

// =================================================================================================
// Tests for Mock Models
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_decay_analytical() {
        let model = ExponentialDecay::new(5, 0.5);
        assert!((model.analytical_solution(0.0, 1.0) - 1.0).abs() < 1e-10);
        assert!((model.analytical_solution(1.0, 1.0) - 0.6065306597).abs() < 1e-6);
    }

    #[test]
    fn test_constant_growth_analytical() {
        let model = ConstantGrowth::new(5, 2.0);
        assert!((model.analytical_solution(5.0, 0.0) - 10.0).abs() < 1e-10);
    }
}
