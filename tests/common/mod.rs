//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ConstantGrowth, ExponentialDecay, LateBlowup, Y};
pub use test_helpers::{create_simple_scenario, final_value, relative_error, total_variation};
