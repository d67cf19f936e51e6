//! Error taxonomy
//!
//! Every fallible operation of the crate returns [`ArpResult`]. The core never
//! recovers internally: configuration problems abort before integration starts,
//! divergence aborts the run, and the caller decides what to do next.
//!
//! Negative radicands under a square root are **not** errors: they are clamped to
//! zero wherever a rate or a velocity is derived.

use thiserror::Error;

/// Root error type for all simulation failures.
#[derive(Error, Debug)]
pub enum ArpError {
    /// Missing or invalid parameter, grid or solver setting.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The anchor condition cannot be solved (non-positive density, bad rate).
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    /// A non-finite value appeared in the state after a step.
    #[error(
        "numerical divergence at step {step} (t = {time}): {quantity}[{index}] = {value}. \
         Try a smaller time step (more steps per period)"
    )]
    NumericalDivergence {
        step: usize,
        time: f64,
        quantity: String,
        index: usize,
        value: f64,
    },

    /// A converged run was required but the run was interrupted.
    #[error("run aborted after {completed_steps} steps")]
    Aborted { completed_steps: usize },

    /// CSV or plot writer failure.
    #[error("output error: {0}")]
    Output(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ArpError {
    /// Shorthand used by validation code.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type ArpResult<T> = Result<T, ArpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divergence_message_names_step_and_quantity() {
        let error = ArpError::NumericalDivergence {
            step: 42,
            time: 0.5,
            quantity: "Coupling".to_string(),
            index: 3,
            value: f64::NAN,
        };
        let message = error.to_string();
        assert!(message.contains("step 42"));
        assert!(message.contains("Coupling[3]"));
    }

    #[test]
    fn test_aborted_message() {
        let error = ArpError::Aborted { completed_steps: 7 };
        assert!(error.to_string().contains('7'));
    }
}
