//! Anchor calibration of the reaction gain
//!
//! The field obeys `dG/dt = gain * rho² - mu * G`. Its pointwise steady state is
//! `G* = gain * rho² / mu`, so requiring `G*(anchor) = target_ratio * baseline`
//! fixes the single free parameter:
//!
//! ```text
//! gain = target_ratio * mu * baseline / rho_anchor²
//! ```

use crate::error::{ArpError, ArpResult};

/// Closed-form solver for the reaction gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibrator {
    baseline: f64,
}

impl Calibrator {
    /// Calibrator for a field relaxing toward `baseline`
    pub fn new(baseline: f64) -> Self {
        Self { baseline }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Gain such that the steady state at the anchor equals
    /// `target_ratio * baseline`
    ///
    /// # Errors
    ///
    /// `ArpError::InvalidCalibration` when the anchor density is not a finite
    /// positive number, or when the relaxation rate, the target ratio or the
    /// baseline is negative or not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arp_rs::calibration::Calibrator;
    ///
    /// let calibrator = Calibrator::new(4.30091e-6);
    /// let gain = calibrator.calibrate(0.5, 2.0, 1.0).unwrap();
    /// assert!((gain * 0.25 - 2.0 * 4.30091e-6).abs() < 1e-18);
    /// ```
    pub fn calibrate(
        &self,
        density_at_anchor: f64,
        relaxation_rate: f64,
        target_ratio: f64,
    ) -> ArpResult<f64> {
        if !density_at_anchor.is_finite() || density_at_anchor <= 0.0 {
            return Err(ArpError::InvalidCalibration(format!(
                "density at the anchor must be positive and finite, got {}",
                density_at_anchor
            )));
        }
        if !relaxation_rate.is_finite() || relaxation_rate < 0.0 {
            return Err(ArpError::InvalidCalibration(format!(
                "relaxation rate must be non-negative and finite, got {}",
                relaxation_rate
            )));
        }
        if !target_ratio.is_finite() || target_ratio < 0.0 {
            return Err(ArpError::InvalidCalibration(format!(
                "target ratio must be non-negative and finite, got {}",
                target_ratio
            )));
        }
        if !self.baseline.is_finite() || self.baseline < 0.0 {
            return Err(ArpError::InvalidCalibration(format!(
                "baseline must be non-negative and finite, got {}",
                self.baseline
            )));
        }

        let gain = target_ratio * relaxation_rate * self.baseline
            / (density_at_anchor * density_at_anchor);

        log::debug!(
            "calibrated gain {:.6e} (rho_anchor = {:.6e}, mu = {}, ratio = {})",
            gain,
            density_at_anchor,
            relaxation_rate,
            target_ratio
        );

        Ok(gain)
    }
}
