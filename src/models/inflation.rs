//! Vacuum-driven inflation with an exponentially suppressed coupling
//!
//! The vacuum energy decays, and the coupling switches off as the vacuum
//! density drops below the suppression scale $\mu$:
//!
//! $$\rho_{vac}(t) = \rho_0 e^{-\alpha t} \qquad G_{eff}(t) = G \exp\left(-\frac{\mu}{\rho_{vac}(t) + 10^{-30}}\right)$$
//!
//! $$\frac{da}{dt} = \sqrt{\frac{8 \pi G_{eff}(t) \rho_{vac}(t)}{3}} \, a$$
//!
//! Unlike the other models, the right-hand side depends explicitly on time.

use crate::error::{ArpError, ArpResult};
use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};
use serde::Deserialize;
use std::f64::consts::PI;

/// Parameters of the inflation run
///
/// All keys are required in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct InflationParameters {
    /// Bare coupling G
    #[serde(rename = "G")]
    pub coupling: f64,

    /// Initial vacuum energy density
    #[serde(rename = "rho_vac_0")]
    pub initial_vacuum_density: f64,

    /// Suppression scale of the coupling
    pub mu: f64,

    /// Decay rate of the vacuum energy
    pub alpha: f64,

    /// Initial scale factor
    pub a0: f64,

    /// Time step
    pub dt: f64,

    /// End time
    pub t_max: f64,
}

impl InflationParameters {
    pub fn validate(&self) -> ArpResult<()> {
        for (key, value) in [
            ("G", self.coupling),
            ("rho_vac_0", self.initial_vacuum_density),
            ("mu", self.mu),
            ("alpha", self.alpha),
            ("a0", self.a0),
            ("dt", self.dt),
            ("t_max", self.t_max),
        ] {
            if !value.is_finite() {
                return Err(ArpError::config(format!("{} must be finite, got {}", key, value)));
            }
        }
        if self.dt <= 0.0 || self.t_max <= 0.0 {
            return Err(ArpError::config(format!(
                "dt and t_max must be positive, got dt = {}, t_max = {}",
                self.dt, self.t_max
            )));
        }
        if self.a0 <= 0.0 {
            return Err(ArpError::config(format!("a0 must be positive, got {}", self.a0)));
        }
        if self.initial_vacuum_density < 0.0 || self.coupling < 0.0 {
            return Err(ArpError::config("G and rho_vac_0 must be non-negative"));
        }
        Ok(())
    }

    /// Number of fixed steps needed to reach `t_max`
    pub fn steps(&self) -> usize {
        // tolerance keeps t_max/dt = 10000.000000001 at 10000 steps
        (self.t_max / self.dt - 1e-9).ceil().max(1.0) as usize
    }
}

/// Right-hand side `da/dt` of the inflation run
#[derive(Debug, Clone)]
pub struct VacuumInflationModel {
    parameters: InflationParameters,
}

impl VacuumInflationModel {
    pub fn new(parameters: InflationParameters) -> ArpResult<Self> {
        parameters.validate()?;
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &InflationParameters {
        &self.parameters
    }

    pub fn vacuum_density(&self, time: f64) -> f64 {
        self.parameters.initial_vacuum_density * (-self.parameters.alpha * time).exp()
    }

    pub fn effective_coupling(&self, time: f64) -> f64 {
        let rho = self.vacuum_density(time);
        self.parameters.coupling * (-self.parameters.mu / (rho + 1e-30)).exp()
    }

    /// Expansion rate `H(t)`, radicand clamped at zero
    pub fn expansion_rate(&self, time: f64) -> f64 {
        let h2 = 8.0 * PI * self.effective_coupling(time) * self.vacuum_density(time) / 3.0;
        h2.max(0.0).sqrt()
    }
}

impl PhysicalModel for VacuumInflationModel {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, time: f64, state: &PhysicalState) -> PhysicalState {
        let a = match state.scalar(PhysicalQuantity::ScaleFactor) {
            Some(a) => a,
            None => panic!("VacuumInflationModel requires a ScaleFactor scalar in the state"),
        };

        PhysicalState::new(
            PhysicalQuantity::ScaleFactor,
            PhysicalData::Scalar(self.expansion_rate(time) * a),
        )
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(
            PhysicalQuantity::ScaleFactor,
            PhysicalData::Scalar(self.parameters.a0),
        )
    }

    fn name(&self) -> &str {
        "Vacuum inflation"
    }
}

/// Recorded inflation history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InflationHistory {
    pub time: Vec<f64>,
    pub scale_factor: Vec<f64>,
    pub vacuum_density: Vec<f64>,
    pub effective_coupling: Vec<f64>,
}

impl InflationHistory {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn columns(&self) -> [(&'static str, &[f64]); 4] {
        [
            ("t", self.time.as_slice()),
            ("a", self.scale_factor.as_slice()),
            ("rho_vac", self.vacuum_density.as_slice()),
            ("G_eff", self.effective_coupling.as_slice()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parameters() -> InflationParameters {
        InflationParameters {
            coupling: 1.0,
            initial_vacuum_density: 1.0,
            mu: 0.0,
            alpha: 0.0,
            a0: 1.0,
            dt: 0.01,
            t_max: 1.0,
        }
    }

    #[test]
    fn test_constant_vacuum_gives_de_sitter_rate() {
        let model = VacuumInflationModel::new(parameters()).unwrap();
        let expected = (8.0 * PI / 3.0_f64).sqrt();

        assert_relative_eq!(model.expansion_rate(0.0), expected);
        assert_relative_eq!(model.expansion_rate(10.0), expected);

        let rate = model.compute_physics(0.0, &model.setup_initial_state());
        assert_relative_eq!(rate.scalar(PhysicalQuantity::ScaleFactor).unwrap(), expected);
    }

    #[test]
    fn test_coupling_suppression() {
        let model = VacuumInflationModel::new(InflationParameters {
            mu: 1.0,
            alpha: 1.0,
            ..parameters()
        })
        .unwrap();

        assert_relative_eq!(model.vacuum_density(1.0), (-1.0_f64).exp());
        assert!(model.effective_coupling(5.0) < model.effective_coupling(0.0));
        assert_relative_eq!(model.effective_coupling(0.0), (-1.0_f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_steps() {
        assert_eq!(parameters().steps(), 100);

        let original = InflationParameters {
            dt: 1e-39,
            t_max: 1e-35,
            ..parameters()
        };
        assert_eq!(original.steps(), 10000);
    }

    #[test]
    fn test_validation() {
        assert!(VacuumInflationModel::new(InflationParameters { dt: 0.0, ..parameters() }).is_err());
        assert!(VacuumInflationModel::new(InflationParameters { a0: -1.0, ..parameters() }).is_err());
        assert!(
            VacuumInflationModel::new(InflationParameters { mu: f64::NAN, ..parameters() }).is_err()
        );
    }
}
