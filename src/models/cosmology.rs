//! Two-channel adaptive coupling in an expanding background
//!
//! # State
//!
//! | Quantity                          | Symbol     | Meaning                        |
//! |-----------------------------------|------------|--------------------------------|
//! | [`PhysicalQuantity::ScaleFactor`]  | $a$        | scale factor                   |
//! | [`PhysicalQuantity::ColdCoupling`] | $G_c$      | matter-driven coupling channel |
//! | [`PhysicalQuantity::HotCoupling`]  | $G_h$      | radiation-driven channel       |
//! | [`PhysicalQuantity::VacuumDensity`]| $\rho_\Lambda$ | holographic energy density |
//!
//! # Equations
//!
//! ```text
//! H²       = (8π/3)(Gc + λh Gh)(Ωm/a³ + Ωr/a⁴) + (8π/3) ρΛ        H = sqrt(max(H², 0))
//! da/dt    = a H
//! dGc/dt   = αc ρm² - μc Gc                                       ρm = Ωm/a³
//! dGh/dt   = βh ρr H exp(-a/ac) - γh Gh                           ρr = Ωr/a⁴
//! dρΛ/dt   = κ (2a) ρholo / Lp² H - 2 κ Lp² ρholo H / a³
//! ```

use crate::error::{ArpError, ArpResult};
use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};
use serde::Deserialize;
use std::f64::consts::PI;

// =================================================================================================
// Parameters
// =================================================================================================

/// Rate and density parameters, read from the top level of the JSON file
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CosmologyParameters {
    /// Matter density parameter
    #[serde(rename = "Om")]
    pub omega_matter: f64,

    /// Radiation density parameter
    #[serde(rename = "Or")]
    pub omega_radiation: f64,

    /// Weight of the hot channel in the Friedmann equation
    pub lambda_h: f64,

    pub alpha_c: f64,
    pub mu_c: f64,
    pub beta_h: f64,

    /// Scale factor at which the hot channel switches off
    pub a_c: f64,

    pub gamma_h: f64,
    pub kappa: f64,
    pub rho_holo: f64,

    /// Squared Planck length
    #[serde(rename = "Lp2")]
    pub planck_length_squared: f64,
}

impl CosmologyParameters {
    pub fn validate(&self) -> ArpResult<()> {
        let values = [
            ("Om", self.omega_matter),
            ("Or", self.omega_radiation),
            ("lambda_h", self.lambda_h),
            ("alpha_c", self.alpha_c),
            ("mu_c", self.mu_c),
            ("beta_h", self.beta_h),
            ("a_c", self.a_c),
            ("gamma_h", self.gamma_h),
            ("kappa", self.kappa),
            ("rho_holo", self.rho_holo),
            ("Lp2", self.planck_length_squared),
        ];
        for (key, value) in values {
            if !value.is_finite() {
                return Err(ArpError::config(format!("{} must be finite, got {}", key, value)));
            }
        }
        if self.a_c <= 0.0 {
            return Err(ArpError::config(format!("a_c must be positive, got {}", self.a_c)));
        }
        if self.planck_length_squared <= 0.0 {
            return Err(ArpError::config(format!(
                "Lp2 must be positive, got {}",
                self.planck_length_squared
            )));
        }
        Ok(())
    }
}

/// Initial values of the four state variables
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CosmologyInitial {
    pub a: f64,
    #[serde(rename = "Gc")]
    pub cold_coupling: f64,
    #[serde(rename = "Gh")]
    pub hot_coupling: f64,
    #[serde(rename = "rhoL")]
    pub vacuum_density: f64,
}

impl Default for CosmologyInitial {
    fn default() -> Self {
        Self {
            a: 1.0,
            cold_coupling: 1.0,
            hot_coupling: 0.0,
            vacuum_density: 0.0,
        }
    }
}

impl CosmologyInitial {
    pub fn validate(&self) -> ArpResult<()> {
        for (key, value) in [
            ("init.a", self.a),
            ("init.Gc", self.cold_coupling),
            ("init.Gh", self.hot_coupling),
            ("init.rhoL", self.vacuum_density),
        ] {
            if !value.is_finite() {
                return Err(ArpError::config(format!("{} must be finite", key)));
            }
        }
        if self.a <= 0.0 {
            return Err(ArpError::config(format!(
                "init.a must be positive, got {}",
                self.a
            )));
        }
        Ok(())
    }
}

// =================================================================================================
// CosmologyModel
// =================================================================================================

/// Right-hand side of the four-variable background system
#[derive(Debug, Clone)]
pub struct CosmologyModel {
    parameters: CosmologyParameters,
    initial: CosmologyInitial,
}

impl CosmologyModel {
    /// # Errors
    ///
    /// `ArpError::Configuration` when a parameter or an initial value is
    /// invalid (see [`CosmologyParameters::validate`]).
    pub fn new(parameters: CosmologyParameters, initial: CosmologyInitial) -> ArpResult<Self> {
        parameters.validate()?;
        initial.validate()?;
        Ok(Self { parameters, initial })
    }

    pub fn parameters(&self) -> &CosmologyParameters {
        &self.parameters
    }

    /// Hubble rate, with the radicand clamped at zero
    pub fn hubble_rate(&self, a: f64, cold: f64, hot: f64, vacuum: f64) -> f64 {
        let p = &self.parameters;
        let densities = p.omega_matter / a.powi(3) + p.omega_radiation / a.powi(4);

        let h2 = (8.0 * PI / 3.0) * (cold + p.lambda_h * hot) * densities
            + (8.0 * PI * vacuum) / 3.0;

        h2.max(0.0).sqrt()
    }

    /// Time derivatives `[da, dGc, dGh, drhoL]`
    pub fn derivatives(&self, a: f64, cold: f64, hot: f64, vacuum: f64) -> [f64; 4] {
        let p = &self.parameters;
        let h = self.hubble_rate(a, cold, hot, vacuum);

        let rho_m = p.omega_matter / a.powi(3);
        let rho_g = p.omega_radiation / a.powi(4);

        let d_cold = p.alpha_c * rho_m * rho_m - p.mu_c * cold;
        let d_hot = p.beta_h * (rho_g * h) * (-a / p.a_c).exp() - p.gamma_h * hot;
        let d_vacuum = p.kappa * ((2.0 * a) * p.rho_holo / p.planck_length_squared * h)
            - 2.0 * p.kappa * p.planck_length_squared * p.rho_holo * h / a.powi(3);

        [a * h, d_cold, d_hot, d_vacuum]
    }
}

fn read_variables(state: &PhysicalState) -> Option<(f64, f64, f64, f64)> {
    Some((
        state.scalar(PhysicalQuantity::ScaleFactor)?,
        state.scalar(PhysicalQuantity::ColdCoupling)?,
        state.scalar(PhysicalQuantity::HotCoupling)?,
        state.scalar(PhysicalQuantity::VacuumDensity)?,
    ))
}

impl PhysicalModel for CosmologyModel {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, _time: f64, state: &PhysicalState) -> PhysicalState {
        let (a, cold, hot, vacuum) = match read_variables(state) {
            Some(values) => values,
            None => panic!("CosmologyModel requires a, Gc, Gh and rhoL scalars in the state"),
        };
        let [da, d_cold, d_hot, d_vacuum] = self.derivatives(a, cold, hot, vacuum);

        PhysicalState::new(PhysicalQuantity::ScaleFactor, PhysicalData::Scalar(da))
            .with(PhysicalQuantity::ColdCoupling, PhysicalData::Scalar(d_cold))
            .with(PhysicalQuantity::HotCoupling, PhysicalData::Scalar(d_hot))
            .with(PhysicalQuantity::VacuumDensity, PhysicalData::Scalar(d_vacuum))
    }

    fn setup_initial_state(&self) -> PhysicalState {
        let init = &self.initial;
        PhysicalState::new(PhysicalQuantity::ScaleFactor, PhysicalData::Scalar(init.a))
            .with(PhysicalQuantity::ColdCoupling, PhysicalData::Scalar(init.cold_coupling))
            .with(PhysicalQuantity::HotCoupling, PhysicalData::Scalar(init.hot_coupling))
            .with(PhysicalQuantity::VacuumDensity, PhysicalData::Scalar(init.vacuum_density))
    }

    fn name(&self) -> &str {
        "Adaptive coupling cosmology"
    }
}

// =================================================================================================
// CosmicEvolution
// =================================================================================================

/// Recorded background history, one row per recorded time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CosmicEvolution {
    pub time: Vec<f64>,
    pub scale_factor: Vec<f64>,
    pub cold_coupling: Vec<f64>,
    pub hot_coupling: Vec<f64>,
    pub vacuum_density: Vec<f64>,
    pub hubble_rate: Vec<f64>,
}

impl CosmicEvolution {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Columns in CSV order, with their headers
    pub fn columns(&self) -> [(&'static str, &[f64]); 6] {
        [
            ("t", self.time.as_slice()),
            ("a", self.scale_factor.as_slice()),
            ("Gc", self.cold_coupling.as_slice()),
            ("Gh", self.hot_coupling.as_slice()),
            ("rhoL", self.vacuum_density.as_slice()),
            ("H", self.hubble_rate.as_slice()),
        ]
    }

    pub(crate) fn push(&mut self, time: f64, state: &PhysicalState, model: &CosmologyModel) -> bool {
        let Some((a, cold, hot, vacuum)) = read_variables(state) else {
            return false;
        };
        self.time.push(time);
        self.scale_factor.push(a);
        self.cold_coupling.push(cold);
        self.hot_coupling.push(hot);
        self.vacuum_density.push(vacuum);
        self.hubble_rate.push(model.hubble_rate(a, cold, hot, vacuum));
        true
    }
}
