//! Adaptive effective coupling over galactic radius
//!
//! # Model equation
//!
//! The coupling $G(r, t)$ is sourced by the square of the local density and
//! relaxes toward zero at rate $\mu$:
//!
//! $$\frac{\partial G}{\partial t} = \alpha \rho(r)^2 - \mu G + D \frac{\partial^2 G}{\partial r^2}$$
//!
//! - $\alpha$: reaction gain, fixed by the anchor calibration
//! - $\mu$: relaxation rate \[1/time\]
//! - $D$: optional diffusion coefficient (reflecting boundaries)
//!
//! Without diffusion every point relaxes independently toward
//! $G^*(r) = \alpha \rho(r)^2 / \mu$.
//!
//! # State
//!
//! One [`PhysicalQuantity::Coupling`] vector with one entry per grid point,
//! initialised to the baseline value everywhere.

use crate::models::density::DensityField;
use crate::physics::{
    DiffusionOperator, PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState,
};
use nalgebra::DVector;

// =================================================================================================
// AdaptiveCouplingModel
// =================================================================================================

/// Reaction-relaxation(-diffusion) right-hand side for the coupling field
///
/// # Example
///
/// ```rust
/// use arp_rs::models::AdaptiveCouplingModel;
/// use arp_rs::physics::{Grid, DiffusionOperator, PhysicalModel, PhysicalQuantity};
/// use nalgebra::DVector;
///
/// let grid = Grid::uniform(1.0, 3.0, 3).unwrap();
/// let density = DVector::from_vec(vec![2.0, 1.0, 0.5]);
/// let model = AdaptiveCouplingModel::new(
///     &density, 1.0, 1.0, DiffusionOperator::disabled(&grid), 1.0,
/// );
///
/// // Steady state where rho = 1 equals the baseline
/// assert_eq!(model.steady_state()[1], 1.0);
///
/// let rate = model.compute_physics(0.0, &model.setup_initial_state());
/// let rate = rate.get(PhysicalQuantity::Coupling).unwrap().as_vector();
/// assert_eq!(rate[1], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveCouplingModel {
    /// $\rho^2$ at every grid point, computed once
    density_squared: DVector<f64>,

    /// Reaction gain $\alpha$
    gain: f64,

    /// Relaxation rate $\mu$
    relaxation_rate: f64,

    diffusion: DiffusionOperator,

    /// Initial value of the field
    baseline: f64,
}

impl AdaptiveCouplingModel {
    /// Build the model from a sampled density
    ///
    /// The density is squared here so each RHS evaluation is a pure
    /// vector combination.
    pub fn new(
        density: &DVector<f64>,
        gain: f64,
        relaxation_rate: f64,
        diffusion: DiffusionOperator,
        baseline: f64,
    ) -> Self {
        Self {
            density_squared: density.map(|rho| rho * rho),
            gain,
            relaxation_rate,
            diffusion,
            baseline,
        }
    }

    /// Convenience constructor from a [`DensityField`]
    pub fn from_density_field(
        field: &DensityField,
        gain: f64,
        relaxation_rate: f64,
        diffusion: DiffusionOperator,
        baseline: f64,
    ) -> Self {
        Self::new(&field.total, gain, relaxation_rate, diffusion, baseline)
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn relaxation_rate(&self) -> f64 {
        self.relaxation_rate
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn diffusion(&self) -> &DiffusionOperator {
        &self.diffusion
    }

    /// Pointwise steady state $\alpha \rho^2 / \mu$ of the diffusion-free system
    ///
    /// With $\mu = 0$ there is no steady state and the baseline is returned.
    pub fn steady_state(&self) -> DVector<f64> {
        if self.relaxation_rate == 0.0 {
            return DVector::from_element(self.density_squared.len(), self.baseline);
        }
        &self.density_squared * (self.gain / self.relaxation_rate)
    }

    /// $dG/dt$ for a given field
    pub fn rate(&self, coupling: &DVector<f64>) -> DVector<f64> {
        let mut rate = &self.density_squared * self.gain - coupling * self.relaxation_rate;
        if self.diffusion.is_active() {
            rate += self.diffusion.apply(coupling);
        }
        rate
    }
}

impl PhysicalModel for AdaptiveCouplingModel {
    fn points(&self) -> usize {
        self.density_squared.len()
    }

    fn compute_physics(&self, _time: f64, state: &PhysicalState) -> PhysicalState {
        let coupling = match state.get(PhysicalQuantity::Coupling) {
            Some(PhysicalData::Vector(values)) => values,
            _ => panic!("AdaptiveCouplingModel requires a Coupling vector in the state"),
        };

        PhysicalState::new(
            PhysicalQuantity::Coupling,
            PhysicalData::Vector(self.rate(coupling)),
        )
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(
            PhysicalQuantity::Coupling,
            PhysicalData::uniform_vector(self.points(), self.baseline),
        )
    }

    fn name(&self) -> &str {
        "Adaptive coupling field"
    }

    fn description(&self) -> Option<&str> {
        Some("dG/dt = alpha rho^2 - mu G + D lap(G), reflecting boundaries")
    }
}

// =================================================================================================
// RotationCurve
// =================================================================================================

/// Radial profile produced by a converged galaxy run
///
/// Every vector has one entry per grid point, in grid order.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationCurve {
    pub radius: DVector<f64>,
    pub rho_bulge: DVector<f64>,
    pub rho_disk: DVector<f64>,
    pub rho_gas: DVector<f64>,
    pub rho_total: DVector<f64>,
    pub enclosed_mass: DVector<f64>,
    pub coupling: DVector<f64>,
    /// Circular velocity \[km/s\]
    pub velocity: DVector<f64>,
    /// Centripetal acceleration \[m/s²\]
    pub acceleration: DVector<f64>,

    /// Pivot radius used for calibration \[kpc\]
    pub pivot_radius: f64,
    /// Calibrated reaction gain
    pub gain: f64,
    /// Number of integration steps performed
    pub steps: usize,
}

impl RotationCurve {
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    /// Columns in CSV order, with their headers
    pub fn columns(&self) -> [(&'static str, &DVector<f64>); 9] {
        [
            ("r_kpc", &self.radius),
            ("rho_bulge", &self.rho_bulge),
            ("rho_disk", &self.rho_disk),
            ("rho_gas", &self.rho_gas),
            ("rho_total", &self.rho_total),
            ("M_enc_Msun", &self.enclosed_mass),
            ("G_eff", &self.coupling),
            ("v_kms", &self.velocity),
            ("a_m_s2", &self.acceleration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Grid;
    use approx::assert_relative_eq;

    fn model(diffusion: f64) -> AdaptiveCouplingModel {
        let grid = Grid::uniform(0.0, 4.0, 5).unwrap();
        let density = DVector::from_vec(vec![3.0, 2.0, 1.0, 0.5, 0.25]);
        AdaptiveCouplingModel::new(
            &density,
            2.0,
            4.0,
            DiffusionOperator::new(diffusion, &grid).unwrap(),
            1.0,
        )
    }

    #[test]
    fn test_initial_state_is_baseline() {
        let model = model(0.0);
        let state = model.setup_initial_state();
        let values = state.get(PhysicalQuantity::Coupling).unwrap().as_vector();

        assert_eq!(model.points(), 5);
        assert!(values.iter().all(|&g| g == 1.0));
    }

    #[test]
    fn test_reaction_rate() {
        let model = model(0.0);
        let rate = model.compute_physics(0.0, &model.setup_initial_state());
        let rate = rate.get(PhysicalQuantity::Coupling).unwrap().as_vector();

        // 2 * rho² - 4 * 1
        assert_relative_eq!(rate[0], 2.0 * 9.0 - 4.0);
        assert_relative_eq!(rate[2], 2.0 * 1.0 - 4.0);
    }

    #[test]
    fn test_steady_state_has_zero_rate() {
        let model = model(0.0);
        let steady = model.steady_state();
        let rate = model.rate(&steady);

        assert!(rate.iter().all(|&x| x.abs() < 1e-12));
        assert_relative_eq!(steady[1], 2.0 * 4.0 / 4.0);
    }

    #[test]
    fn test_diffusion_adds_laplacian() {
        let with = model(0.5);
        let without = model(0.0);
        let field = DVector::from_vec(vec![0.0, 1.0, 0.0, 1.0, 0.0]);

        let difference = with.rate(&field) - without.rate(&field);
        // h = 1: interior laplacian at i = 1 is (0 - 2 + 0) = -2
        assert_relative_eq!(difference[1], -1.0);
        // reflecting boundary at i = 0: 2 (1 - 0) = 2
        assert_relative_eq!(difference[0], 1.0);
    }

    #[test]
    fn test_zero_rate_steady_state() {
        let grid = Grid::uniform(0.0, 1.0, 3).unwrap();
        let model = AdaptiveCouplingModel::new(
            &DVector::from_element(3, 1.0),
            1.0,
            0.0,
            DiffusionOperator::disabled(&grid),
            7.0,
        );
        assert!(model.steady_state().iter().all(|&g| g == 7.0));
    }

    #[test]
    #[should_panic(expected = "requires a Coupling vector")]
    fn test_missing_quantity() {
        model(0.0).compute_physics(0.0, &PhysicalState::empty());
    }
}
