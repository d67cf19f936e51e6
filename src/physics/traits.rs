//! Physical models traits and types
//!
//! This module defines the core API for physical models:
//! - `PhysicalModel`: trait for all right-hand sides integrated by the solvers
//! - `PhysicalState`: flexible state container
//! - `PhysicalQuantity`: type-safe quantity identifiers

use crate::physics::PhysicalData;
use std::collections::HashMap;
use std::fmt;

// =================================================================================================
// Physical quantities (Type-safe Identifiers)
// =================================================================================================

/// Known physical quantities (type-safe enum)
///
/// # Enum type safety
///
/// Quantities that are not listed here go through `Custom`, which keeps the
/// state keyed by a `Copy` identifier instead of a string.
///
/// # Example
/// ```
/// use arp_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
///
/// let temperature = PhysicalQuantity::Custom("Temperature");
/// let mut state = PhysicalState::empty();
/// state.set(temperature, PhysicalData::from_scalar(2.7));
/// assert!(state.get(temperature).is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhysicalQuantity {
    /// Effective coupling field G_eff(r) \[kpc (km/s)² / Msun\]
    Coupling,

    /// Cosmological scale factor a(t) (dimensionless)
    ScaleFactor,

    /// Matter-driven coupling channel Gc
    ColdCoupling,

    /// Radiation-driven coupling channel Gh
    HotCoupling,

    /// Extra (holographic) energy-density channel ρ_Λ
    VacuumDensity,

    /// Custom quantity (for use extension)
    Custom(&'static str),
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalQuantity::Coupling => write!(f, "Coupling"),
            PhysicalQuantity::ScaleFactor => write!(f, "ScaleFactor"),
            PhysicalQuantity::ColdCoupling => write!(f, "ColdCoupling"),
            PhysicalQuantity::HotCoupling => write!(f, "HotCoupling"),
            PhysicalQuantity::VacuumDensity => write!(f, "VacuumDensity"),
            PhysicalQuantity::Custom(name) => write!(f, "{}", name),
        }
    }
}

// =================================================================================================
// Physical State (Flexible State Container)
// =================================================================================================

/// Physical state of the system
///
/// Contains all evolving quantities at a given time. The spatial coupling model
/// stores one `Vector`; the cosmological model stores four `Scalar`s. Both go
/// through the same `+` and `* f64` operators, which is all a Runge-Kutta
/// update needs.
///
/// # Example
/// ```
/// use arp_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
///
/// let mut state = PhysicalState::new(PhysicalQuantity::ScaleFactor, PhysicalData::from_scalar(1.0));
/// state.set(PhysicalQuantity::ColdCoupling, PhysicalData::from_scalar(1.0));
/// assert_eq!(state.scalar(PhysicalQuantity::ScaleFactor), Some(1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalState {
    /// Physical quantities stored in a dictionary
    pub(crate) quantities: HashMap<PhysicalQuantity, PhysicalData>,
}

impl PhysicalState {
    /// Create a new state with primary quantity
    pub fn new(quantity: PhysicalQuantity, value: PhysicalData) -> Self {
        let mut quantities = HashMap::new();
        quantities.insert(quantity, value);

        Self { quantities }
    }

    /// Create an empty state
    pub fn empty() -> Self {
        Self {
            quantities: HashMap::new(),
        }
    }

    /// Builder: add a quantity
    pub fn with(mut self, quantity: PhysicalQuantity, value: PhysicalData) -> Self {
        self.set(quantity, value);
        self
    }

    /// Get a quantity by type
    pub fn get(&self, quantity: PhysicalQuantity) -> Option<&PhysicalData> {
        self.quantities.get(&quantity)
    }

    /// Get mutable reference to a quantity
    pub fn get_mut(&mut self, quantity: PhysicalQuantity) -> Option<&mut PhysicalData> {
        self.quantities.get_mut(&quantity)
    }

    /// Scalar value of a quantity, if present and scalar
    pub fn scalar(&self, quantity: PhysicalQuantity) -> Option<f64> {
        self.get(quantity).and_then(PhysicalData::try_as_scalar)
    }

    /// Set a quantity
    pub fn set(&mut self, quantity: PhysicalQuantity, value: PhysicalData) {
        self.quantities.insert(quantity, value);
    }

    /// List of available physical state quantities (sorted)
    pub fn available_quantities(&self) -> Vec<PhysicalQuantity> {
        let mut quantities: Vec<_> = self.quantities.keys().copied().collect();
        quantities.sort();
        quantities
    }

    /// Number of stored quantities
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// First NaN/Inf value, as `(quantity, index, value)`
    ///
    /// Quantities are scanned in sorted order so the report is deterministic.
    pub fn first_non_finite(&self) -> Option<(PhysicalQuantity, usize, f64)> {
        self.available_quantities().into_iter().find_map(|quantity| {
            self.quantities[&quantity]
                .first_non_finite()
                .map(|(index, value)| (quantity, index, value))
        })
    }
}

// Operator overloading for numerical operations

impl std::ops::Add for PhysicalState {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (quantity, value) in rhs.quantities {
            match self.quantities.remove(&quantity) {
                Some(existing_value) => {
                    self.quantities.insert(quantity, existing_value + value);
                }
                None => {
                    self.quantities.insert(quantity, value);
                }
            }
        }
        self
    }
}

impl std::ops::Mul<f64> for PhysicalState {
    type Output = Self;

    fn mul(mut self, scalar: f64) -> Self::Output {
        for data in self.quantities.values_mut() {
            data.apply(|x| x * scalar);
        }
        self
    }
}

// ==================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
/// Computes the right-hand side f(t, y) of dy/dt = f(t, y).
/// Does NOT integrate it (that's the Solver's job).
///
/// The model provides the "physics" (equations), the Solver provides
/// the "numerics" (method to advance them).
///
/// # Mandatory Point
/// Every evolving system (spatial coupling field, cosmological background,
/// inflation) implements this trait and runs through the same driver.
pub trait PhysicalModel: Send + Sync {
    /// Number of spatial points
    ///
    /// Vector quantities of the state must have this length. Purely temporal
    /// models return 1.
    fn points(&self) -> usize;

    /// Computes the time derivative of every quantity at `(time, state)`
    ///
    /// # Arguments
    /// * `time` - Current value of the independent variable
    /// * `state` - Current physical state of the system
    ///
    /// # Returns
    /// A state holding dq/dt for every quantity of `state`.
    ///
    /// # Note
    /// This method encapsulates ALL the physics: reaction, relaxation,
    /// diffusion, boundary conditions. Derived rates that could become
    /// slightly negative by rounding are clamped to zero before any square root.
    fn compute_physics(&self, time: f64, state: &PhysicalState) -> PhysicalState;

    /// Creates the initial state for this physical model
    fn setup_initial_state(&self) -> PhysicalState;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================
