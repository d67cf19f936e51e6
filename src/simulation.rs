//! End-to-end simulation pipelines
//!
//! Each pipeline turns a validated configuration into a result table:
//!
//! ```text
//! GalaxyConfig ──► Grid ──► DensityField ──► Calibrator ──► AdaptiveCouplingModel
//!                                                                 │
//!                                       RotationCurve ◄── kinematics ◄── RK4 run
//!
//! CosmologyConfig ──► CosmologyModel ──► RK4 run ──► CosmicEvolution
//! InflationConfig ──► VacuumInflationModel ──► RK4 run ──► InflationHistory
//! ```
//!
//! Construction does all the fallible setup (grid, calibration, model
//! validation), so `new` fails fast and `run` only integrates. A pipeline only
//! returns a result for a converged run; an aborted run becomes
//! [`ArpError::Aborted`] and nothing downstream (kinematics, files) is produced.
//!
//! # Example
//!
//! ```rust,no_run
//! use arp_rs::config::GalaxyConfig;
//! use arp_rs::physics::PhysicalConstants;
//! use arp_rs::simulation::{write_rotation_curve_artifacts, GalaxySimulation};
//!
//! # fn main() -> arp_rs::error::ArpResult<()> {
//! let config = GalaxyConfig::from_path("demos/params/milky_way.json")?;
//! let constants = PhysicalConstants::default();
//!
//! let curve = GalaxySimulation::new(config, constants)?.run()?;
//! write_rotation_curve_artifacts(&curve, &constants, "out")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::calibration::Calibrator;
use crate::config::{CosmologyConfig, GalaxyConfig, InflationConfig};
use crate::error::{ArpError, ArpResult};
use crate::models::{
    AdaptiveCouplingModel, CosmicEvolution, CosmologyModel, DensityField, InflationHistory,
    RotationCurve, VacuumInflationModel,
};
use crate::output::export::{
    export_evolution_csv, export_inflation_csv, export_rotation_curve_csv, CsvConfig, CsvMetadata,
};
use crate::output::visualization::{
    plot_acceleration_profile, plot_rotation_curve, plot_scale_factor, plot_series, PlotConfig,
};
use crate::physics::kinematics::{centripetal_acceleration, circular_velocity};
use crate::physics::{DiffusionOperator, Grid, PhysicalConstants, PhysicalQuantity};
use crate::solver::{
    AbortHandle, FieldEvolver, RK4Solver, RecordPolicy, RunStatus, Scenario, SimulationResult,
    Solver, SolverConfiguration,
};

/// Run the evolver and require a converged result
fn evolve(
    solver: &dyn Solver,
    scenario: &Scenario,
    config: &SolverConfiguration,
    abort: Option<AbortHandle>,
) -> ArpResult<SimulationResult> {
    let mut evolver = FieldEvolver::new(solver, scenario, config)?;
    if let Some(handle) = abort {
        evolver = evolver.with_abort_handle(handle);
    }

    let result = evolver.run()?;
    match result.status {
        RunStatus::Converged => Ok(result),
        RunStatus::Aborted { completed_steps } => Err(ArpError::Aborted { completed_steps }),
    }
}

// =================================================================================================
// Galaxy
// =================================================================================================

/// Rotation-curve prediction for one galaxy
pub struct GalaxySimulation {
    config: GalaxyConfig,
    constants: PhysicalConstants,
    grid: Grid,
    density: DensityField,
    diffusion: DiffusionOperator,
    gain: f64,
}

impl GalaxySimulation {
    /// Validate the configuration, sample the density and calibrate the gain
    ///
    /// # Errors
    ///
    /// - `ArpError::Configuration` for invalid parameters, grid or diffusion
    /// - `ArpError::InvalidCalibration` if the density vanishes at the pivot
    pub fn new(config: GalaxyConfig, constants: PhysicalConstants) -> ArpResult<Self> {
        config.validate()?;

        let grid = Grid::uniform(config.grid.r_min, config.grid.r_max, config.grid.nr)?;
        let diffusion = DiffusionOperator::new(config.arp.diffusion, &grid)?;
        let density = DensityField::evaluate(&config.mass, &grid);

        let pivot_density = density.total_at(&grid, config.arp.pivot_radius);
        let gain = Calibrator::new(constants.gravitational_constant).calibrate(
            pivot_density,
            config.arp.mu,
            config.arp.target_ratio,
        )?;

        if let Some(configured) = config.arp.gain {
            log::debug!("Configured gain {:e} replaced by calibration", configured);
        }
        log::debug!(
            "Pivot r = {} kpc, rho = {:e}, gain = {:e}",
            config.arp.pivot_radius,
            pivot_density,
            gain
        );

        Ok(Self {
            config,
            constants,
            grid,
            density,
            diffusion,
            gain,
        })
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn density(&self) -> &DensityField {
        &self.density
    }

    /// Calibrated reaction gain
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Orbital period at the anchor, `2π R0 / V0`
    pub fn characteristic_period(&self) -> f64 {
        self.config.anchor.period()
    }

    /// Fixed-step schedule: `t_units_T0` periods, `steps_per_period` steps each
    pub fn solver_configuration(&self) -> SolverConfiguration {
        SolverConfiguration::from_periods(
            self.characteristic_period(),
            self.config.arp.periods,
            self.config.arp.steps_per_period,
        )
        .with_recording(RecordPolicy::FinalOnly)
    }

    /// Build the coupling model on the sampled density
    pub fn model(&self) -> AdaptiveCouplingModel {
        AdaptiveCouplingModel::from_density_field(
            &self.density,
            self.gain,
            self.config.arp.mu,
            self.diffusion,
            self.constants.gravitational_constant,
        )
    }

    /// Integrate with RK4 and derive the rotation curve
    pub fn run(&self) -> ArpResult<RotationCurve> {
        self.run_with(&RK4Solver, None)
    }

    /// Integrate with any stepping method, optionally abortable
    ///
    /// # Errors
    ///
    /// - `ArpError::NumericalDivergence` if the field blows up
    /// - `ArpError::Aborted` if `abort` was raised before the last step
    pub fn run_with(
        &self,
        solver: &dyn Solver,
        abort: Option<AbortHandle>,
    ) -> ArpResult<RotationCurve> {
        let scenario = Scenario::from_model(Box::new(self.model()));
        let solver_config = self.solver_configuration();

        let result = evolve(solver, &scenario, &solver_config, abort)?;

        let coupling = result
            .final_state
            .get(PhysicalQuantity::Coupling)
            .and_then(|data| data.try_as_vector())
            .cloned()
            .ok_or_else(|| ArpError::config("final state holds no coupling field"))?;

        let velocity = circular_velocity(&coupling, &self.density.enclosed_mass, &self.density.radius);
        let acceleration = centripetal_acceleration(&velocity, &self.density.radius, &self.constants);

        Ok(RotationCurve {
            radius: self.density.radius.clone(),
            rho_bulge: self.density.bulge.clone(),
            rho_disk: self.density.disk.clone(),
            rho_gas: self.density.gas.clone(),
            rho_total: self.density.total.clone(),
            enclosed_mass: self.density.enclosed_mass.clone(),
            coupling,
            velocity,
            acceleration,
            pivot_radius: self.config.arp.pivot_radius,
            gain: self.gain,
            steps: solver_config.time_steps,
        })
    }
}

// =================================================================================================
// Cosmology
// =================================================================================================

/// Background evolution of the four-variable cosmology
pub struct CosmologySimulation {
    config: CosmologyConfig,
    model: CosmologyModel,
}

impl CosmologySimulation {
    pub fn new(config: CosmologyConfig) -> ArpResult<Self> {
        config.validate()?;
        let model = CosmologyModel::new(config.parameters, config.init)?;
        Ok(Self { config, model })
    }

    pub fn model(&self) -> &CosmologyModel {
        &self.model
    }

    /// `n_steps` steps from `t_start` to `t_end`, every step recorded
    pub fn solver_configuration(&self) -> SolverConfiguration {
        let span = &self.config.time;
        SolverConfiguration::time_evolution(span.duration(), span.n_steps)
            .with_start_time(span.t_start)
            .with_recording(RecordPolicy::Every(1))
    }

    pub fn run(&self) -> ArpResult<CosmicEvolution> {
        self.run_with(&RK4Solver, None)
    }

    pub fn run_with(
        &self,
        solver: &dyn Solver,
        abort: Option<AbortHandle>,
    ) -> ArpResult<CosmicEvolution> {
        let scenario = Scenario::from_model(Box::new(self.model.clone()));
        let result = evolve(solver, &scenario, &self.solver_configuration(), abort)?;

        let mut evolution = CosmicEvolution::default();
        for (time, state) in result.time_points.iter().zip(&result.state_trajectory) {
            if !evolution.push(*time, state, &self.model) {
                return Err(ArpError::config(format!(
                    "state at t = {} lacks a cosmological variable",
                    time
                )));
            }
        }
        Ok(evolution)
    }
}

// =================================================================================================
// Inflation
// =================================================================================================

/// Scale factor under a decaying vacuum density
pub struct InflationSimulation {
    model: VacuumInflationModel,
}

impl InflationSimulation {
    pub fn new(config: InflationConfig) -> ArpResult<Self> {
        Ok(Self {
            model: VacuumInflationModel::new(config.parameters)?,
        })
    }

    pub fn model(&self) -> &VacuumInflationModel {
        &self.model
    }

    /// Steps of `dt` until `t_max` is reached
    pub fn solver_configuration(&self) -> SolverConfiguration {
        let parameters = self.model.parameters();
        let steps = parameters.steps();
        SolverConfiguration::time_evolution(parameters.dt * steps as f64, steps)
    }

    pub fn run(&self) -> ArpResult<InflationHistory> {
        self.run_with(&RK4Solver, None)
    }

    pub fn run_with(
        &self,
        solver: &dyn Solver,
        abort: Option<AbortHandle>,
    ) -> ArpResult<InflationHistory> {
        let scenario = Scenario::from_model(Box::new(self.model.clone()));
        let result = evolve(solver, &scenario, &self.solver_configuration(), abort)?;

        let mut history = InflationHistory::default();
        for (&time, state) in result.time_points.iter().zip(&result.state_trajectory) {
            let a = state
                .scalar(PhysicalQuantity::ScaleFactor)
                .ok_or_else(|| ArpError::config(format!("no scale factor at t = {}", time)))?;

            history.time.push(time);
            history.scale_factor.push(a);
            history.vacuum_density.push(self.model.vacuum_density(time));
            history.effective_coupling.push(self.model.effective_coupling(time));
        }
        Ok(history)
    }
}

// =================================================================================================
// Artifacts
// =================================================================================================

type WriteResult = Result<(), Box<dyn std::error::Error>>;

/// Files written by one artifact writer
///
/// A failed write removes every file written before it, so a directory never
/// holds a partial set.
struct ArtifactSet {
    written: Vec<PathBuf>,
}

impl ArtifactSet {
    fn new(out_dir: &Path) -> ArpResult<Self> {
        std::fs::create_dir_all(out_dir)?;
        Ok(Self { written: Vec::new() })
    }

    fn write(&mut self, path: PathBuf, writer: impl FnOnce(&Path) -> WriteResult) -> ArpResult<()> {
        match writer(&path) {
            Ok(()) => {
                self.written.push(path);
                Ok(())
            }
            Err(error) => {
                self.discard();
                Err(ArpError::Output(format!("{}: {}", path.display(), error)))
            }
        }
    }

    fn discard(&mut self) {
        for file in self.written.drain(..) {
            if let Err(error) = std::fs::remove_file(&file) {
                log::warn!("Could not remove {}: {}", file.display(), error);
            }
        }
    }

    fn finish(self) -> Vec<PathBuf> {
        self.written
    }
}

/// Write `rotation_curve.csv`, `rotation_curve.png` and
/// `acceleration_profile.png` into `out_dir`
///
/// Returns the written paths. On failure no file of the set is left behind.
pub fn write_rotation_curve_artifacts(
    curve: &RotationCurve,
    constants: &PhysicalConstants,
    out_dir: impl AsRef<Path>,
) -> ArpResult<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    let mut artifacts = ArtifactSet::new(out_dir)?;

    let mut metadata = CsvMetadata::new("Adaptive coupling", "");
    metadata.time_steps = Some(curve.steps);
    metadata.add_custom("gain", &format!("{:e}", curve.gain));
    metadata.add_custom("pivot radius (kpc)", &curve.pivot_radius.to_string());
    let csv_config = CsvConfig::default().with_metadata(metadata);

    artifacts.write(out_dir.join("rotation_curve.csv"), |path| {
        export_rotation_curve_csv(curve, path, &csv_config)
    })?;
    artifacts.write(out_dir.join("rotation_curve.png"), |path| {
        plot_rotation_curve(curve, path, None)
    })?;
    artifacts.write(out_dir.join("acceleration_profile.png"), |path| {
        plot_acceleration_profile(curve, constants, path, None)
    })?;

    log::info!("Rotation curve written to {}", out_dir.display());
    Ok(artifacts.finish())
}

/// Write `evolution.csv` and `scale_factor.png` into `out_dir`
pub fn write_evolution_artifacts(
    evolution: &CosmicEvolution,
    out_dir: impl AsRef<Path>,
) -> ArpResult<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    let mut artifacts = ArtifactSet::new(out_dir)?;

    let csv_config = CsvConfig::default().with_metadata(CsvMetadata::new("Cosmology", ""));
    artifacts.write(out_dir.join("evolution.csv"), |path| {
        export_evolution_csv(evolution, path, &csv_config)
    })?;
    artifacts.write(out_dir.join("scale_factor.png"), |path| {
        plot_scale_factor(evolution, path, None)
    })?;

    log::info!("Cosmic evolution written to {}", out_dir.display());
    Ok(artifacts.finish())
}

/// Write `inflation.csv` and `inflation_scale_factor.png` into `out_dir`
pub fn write_inflation_artifacts(
    history: &InflationHistory,
    out_dir: impl AsRef<Path>,
) -> ArpResult<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    let mut artifacts = ArtifactSet::new(out_dir)?;

    let csv_config = CsvConfig::default().with_metadata(CsvMetadata::new("Vacuum inflation", ""));
    artifacts.write(out_dir.join("inflation.csv"), |path| {
        export_inflation_csv(history, path, &csv_config)
    })?;

    let plot_config = PlotConfig::scale_factor("Vacuum Inflation");
    artifacts.write(out_dir.join("inflation_scale_factor.png"), |path| {
        plot_series(&history.time, &history.scale_factor, path, Some(&plot_config))
    })?;

    Ok(artifacts.finish())
}

// =================================================================================================
// Tests
// =================================================================================================
