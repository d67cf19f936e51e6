//! Vacuum-driven inflation with a suppressed coupling
//!
//! `G_eff(t) = G exp(-mu / rho_vac(t))` with `rho_vac(t) = rho_vac_0 exp(-alpha t)`.
//! The bundled parameters are in scaled units: SI values (rho ~ 1e103) push
//! `a(t)` beyond f64 range and the run stops with a divergence error.

use arp_rs::{
    config::InflationConfig,
    error::ArpError,
    simulation::{write_inflation_artifacts, InflationSimulation},
};

use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let params = args
        .next()
        .unwrap_or_else(|| "demos/params/inflation.json".to_string());
    let out_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("arp_rs").join("inflation"));

    println!("═══════════════════════════════════════════════════════");
    println!("  Adaptive Coupling - Vacuum Inflation");
    println!("═══════════════════════════════════════════════════════\n");

    let simulation = InflationSimulation::new(InflationConfig::from_path(&params)?)?;
    let schedule = simulation.solver_configuration();
    println!("Steps: {}  dt: {:e}\n", schedule.time_steps, schedule.dt());

    let history = match simulation.run() {
        Ok(history) => history,
        Err(ArpError::NumericalDivergence { step, time, value, .. }) => {
            println!("Scale factor left f64 range at step {} (t = {:e}, value {})", step, time, value);
            println!("Use scaled units to follow the whole run.");
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    let last = history.len() - 1;
    println!("  a(t_max)      : {:.6e}", history.scale_factor[last]);
    println!("  e-folds       : {:.4}", history.scale_factor[last].ln() - history.scale_factor[0].ln());
    println!("  G_eff(t_max)  : {:.6e}", history.effective_coupling[last]);
    println!("  rho_vac(t_max): {:.6e}", history.vacuum_density[last]);

    let written = write_inflation_artifacts(&history, &out_dir)?;

    println!("\nFiles:");
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}
