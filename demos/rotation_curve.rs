//! Rotation curve of a Milky-Way-like galaxy
//!
//! Loads `demos/params/milky_way.json` (or the path given as first argument),
//! evolves the adaptive coupling for two orbital periods with RK4, and writes
//! the radial table and plots into the output directory (second argument,
//! default: `<tmp>/arp_rs/rotation_curve`).
//!
//! ```bash
//! cargo run --example rotation_curve -- demos/params/milky_way.json out/
//! ```

use arp_rs::{
    config::GalaxyConfig,
    physics::PhysicalConstants,
    simulation::{write_rotation_curve_artifacts, GalaxySimulation},
};

use std::path::PathBuf;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let params = args
        .next()
        .unwrap_or_else(|| "demos/params/milky_way.json".to_string());
    let out_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("arp_rs").join("rotation_curve"));

    println!("═══════════════════════════════════════════════════════");
    println!("  Adaptive Coupling - Rotation Curve");
    println!("═══════════════════════════════════════════════════════\n");

    let config = GalaxyConfig::from_path(&params)?;
    let constants = PhysicalConstants::default();

    println!("Parameters ({}):", params);
    println!("  Bulge mass     : {:e} Msun", config.mass.bulge_mass);
    println!("  Disk mass      : {:e} Msun", config.mass.disk_mass);
    println!("  Gas mass       : {:e} Msun", config.mass.gas_mass);
    println!("  mu             : {}", config.arp.mu);
    println!("  D              : {}", config.arp.diffusion);
    println!("  Pivot radius   : {} kpc", config.arp.pivot_radius);
    println!(
        "  Grid           : [{}, {}] kpc x {}\n",
        config.grid.r_min, config.grid.r_max, config.grid.nr
    );

    let simulation = GalaxySimulation::new(config, constants)?;
    let schedule = simulation.solver_configuration();

    println!("Simulation:");
    println!("  T0             : {:.6} kpc/(km/s)", simulation.characteristic_period());
    println!("  Time steps     : {}", schedule.time_steps);
    println!("  dt             : {:.6e}", schedule.dt());
    println!("  Gain           : {:.6e}\n", simulation.gain());

    let start = Instant::now();
    let curve = simulation.run()?;
    let elapsed = start.elapsed();

    println!("Run completed in {:.2?}\n", elapsed);

    println!("  r [kpc]    G_eff/G     v [km/s]    a [m/s²]");
    let stride = (curve.len() / 10).max(1);
    for i in (0..curve.len()).step_by(stride) {
        println!(
            "  {:8.3}  {:10.4e}  {:10.3}  {:10.3e}",
            curve.radius[i],
            curve.coupling[i] / constants.gravitational_constant,
            curve.velocity[i],
            curve.acceleration[i]
        );
    }

    let written = write_rotation_curve_artifacts(&curve, &constants, &out_dir)?;

    println!("\nFiles:");
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}
