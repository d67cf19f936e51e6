//! Background cosmology with two coupling channels
//!
//! ```bash
//! cargo run --example cosmology -- demos/params/cosmology.json out/
//! ```

use arp_rs::{
    config::CosmologyConfig,
    simulation::{write_evolution_artifacts, CosmologySimulation},
};

use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let params = args
        .next()
        .unwrap_or_else(|| "demos/params/cosmology.json".to_string());
    let out_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("arp_rs").join("cosmology"));

    println!("═══════════════════════════════════════════════════════");
    println!("  Adaptive Coupling - Cosmic Evolution");
    println!("═══════════════════════════════════════════════════════\n");

    let config = CosmologyConfig::from_path(&params)?;
    println!(
        "Time span: [{}, {}] in {} steps\n",
        config.time.t_start, config.time.t_end, config.time.n_steps
    );

    let evolution = CosmologySimulation::new(config)?.run()?;

    println!("  t         a           Gc          Gh          rhoL        H");
    let stride = (evolution.len() / 10).max(1);
    for i in (0..evolution.len()).step_by(stride) {
        println!(
            "  {:8.4}  {:10.4e}  {:10.4e}  {:10.4e}  {:10.4e}  {:10.4e}",
            evolution.time[i],
            evolution.scale_factor[i],
            evolution.cold_coupling[i],
            evolution.hot_coupling[i],
            evolution.vacuum_density[i],
            evolution.hubble_rate[i]
        );
    }

    let written = write_evolution_artifacts(&evolution, &out_dir)?;

    println!("\nFiles:");
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}
