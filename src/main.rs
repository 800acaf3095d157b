use orbsim::{prime_forces, update_particles, Scenario, ScenarioConfig};

use anyhow::Result;
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "disc.yaml")]
    file_name: String,
}

// load here to keep main clean
fn load_scenario_from_yaml() -> Result<ScenarioConfig> {
    let args = Args::parse();
    let file_name = args.file_name;

    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(&file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let scenario_cfg = load_scenario_from_yaml()?;

    let mut scenario = Scenario::build_scenario(scenario_cfg);
    let dt = scenario.parameters.h0;
    let t_end = scenario.parameters.t_end;

    println!(
        "starting headless run: {} particles, integrator {:?}, dt = {dt}, t_end = {t_end}",
        scenario.system.particles.len(),
        scenario.engine.integrator,
    );

    prime_forces(&mut scenario.system, &scenario.tree, &scenario.engine);

    let mut step: u64 = 0;
    while scenario.system.t < t_end {
        update_particles(
            &mut scenario.system,
            &mut scenario.tree,
            &scenario.engine,
            dt,
        );
        step += 1;

        if step % 100 == 0 {
            println!(
                "t = {:9.3}  particles = {}",
                scenario.system.t,
                scenario.system.particles.len()
            );
        }
    }

    println!(
        "done: t = {:.3}, {} particles remain after {step} steps",
        scenario.system.t,
        scenario.system.particles.len()
    );

    Ok(())
}
