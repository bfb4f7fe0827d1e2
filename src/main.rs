use gravsim::{relative_energy_error, ScenarioConfig, Scenario};
use gravsim::{bench_gravity, bench_integrators};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file: a path, or a name under `scenarios/`
    #[arg(short, long = "file", default_value = "two_body.yaml")]
    file_name: String,

    /// Number of evenly spaced snapshots to print (overrides the scenario)
    #[arg(short, long)]
    samples: Option<usize>,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = scenario_path(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_gravity()?;
        bench_integrators()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    scenario.run().context("simulation failed")?;

    let sim = &scenario.simulator;
    let trajectory = sim.trajectory();
    if let (Some(first), Some(last)) = (trajectory.get(0), trajectory.last()) {
        info!(
            "relative energy error after {} steps: {:.3e}",
            trajectory.len() - 1,
            relative_energy_error(first, last, scenario.parameters.G)
        );
    }

    let n = args.samples.or(scenario.parameters.samples).unwrap_or(trajectory.len());
    for state in sim.sample_evenly(n) {
        println!("t = {:.6}", state.t);
        for (i, (x, v)) in state.positions.iter().zip(&state.velocities).enumerate() {
            let name = sim.bodies()[i].name.as_deref().unwrap_or("-");
            println!(
                "  {:>3} {:<10} x = [{:+.6e}, {:+.6e}, {:+.6e}]  v = [{:+.6e}, {:+.6e}, {:+.6e}]",
                i, name, x.x, x.y, x.z, v.x, v.y, v.z
            );
        }
    }

    Ok(())
}
