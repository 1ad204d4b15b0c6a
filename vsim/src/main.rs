use vsim::{ScenarioConfig, Scenario, CollisionMode};
use vsim::{bench_collisions, bench_step};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "fountain.yaml")]
    file_name: String,

    /// Override the scenario's frame count (headless only)
    #[arg(long)]
    frames: Option<usize>,

    /// Override the scenario's frame delta
    #[arg(long)]
    dt: Option<f64>,

    /// Run without a window even when the viewer is compiled in
    #[arg(long)]
    headless: bool,

    /// Print resolver and step timings instead of running the scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let windowed = cfg!(feature = "viewer") && !args.headless && !args.bench;

    // bevy installs its own logger
    if !windowed {
        env_logger::init();
    }

    if args.bench {
        bench_collisions();
        bench_step(CollisionMode::Sequential, 600, 60);
        bench_step(CollisionMode::Parallel, 600, 60);
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(frames) = args.frames {
        scenario_cfg.run.frames = frames;
    }
    if let Some(dt) = args.dt {
        scenario_cfg.run.dt = dt;
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    #[cfg(feature = "viewer")]
    if windowed {
        vsim::run_3d(scenario);
        return Ok(());
    }

    let n = scenario.run_headless();
    let solver = &scenario.solver;
    let c = solver.constraint();
    let max_extent = solver
        .particles()
        .map(|p| (p.position - c.center).norm() + p.radius / 2.0)
        .fold(0.0_f64, f64::max);

    println!(
        "t = {:.3} s, {} particles ({:?}), max extent {:.3} / {:.3}",
        solver.time(),
        n,
        solver.growth_state(),
        max_extent,
        c.max_distance,
    );

    Ok(())
}
