//! Sandgrid Headless - scripted falling-sand runs from the command line

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use sandgrid_headless::scenario::{BUILTIN_SCENARIOS, ScenarioDefinition, builtin};
use sandgrid_headless::{App, AppConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (RON); defaults to ./sandgrid.ron if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in scenario to replay: hourglass, dam_break, rain
    #[arg(long, conflicts_with = "scenario_file")]
    scenario: Option<String>,

    /// Scenario file (RON) to replay
    #[arg(long)]
    scenario_file: Option<PathBuf>,

    /// Number of frames to run (overrides config and scenario)
    #[arg(long)]
    frames: Option<u64>,

    /// Seconds of simulated time per tick
    #[arg(long)]
    dt: Option<f32>,

    /// Seed for the world's random generator
    #[arg(long)]
    seed: Option<u64>,

    /// Save the final frame as PNG
    #[arg(long)]
    output: Option<PathBuf>,

    /// List built-in scenarios and exit
    #[arg(long)]
    list_scenarios: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_scenarios {
        for (name, description) in BUILTIN_SCENARIOS {
            println!("{name:<12} {description}");
        }
        return Ok(());
    }

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(dt) = args.dt {
        config.run.dt = dt;
    }

    let scenario = match (&args.scenario, &args.scenario_file) {
        (Some(name), _) => {
            let (width, height) = (
                config.world.canvas_width as i32,
                config.world.canvas_height as i32,
            );
            match builtin(name, width, height) {
                Some(scenario) => Some(scenario),
                None => bail!("Unknown scenario '{}' (see --list-scenarios)", name),
            }
        }
        (None, Some(path)) => Some(
            ScenarioDefinition::from_file(path)
                .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let frames = args
        .frames
        .or(scenario.as_ref().and_then(|s| s.frames))
        .unwrap_or(config.run.frames);

    log::info!("Starting Sandgrid Headless ({} frames)", frames);

    let mut app = App::new(config, scenario.as_ref())?;
    let summary = app.run(frames);

    if summary.stopped_early {
        log::info!("Scenario stopped after {} frames", summary.frames);
    }
    log::info!("Final particle count: {}", summary.particles);

    if let Some(output) = &args.output {
        app.save_frame(output)?;
    }

    Ok(())
}
