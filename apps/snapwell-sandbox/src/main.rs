//! Snapwell Sandbox
//!
//! Runs a snap and/or relocation scenario described in a TOML file and prints
//! the resulting poses. Useful for checking attractor settings before wiring
//! them into a host application.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p snapwell-sandbox -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `-s, --scenario <PATH>`: Scenario file (default: bundled `scenarios/example.toml`)
//! - `-p, --progress <F>`: Override the snap progress, in `[0, 1]`
//! - `--steps <N>`: Print an animated snap sampled over N steps
//! - `-h, --help`: Print help message
//!
//! ## Examples
//!
//! ```bash
//! # Bundled scenario
//! cargo run -p snapwell-sandbox
//!
//! # Custom scenario, animated over 10 steps
//! cargo run -p snapwell-sandbox -- -s my_scene.toml --steps 10
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod scenario;

use std::path::PathBuf;

use anyhow::{bail, Context};
use snapwell_core::Pose;
use snapwell_magnet::{MagnetId, MagnetSnapSolver, SnapRequest, SnapSession, SnapTiming};
use snapwell_relocation::ReferentialRelocator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

const BUNDLED_SCENARIO: &str = include_str!("../scenarios/example.toml");

/// Command line options.
#[derive(Debug, Default)]
struct Options {
    scenario: Option<PathBuf>,
    progress: Option<f32>,
    steps: Option<u32>,
}

impl Options {
    fn from_args() -> anyhow::Result<Self> {
        let mut options = Self::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1);
            match args[i].as_str() {
                "-s" | "--scenario" => {
                    let path = value.context("--scenario needs a path")?;
                    options.scenario = Some(PathBuf::from(path));
                    i += 1;
                }
                "-p" | "--progress" => {
                    let progress = value.context("--progress needs a value")?;
                    options.progress = Some(progress.parse().context("invalid --progress")?);
                    i += 1;
                }
                "--steps" => {
                    let steps = value.context("--steps needs a value")?;
                    options.steps = Some(steps.parse().context("invalid --steps")?);
                    i += 1;
                }
                other => bail!("unknown argument `{other}` (see --help)"),
            }
            i += 1;
        }

        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = Options::from_args()?;
    let scenario = match &options.scenario {
        Some(path) => {
            Scenario::load(path).with_context(|| format!("loading scenario {}", path.display()))?
        }
        None => Scenario::from_toml(BUNDLED_SCENARIO).context("loading bundled scenario")?,
    };
    info!(
        snap = scenario.snap.is_some(),
        relocation = scenario.relocation.is_some(),
        "loaded scenario"
    );

    if let Some(mut request) = scenario.snap_request()? {
        if let Some(progress) = options.progress {
            if !(0.0..=1.0).contains(&progress) {
                bail!("--progress {progress} is outside [0, 1]");
            }
            request = request.with_progress(progress);
        }
        let solver = MagnetSnapSolver::new(scenario.solver);
        match options.steps {
            Some(steps) => run_animated_snap(&solver, &request, steps)?,
            None => run_snap(&solver, &request)?,
        }
    }

    if let Some(input) = scenario.relocation_input()? {
        let placement = ReferentialRelocator::new(scenario.solver.orthonormal_tolerance)
            .relocate(&input)
            .context("relocation failed")?;
        println!("relocation");
        println!("  rig before: {}", format_pose(&input.rig));
        println!("  rig after:  {}", format_pose(&placement.as_pose()));
    }

    Ok(())
}

fn run_snap(solver: &MagnetSnapSolver, request: &SnapRequest) -> anyhow::Result<()> {
    let outcome = solver.solve(request).context("snap failed")?;
    println!("snap (progress {:.3})", outcome.progress);
    println!("  root:          {}", format_pose(&outcome.root));
    println!("  magnet target: {}", format_pose(&outcome.magnet_target));
    Ok(())
}

/// Drive a timed session with a fixed step and solve each tick from the
/// initial pose.
fn run_animated_snap(solver: &MagnetSnapSolver, request: &SnapRequest, steps: u32) -> anyhow::Result<()> {
    if steps == 0 {
        bail!("--steps must be at least 1");
    }
    let duration = 1.0;
    let mut session = SnapSession::new(SnapTiming::animated(duration));
    session.request(MagnetId(0), 0.0);

    println!("animated snap ({steps} steps)");
    for step in 1..=steps {
        #[allow(clippy::cast_precision_loss)]
        let now = duration * step as f32 / steps as f32;
        let Some(tick) = session.tick(now, false) else {
            break;
        };
        let outcome = solver
            .solve(&request.with_progress(tick.progress))
            .context("snap failed")?;
        println!("  {:>5.3}  {}", tick.progress, format_pose(&outcome.root));
        if tick.is_final() {
            break;
        }
    }
    Ok(())
}

fn format_pose(pose: &Pose) -> String {
    let (y, x, z) = pose.rotation.to_euler(glam::EulerRot::YXZ);
    format!(
        "position [{:.4}, {:.4}, {:.4}]  rotation_deg [{:.2}, {:.2}, {:.2}]",
        pose.position.x,
        pose.position.y,
        pose.position.z,
        x.to_degrees(),
        y.to_degrees(),
        z.to_degrees()
    )
}

fn print_help() {
    eprintln!(
        "Snapwell Sandbox

Runs magnet snap and rig relocation scenarios from a TOML file.

USAGE:
    snapwell-sandbox [OPTIONS]

OPTIONS:
    -s, --scenario <PATH>   Scenario file (default: bundled example)
    -p, --progress <F>      Override the snap progress, in [0, 1]
        --steps <N>         Print an animated snap sampled over N steps
    -h, --help              Print this help message

EXAMPLES:
    snapwell-sandbox
    snapwell-sandbox -s my_scene.toml --steps 10

ENVIRONMENT VARIABLES:
    RUST_LOG                Log level (e.g., info, debug, trace)"
    );
}
