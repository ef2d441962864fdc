//! Command-line runner.
//!
//! Loads the target image, wires the evolutionary core to the pixel
//! fitness stack and the report/snapshot sinks, and drives the run loop.
//! Interactive controls arrive on stdin between generations:
//! `s` force-saves a snapshot of the current best, `d` toggles debug
//! step logging, `q` quits.

use clap::{Parser, ValueEnum};
use polyvolve::error::EvoError;
use polyvolve::evo::{EvoConfig, Evolution, Selection, SizeScheduler};
use polyvolve::fitness::{CpuRasterizer, MeanSquareComparator, PixelEvaluator};
use polyvolve::genome::Crossover;
use polyvolve::report::{FileReport, PngSnapshot};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Evolves translucent triangles toward a target raster image.
#[derive(Parser)]
#[command(name = "polyvolve")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the target image (PNG or JPEG).
    image: PathBuf,

    /// Polygon count ceiling for the complexity scheduler.
    max_polygons: usize,

    /// Parent selection strategy.
    #[arg(long, value_enum, default_value_t = SelectionArg::Tournament)]
    selection: SelectionArg,

    /// Crossover variant.
    #[arg(long, value_enum, default_value_t = CrossoverArg::Uniform)]
    crossover: CrossoverArg,

    /// Random seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate fitness sequentially instead of across the rayon pool.
    #[arg(long)]
    sequential: bool,

    /// Report file path.
    #[arg(long, default_value = "report.txt")]
    report: PathBuf,

    /// Directory for snapshot images.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Stop after this many generations (runs until `q` otherwise).
    #[arg(long)]
    generations: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SelectionArg {
    Tournament,
    Roulette,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CrossoverArg {
    Uniform,
    OnePoint,
    TwoPoint,
}

/// Interactive run-loop commands, handled between generations.
enum Command {
    SaveSnapshot,
    ToggleDebug,
    Quit,
}

fn main() -> Result<(), EvoError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let target = image::open(&cli.image)
        .map_err(|source| EvoError::TargetLoad {
            path: cli.image.clone(),
            source,
        })?
        .to_rgb8();
    let (width, height) = target.dimensions();
    log::info!(
        "Target: {} ({width}x{height}), max polygons: {}",
        cli.image.display(),
        cli.max_polygons
    );

    let config = match cli.selection {
        SelectionArg::Tournament => EvoConfig::default(),
        SelectionArg::Roulette => EvoConfig::roulette(),
    };
    let mut config = config
        .with_crossover(match cli.crossover {
            CrossoverArg::Uniform => Crossover::Uniform,
            CrossoverArg::OnePoint => Crossover::OnePoint,
            CrossoverArg::TwoPoint => Crossover::TwoPoint,
        })
        .with_parallel(!cli.sequential);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let rasterizer = CpuRasterizer { anti_alias: true };
    let evaluator = PixelEvaluator::new(
        rasterizer,
        MeanSquareComparator,
        target.into_raw(),
        width,
        height,
    );
    let report = FileReport::create(&cli.report)?;
    let snapshot = PngSnapshot::new(rasterizer, width, height, cli.out_dir.clone());

    let mut engine = Evolution::new(
        config,
        SizeScheduler::new(1, cli.max_polygons),
        evaluator,
        Box::new(report),
        Box::new(snapshot),
    )?;

    let commands = spawn_control_thread();
    run(&mut engine, &commands, cli.generations)
}

/// Advances the engine until quit or the generation limit. Commands are
/// applied between generations; an in-flight generation always
/// completes.
fn run<E: polyvolve::fitness::Evaluator>(
    engine: &mut Evolution<E>,
    commands: &Receiver<Command>,
    limit: Option<u64>,
) -> Result<(), EvoError> {
    loop {
        engine.step()?;

        if let Some(limit) = limit {
            if engine.generation_count() >= limit {
                break;
            }
        }

        loop {
            match commands.try_recv() {
                Ok(Command::SaveSnapshot) => {
                    // Degrade like the cadence path: keep evolving even
                    // if one artifact fails to write.
                    if let Err(err) = engine.save_snapshot() {
                        log::warn!("snapshot failed: {err}");
                    }
                }
                Ok(Command::ToggleDebug) => {
                    let on = engine.toggle_debug_sync();
                    log::info!("debug step logging {}", if on { "on" } else { "off" });
                }
                Ok(Command::Quit) => return Ok(()),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
    Ok(())
}

/// Reads single-letter commands from stdin on a dedicated thread.
fn spawn_control_thread() -> Receiver<Command> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        loop {
            line.clear();
            match std::io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let command = match line.trim() {
                "s" => Command::SaveSnapshot,
                "d" => Command::ToggleDebug,
                "q" => Command::Quit,
                _ => continue,
            };
            if tx.send(command).is_err() {
                break;
            }
        }
    });
    rx
}
