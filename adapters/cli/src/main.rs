#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs an Outbreak simulation.
//!
//! Diagnostics go to stderr through `tracing` (filtered by `RUST_LOG`,
//! `warn` by default); the final report goes to stdout.

mod setup_source;

use std::{io::IsTerminal, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use outbreak_core::Event;
use outbreak_system_outbreak::{build_world, Outbreak};
use outbreak_system_validation::{validate, ValidatedSetup};
use tracing::{debug, trace, warn};
use tracing_subscriber::EnvFilter;

use self::setup_source::SetupSource;

/// Line printed instead of a report when the world cannot be built.
const SETUP_FAILED: &str = "The zombie world could not be set up...";

#[derive(Debug, Parser)]
#[command(name = "outbreak", about = "Simulates a zombie outbreak on a wrap-around grid")]
struct Cli {
    /// Four-line world set-up file; the bundled default is used when omitted
    path: Option<PathBuf>,

    /// Abort once this many zombies have been advanced
    #[arg(long, value_name = "N")]
    max_advances: Option<usize>,

    /// Format of the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Entry point for the Outbreak command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let Some(setup) = load_setup(&SetupSource::from_path(cli.path)) else {
        println!("{SETUP_FAILED}");
        return Ok(());
    };

    let mut events = Vec::new();
    let mut world = build_world(&setup, &mut events);
    events.iter().for_each(log_event);

    let mut outbreak = cli
        .max_advances
        .map_or_else(Outbreak::new, Outbreak::with_advance_limit);
    let report = outbreak
        .run(&mut world, log_event)
        .context("outbreak did not finish")?;

    match cli.format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&report).context("failed to encode report as JSON")?
        ),
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// Reads and validates the set-up, logging every problem found.
fn load_setup(source: &SetupSource) -> Option<ValidatedSetup> {
    let lines = match source.read_lines() {
        Ok(lines) => lines,
        Err(error) => {
            warn!("{error}");
            return None;
        }
    };

    match validate(lines.as_slice()) {
        Ok(setup) => Some(setup),
        Err(report) => {
            for issue in report.issues() {
                warn!(kind = ?issue.kind(), "{issue}");
            }
            None
        }
    }
}

fn log_event(event: &Event) {
    match event {
        Event::MovementSkipped { symbol, cell } => {
            warn!(%cell, "Movement was skipped - Incorrect zombie movement specified: {symbol}");
        }
        Event::ZombieStepped {
            from,
            to,
            direction,
        } => trace!(%from, %to, direction = %direction.symbol(), "zombie stepped"),
        Event::CreaturesInfected { cell, count } => debug!(%cell, count, "creatures infected"),
        Event::ZombieFinished { cell } => debug!(%cell, "zombie finished"),
        Event::OutbreakEnded { score } => debug!(score, "outbreak ended"),
        Event::WorldConfigured { size } => trace!(size = size.get(), "world configured"),
        Event::ZombiePlaced { cell } => trace!(%cell, "zombie placed"),
        Event::CreaturePlaced { cell } => trace!(%cell, "creature placed"),
    }
}
