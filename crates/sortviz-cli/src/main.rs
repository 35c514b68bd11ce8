mod settings;
mod terminal;

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossbeam_channel::RecvTimeoutError;
use sortviz_engine::{
    Algorithm, CancelToken, EngineError, EventLog, NoopPacer, RunMessage, SortEngine,
    SortSession,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::settings::{Overrides, Settings};
use crate::terminal::TerminalRenderer;

const BAR_ROWS: usize = 24;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => execute_run(args),
        Commands::List => {
            list_algorithms();
            Ok(())
        }
        Commands::Config(args) => execute_config(args),
    }
}

#[derive(Parser)]
#[command(author, version, about = "Animated sorting algorithms in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort a random sequence with one algorithm.
    Run(RunArgs),
    /// List the available algorithms.
    List,
    /// Print the effective settings as JSON.
    Config(ConfigArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Algorithm to run (bubble, selection, insertion, merge, quick, heap).
    #[arg(long, short)]
    algorithm: Option<Algorithm>,
    /// Number of elements, 1 to 500.
    #[arg(long)]
    size: Option<usize>,
    /// Speed setting, 1 to 100; each step waits 101 - speed milliseconds.
    #[arg(long)]
    speed: Option<u8>,
    /// Seed for the sequence generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Settings file to read instead of the per-user one.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Sort without animation and print a summary.
    #[arg(long)]
    headless: bool,
}

#[derive(Args)]
struct ConfigArgs {
    /// Settings file to read instead of the per-user one.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the effective settings back to the settings file.
    #[arg(long)]
    save: bool,
}

fn execute_run(args: RunArgs) -> Result<()> {
    let (settings, _) = Settings::resolve(args.config.as_deref())?;
    let settings = settings.apply(&Overrides {
        algorithm: args.algorithm,
        size: args.size,
        speed: args.speed,
        seed: args.seed,
    })?;
    let algorithm = settings.algorithm;
    let engine = SortEngine::new(settings.engine).context("failed to build sort engine")?;

    if args.headless {
        run_headless(engine, algorithm)
    } else {
        run_animated(engine, algorithm)
    }
}

fn run_headless(mut engine: SortEngine, algorithm: Algorithm) -> Result<()> {
    let mut log = EventLog::new();
    engine.run(algorithm, &mut log, &mut NoopPacer, &CancelToken::new())?;
    println!("{algorithm} sort over {} values", engine.len());
    println!(
        "  compares: {}  changes: {}  settles: {}",
        log.compares(),
        log.value_changes(),
        log.settles()
    );
    println!("  result: {:?}", engine.sequence());
    Ok(())
}

fn run_animated(engine: SortEngine, algorithm: Algorithm) -> Result<()> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl-C handler")?;

    let mut session = SortSession::new(engine);
    let events = session.events();
    let mut renderer = TerminalRenderer::new(io::stdout().lock(), BAR_ROWS);
    session.start(algorithm)?;

    let mut cancel_sent = false;
    loop {
        if !cancel_sent && interrupted.load(Ordering::SeqCst) {
            info!(%algorithm, "interrupt received, cancelling run");
            session.cancel();
            cancel_sent = true;
        }
        match events.recv_timeout(Duration::from_millis(50)) {
            Ok(message) => {
                let done = matches!(message, RunMessage::Finished { .. });
                renderer.handle(&message).context("failed to draw bars")?;
                if done {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    match session.wait() {
        Ok(()) => println!("{algorithm} sort finished"),
        Err(EngineError::Cancelled) => println!("{algorithm} sort cancelled"),
        Err(err) => {
            warn!(%algorithm, %err, "sort run failed");
            return Err(err.into());
        }
    }
    Ok(())
}

fn list_algorithms() {
    for algorithm in Algorithm::ALL {
        let stability = if algorithm.is_stable() {
            "stable"
        } else {
            "unstable"
        };
        println!("{algorithm:<10} {stability}");
    }
}

fn execute_config(args: ConfigArgs) -> Result<()> {
    let (settings, path) = Settings::resolve(args.config.as_deref())?;
    println!(
        "{}",
        serde_json::to_string_pretty(&settings).context("failed to encode settings")?
    );
    if args.save {
        let path = path.context("no configuration directory available")?;
        settings.save(&path)?;
        eprintln!("Settings written to {}", path.display());
    }
    Ok(())
}
