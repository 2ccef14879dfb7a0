//! srandom detection CLI
//!
//! Runs the combined check against the host's random source, measures
//! detection rates against simulated sources, and inverts single
//! splitmix outputs.

use clap::{Parser, Subcommand, ValueEnum};
use rand_core::{OsRng, RngCore};
use srandom_detect::{
    analysis::{measure, Expectation},
    detection::{Detector, FileConfig},
    metrics::MetricsRegistry,
    simulation::{Layout, SrandomSource},
    source::{EntropySource, RngSource},
    splitmix::{mix, skip, unmix},
    word::Word64,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Exit code when srandom is detected (or a simulation disagrees with
/// its expectation).
const EXIT_DETECTED: u8 = 2;

#[derive(Parser)]
#[command(name = "srandom-detect", version, about = "Detect the srandom PRNG behind a random source")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print Prometheus metrics before exiting
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the operating system's random source
    Check {
        /// Trials that must all be positive (overrides the config file)
        #[arg(long)]
        trials: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Measure the single-trial detection rate against a known source
    Simulate {
        /// Source to sample
        #[arg(long, value_enum)]
        source: SourceKind,

        /// Trials to run (overrides the config file)
        #[arg(long)]
        runs: Option<u64>,

        /// Seed for simulated sources (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Recover the splitmix state behind one output word
    Recover {
        /// Output word in hex, e.g. 0xe220a8397b1dcdaf
        output: Word64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Toml,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceKind {
    SrandomNorm,
    SrandomUhs,
    Chacha,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("srandom-detect v{}", srandom_detect::VERSION);

    let config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => FileConfig::default(),
    };

    let metrics = match MetricsRegistry::new() {
        Ok(metrics) => metrics,
        Err(e) => {
            eprintln!("Failed to create metrics registry: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = match cli.command {
        Command::Check { trials, format } => run_check(&config, trials, format, &metrics),
        Command::Simulate { source, runs, seed } => {
            run_simulate(&config, source, runs, seed, &metrics)
        }
        Command::Recover { output } => run_recover(output),
    };

    if cli.metrics {
        match metrics.encode() {
            Ok(text) => print!("{}", text),
            Err(e) => warn!("Failed to encode metrics: {}", e),
        }
    }

    code
}

fn run_check(
    config: &FileConfig,
    trials: Option<u32>,
    format: Format,
    metrics: &MetricsRegistry,
) -> ExitCode {
    let mut detector_config = config.detector.clone();
    if let Some(trials) = trials {
        detector_config.trials = trials;
    }
    if let Err(e) = detector_config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let detector = Detector::new(detector_config);
    let report = match detector.check(&mut RngSource::os()) {
        Ok(report) => report,
        Err(e) => {
            metrics.record_entropy_failure();
            eprintln!("Check failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    metrics.record_report(&report);

    match format {
        Format::Text => {
            println!("{}", report.verdict_line());
            if report.detected {
                for trial in &report.trials {
                    if let (Some(probe), Some(state)) = (trial.probe, trial.state) {
                        println!("  trial {}: {} -> state {}", trial.index, probe, state);
                    }
                }
            }
        }
        Format::Toml => match report.to_toml() {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Failed to render report: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    if report.detected {
        ExitCode::from(EXIT_DETECTED)
    } else {
        ExitCode::SUCCESS
    }
}

fn run_simulate(
    config: &FileConfig,
    kind: SourceKind,
    runs: Option<u64>,
    seed: Option<u64>,
    metrics: &MetricsRegistry,
) -> ExitCode {
    let mut simulation = config.simulation.clone();
    if let Some(runs) = runs {
        simulation.runs = runs;
    }
    if let Err(e) = simulation.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }
    let runs = simulation.runs;
    let seed = seed
        .or(simulation.seed)
        .unwrap_or_else(|| OsRng.next_u64());

    let (mut source, expectation): (Box<dyn EntropySource>, Expectation) = match kind {
        SourceKind::SrandomNorm => (
            Box::new(SrandomSource::from_seed(Layout::Norm, seed)),
            Expectation::Suspect,
        ),
        SourceKind::SrandomUhs => (
            Box::new(SrandomSource::from_seed(Layout::Uhs, seed)),
            Expectation::Suspect,
        ),
        SourceKind::Chacha => (Box::new(RngSource::chacha(seed)), Expectation::Sound),
    };

    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
        warn!("Failed to install Ctrl-C handler: {}", e);
    }

    info!(source = source.name(), runs, seed, "Starting simulation");
    let rate = match measure(&Detector::default(), &mut source, runs, &stop) {
        Ok(rate) => rate,
        Err(e) => {
            metrics.record_entropy_failure();
            eprintln!("Simulation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    metrics.record_rate(&rate);

    println!(
        "{}: {} trials, {} positive ({:.2}%){}",
        source.name(),
        rate.trials,
        rate.positive,
        rate.fraction() * 100.0,
        if rate.interrupted { " [interrupted]" } else { "" }
    );
    for (probe, count) in &rate.by_probe {
        println!("  {}: {}", probe, count);
    }

    match expectation.check(&rate) {
        Ok(()) => ExitCode::SUCCESS,
        Err(violation) => {
            warn!(violation = %violation, "Detection rate disagrees with expectation");
            ExitCode::from(EXIT_DETECTED)
        }
    }
}

fn run_recover(output: Word64) -> ExitCode {
    let state = unmix(output);
    let previous = skip(state, -1);
    let (_, replayed) = mix(previous);

    println!("output:         {}", output);
    println!("state:          {}", state);
    println!("previous state: {}", previous);
    println!("verified:       {}", replayed == output);

    ExitCode::SUCCESS
}
