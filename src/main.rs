mod cli;

use std::fs;
use std::io::{self, Write};
use std::num::NonZeroU32;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record};

use u_cpusched::config::Config;
use u_cpusched::dispatching::{Algorithm, AlgorithmKind};
use u_cpusched::error::Error;
use u_cpusched::scheduler::Simulation;
use u_cpusched::validation::validate_jobs;
use u_cpusched::workload::WorkloadGenerator;

use crate::cli::{Cli, Command, GenerateArgs, OutputFormat, RunArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Run(args) => run(args),
        Command::Generate(args) => generate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

fn run(args: RunArgs) -> Result<(), Error> {
    let mut config = Config::load(&args.input).map_err(|source| Error::Config {
        path: args.input.clone(),
        source,
    })?;
    config.algorithm = override_algorithm(config.algorithm, args.algorithm, args.quantum)?;
    validate_jobs(&config.jobs).map_err(Error::Validation)?;

    log::info!(
        "[Sim] {}: {} jobs, {} for {} ticks",
        args.input.display(),
        config.jobs.len(),
        config.algorithm,
        config.run_for
    );
    let report = Simulation::new(config.job_set(), config.params()).run();
    log::info!(
        "[Sim] {}/{} jobs completed, utilization {:.2}",
        report.kpi.completed_jobs,
        report.kpi.total_jobs,
        report.kpi.utilization
    );

    let rendered = match args.format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => report.to_json()? + "\n",
    };
    emit(args.output.as_deref(), &rendered)
}

fn generate(args: GenerateArgs) -> Result<(), Error> {
    if args.quantum.is_some() && !args.algorithm.needs_quantum() {
        return Err(Error::UnexpectedQuantum);
    }
    let algorithm = args
        .algorithm
        .with_quantum(args.quantum)
        .ok_or(Error::MissingQuantum)?;

    let config = WorkloadGenerator::new(args.count)
        .with_seed(args.seed)
        .with_max_arrival(args.max_arrival)
        .with_burst_range(args.min_burst, args.max_burst)
        .to_config(args.run_for, algorithm);
    emit(args.output.as_deref(), &config.to_string())
}

/// Applies `--use` / `--quantum` on top of the file's choice.
fn override_algorithm(
    current: Algorithm,
    kind: Option<AlgorithmKind>,
    quantum: Option<NonZeroU32>,
) -> Result<Algorithm, Error> {
    let kind = kind.unwrap_or(current.kind());
    if quantum.is_some() && !kind.needs_quantum() {
        return Err(Error::UnexpectedQuantum);
    }
    kind.with_quantum(quantum.or(current.quantum()))
        .ok_or(Error::MissingQuantum)
}

fn emit(path: Option<&Path>, text: &str) -> Result<(), Error> {
    match path {
        Some(path) => fs::write(path, text)?,
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

/// Minimal `log` backend writing to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
