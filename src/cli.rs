use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use u_cpusched::dispatching::AlgorithmKind;
use u_cpusched::models::Tick;

/// Tick-driven CPU scheduling simulator (FCFS, preemptive SJF, Round-Robin).
#[derive(Parser, Debug)]
#[command(name = "u-cpusched", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Raise log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a job file and print the trace and per-job metrics.
    Run(RunArgs),

    /// Write a random job file.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Job file to simulate.
    #[arg(default_value = "processes.in")]
    pub input: PathBuf,

    /// Write the report here. Without it the report goes to stdout; no
    /// `processes.out` file is created next to the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Override the file's scheduler.
    #[arg(long = "use", value_name = "fcfs|sjf|rr")]
    pub algorithm: Option<AlgorithmKind>,

    /// Override the file's Round-Robin quantum.
    #[arg(long)]
    pub quantum: Option<NonZeroU32>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of jobs.
    #[arg(long, default_value_t = 10)]
    pub count: usize,

    /// Random seed; the same seed always yields the same file.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Latest arrival tick.
    #[arg(long, default_value_t = 20)]
    pub max_arrival: Tick,

    /// Shortest burst.
    #[arg(long, default_value_t = 1)]
    pub min_burst: Tick,

    /// Longest burst.
    #[arg(long, default_value_t = 10)]
    pub max_burst: Tick,

    /// `runfor` value of the generated file.
    #[arg(long, default_value_t = 50)]
    pub run_for: Tick,

    /// Scheduler written to the file.
    #[arg(long = "use", value_name = "fcfs|sjf|rr", default_value = "fcfs")]
    pub algorithm: AlgorithmKind,

    /// Quantum written to the file (required with `--use rr`).
    #[arg(long)]
    pub quantum: Option<NonZeroU32>,

    /// Write the file here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented trace and metrics.
    Text,
    /// Pretty-printed JSON report.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_help_names_default() {
        use clap::CommandFactory;

        let cli = Cli::command();
        let run = cli.find_subcommand("run").unwrap();
        let output = run
            .get_arguments()
            .find(|arg| arg.get_id().as_str() == "output")
            .unwrap();
        let help = output.get_help().unwrap().to_string();
        assert!(help.contains("stdout"));
        assert!(help.contains("processes.out"));
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["u-cpusched", "run"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.input, PathBuf::from("processes.in"));
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.algorithm.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "u-cpusched", "-vv", "run", "jobs.in", "--use", "rr", "--quantum", "3", "--format",
            "json",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.algorithm, Some(AlgorithmKind::RoundRobin));
        assert_eq!(args.quantum.map(NonZeroU32::get), Some(3));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["u-cpusched", "run", "--use", "lottery"]).is_err());
        assert!(Cli::try_parse_from(["u-cpusched", "run", "--quantum", "0"]).is_err());
    }
}
