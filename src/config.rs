//! Job file loader.
//!
//! Parses the line-oriented job description format into a [`Config`].
//! `#` starts a comment; blank lines are ignored. Keywords must appear
//! in this order:
//!
//! ```text
//! processcount 2      # number of process lines
//! runfor 8
//! use rr              # fcfs | sjf | rr
//! quantum 2           # only with rr
//! process name A arrival 0 burst 5
//! process name B arrival 1 burst 3
//! end
//! ```
//!
//! Every content error carries the 1-based line number it was found on.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::NonZeroU32;
use std::path::Path;

use crate::dispatching::{Algorithm, AlgorithmKind};
use crate::models::{Job, JobSet, Tick};
use crate::scheduler::RunParameters;
use crate::validation;

/// A loaded job file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Last simulated tick.
    pub run_for: Tick,
    /// Scheduling discipline.
    pub algorithm: Algorithm,
    /// Jobs in file order.
    pub jobs: Vec<Job>,
}

/// Errors raised while loading a job file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("line {line}: expected `{expected}`")]
    Expected { line: usize, expected: &'static str },

    #[error("line {line}: `{value}` is not a valid {field}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: unknown scheduler `{name}` (expected fcfs, sjf or rr)")]
    UnknownScheduler { line: usize, name: String },

    #[error("line {line}: quantum must be greater than zero")]
    ZeroQuantum { line: usize },

    #[error("line {line}: {message}")]
    InvalidJob { line: usize, message: String },

    #[error("line {line}: unexpected content after `end`")]
    TrailingContent { line: usize },

    #[error("unexpected end of input, expected `{expected}`")]
    UnexpectedEof { expected: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ConfigError {
    /// Line the error was found on, for content errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Expected { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::UnknownScheduler { line, .. }
            | Self::ZeroQuantum { line }
            | Self::InvalidJob { line, .. }
            | Self::TrailingContent { line } => Some(*line),
            Self::UnexpectedEof { .. } | Self::Io(_) => None,
        }
    }
}

impl Config {
    /// Creates a config directly.
    pub fn new(run_for: Tick, algorithm: Algorithm, jobs: Vec<Job>) -> Self {
        Self {
            run_for,
            algorithm,
            jobs,
        }
    }

    /// Parses job file text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Parser::new(text.lines().map(|line| Ok(line.to_owned()))).parse()
    }

    /// Parses job file content from a reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ConfigError> {
        Parser::new(reader.lines()).parse()
    }

    /// Loads a job file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Run parameters of this config.
    pub fn params(&self) -> RunParameters {
        RunParameters::new(self.run_for, self.algorithm)
    }

    /// Arrival-ordered job set for a run.
    pub fn job_set(&self) -> JobSet {
        JobSet::new(self.jobs.iter().cloned())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "processcount {}", self.jobs.len())?;
        writeln!(f, "runfor {}", self.run_for)?;
        writeln!(f, "use {}", self.algorithm.kind())?;
        if let Some(quantum) = self.algorithm.quantum() {
            writeln!(f, "quantum {quantum}")?;
        }
        for job in &self.jobs {
            writeln!(
                f,
                "process name {} arrival {} burst {}",
                job.name, job.arrival, job.burst
            )?;
        }
        writeln!(f, "end")
    }
}

/// Pulls significant lines, tracking their position.
struct Parser<I> {
    lines: I,
    line: usize,
}

impl<I> Parser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    fn new(lines: I) -> Self {
        Self { lines, line: 0 }
    }

    fn parse(mut self) -> Result<Config, ConfigError> {
        let count: usize = self.keyword_value("processcount", "process count")?;
        let run_for: Tick = self.keyword_value("runfor", "tick count")?;

        let words = self.expect_line("use <fcfs|sjf|rr>")?;
        let kind = match words.as_slice() {
            [keyword, name] if keyword == "use" => {
                name.parse::<AlgorithmKind>()
                    .map_err(|_| ConfigError::UnknownScheduler {
                        line: self.line,
                        name: name.clone(),
                    })?
            }
            _ => return Err(self.expected("use <fcfs|sjf|rr>")),
        };

        let quantum = if kind.needs_quantum() {
            let value: Tick = self.keyword_value("quantum", "quantum")?;
            let quantum =
                NonZeroU32::new(value).ok_or(ConfigError::ZeroQuantum { line: self.line })?;
            Some(quantum)
        } else {
            None
        };
        let algorithm = kind
            .with_quantum(quantum)
            .ok_or(ConfigError::UnexpectedEof { expected: "quantum" })?;

        // `count` is untrusted; grow as process lines are read.
        let mut jobs = Vec::new();
        for _ in 0..count {
            jobs.push(self.process()?);
        }

        let words = self.expect_line("end")?;
        if words != ["end"] {
            return Err(self.expected("end"));
        }
        if self.next_line()?.is_some() {
            return Err(ConfigError::TrailingContent { line: self.line });
        }

        log::debug!(
            "[Config] loaded {} jobs, runfor {}, use {}",
            jobs.len(),
            run_for,
            algorithm
        );
        Ok(Config::new(run_for, algorithm, jobs))
    }

    fn process(&mut self) -> Result<Job, ConfigError> {
        const FORMAT: &str = "process name <name> arrival <tick> burst <ticks>";
        let words = self.expect_line(FORMAT)?;
        let job = match words.as_slice() {
            [process, name_kw, name, arrival_kw, arrival, burst_kw, burst]
                if process == "process"
                    && name_kw == "name"
                    && arrival_kw == "arrival"
                    && burst_kw == "burst" =>
            {
                let arrival = self.number(arrival, "arrival tick")?;
                let burst = self.number(burst, "burst")?;
                Job::new(name.clone(), arrival, burst)
            }
            _ => return Err(self.expected(FORMAT)),
        };

        if let Err(errors) = validation::validate_job(&job) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConfigError::InvalidJob {
                line: self.line,
                message,
            });
        }
        Ok(job)
    }

    fn keyword_value<T: std::str::FromStr>(
        &mut self,
        keyword: &'static str,
        field: &'static str,
    ) -> Result<T, ConfigError> {
        let words = self.expect_line(keyword)?;
        match words.as_slice() {
            [kw, value] if kw == keyword => self.number(value, field),
            _ => Err(self.expected(keyword)),
        }
    }

    fn number<T: std::str::FromStr>(&self, value: &str, field: &'static str) -> Result<T, ConfigError> {
        value.parse().map_err(|_| ConfigError::InvalidNumber {
            line: self.line,
            field,
            value: value.to_owned(),
        })
    }

    fn expected(&self, expected: &'static str) -> ConfigError {
        ConfigError::Expected {
            line: self.line,
            expected,
        }
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<Vec<String>, ConfigError> {
        self.next_line()?
            .ok_or(ConfigError::UnexpectedEof { expected })
    }

    /// Next non-blank line with comments stripped, split into words.
    fn next_line(&mut self) -> Result<Option<Vec<String>>, ConfigError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line += 1;
            let content = line.split('#').next().unwrap_or_default();
            let words: Vec<String> = content.split_whitespace().map(str::to_owned).collect();
            if !words.is_empty() {
                return Ok(Some(words));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RR_FILE: &str = "\
processcount 2   # Read 2 processes
runfor 8         # Run for 8 time units
use rr
quantum 2

process name A arrival 0 burst 5
process name B arrival 1 burst 3
end
";

    #[test]
    fn test_parse_round_robin() {
        let config = Config::parse(RR_FILE).unwrap();
        assert_eq!(config.run_for, 8);
        assert_eq!(config.algorithm, Algorithm::round_robin(2));
        assert_eq!(
            config.jobs,
            vec![Job::new("A", 0, 5), Job::new("B", 1, 3)]
        );
    }

    #[test]
    fn test_parse_fcfs_without_quantum() {
        let text = "processcount 1\nruntime\n";
        assert!(Config::parse(text).is_err());

        let text = "processcount 1\nrunfor 3\nuse fcfs\nprocess name P arrival 0 burst 1\nend\n";
        let config = Config::parse(text).unwrap();
        assert_eq!(config.algorithm, Algorithm::Fcfs);
        assert_eq!(config.params(), RunParameters::new(3, Algorithm::Fcfs));
    }

    #[test]
    fn test_parse_zero_processes() {
        let config = Config::parse("processcount 0\nrunfor 4\nuse sjf\nend\n").unwrap();
        assert!(config.jobs.is_empty());
        assert!(config.job_set().is_empty());
    }

    #[test]
    fn test_error_line_numbers() {
        let text = "# header\nprocesscount 1\n\nrunfor 5\nuse rr\nquantum 0\n";
        let err = Config::parse(text).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroQuantum { line: 6 }));
        assert_eq!(err.line(), Some(6));
    }

    #[test]
    fn test_unknown_scheduler() {
        let err = Config::parse("processcount 0\nrunfor 1\nuse lottery\nend\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownScheduler { line: 3, .. }));
        assert_eq!(
            err.to_string(),
            "line 3: unknown scheduler `lottery` (expected fcfs, sjf or rr)"
        );
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::parse("processcount 1\nrunfor -3\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                line: 2,
                field: "tick count",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_process_line() {
        let text = "processcount 1\nrunfor 5\nuse sjf\nprocess name A burst 3 arrival 0\nend\n";
        let err = Config::parse(text).unwrap_err();
        assert!(matches!(err, ConfigError::Expected { line: 4, .. }));
    }

    #[test]
    fn test_too_few_processes() {
        let text = "processcount 2\nrunfor 5\nuse sjf\nprocess name A arrival 0 burst 3\nend\n";
        let err = Config::parse(text).unwrap_err();
        assert!(matches!(err, ConfigError::Expected { line: 5, .. }));
    }

    #[test]
    fn test_missing_end() {
        let text = "processcount 0\nrunfor 5\nuse fcfs\n";
        let err = Config::parse(text).unwrap_err();
        assert!(matches!(err, ConfigError::UnexpectedEof { expected: "end" }));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_trailing_content() {
        let text = "processcount 0\nrunfor 5\nuse fcfs\nend\nprocess name X arrival 0 burst 1\n";
        let err = Config::parse(text).unwrap_err();
        assert!(matches!(err, ConfigError::TrailingContent { line: 5 }));
    }

    #[test]
    fn test_huge_process_count() {
        let text = "processcount 18446744073709551615\nrunfor 5\nuse fcfs\n\
                    process name A arrival 0 burst 1\nend\n";
        let err = Config::parse(text).unwrap_err();
        assert!(matches!(err, ConfigError::Expected { line: 5, .. }));
    }

    #[test]
    fn test_name_too_long() {
        let text = "processcount 1\nrunfor 5\nuse fcfs\n\
                    process name abcdefghijklmnopqrstuvwxyz arrival 0 burst 1\nend\n";
        let err = Config::parse(text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJob { line: 4, .. }));
    }

    #[test]
    fn test_display_round_trip() {
        let config = Config::parse(RR_FILE).unwrap();
        let rendered = config.to_string();
        assert_eq!(
            rendered,
            "processcount 2\nrunfor 8\nuse rr\nquantum 2\n\
             process name A arrival 0 burst 5\n\
             process name B arrival 1 burst 3\nend\n"
        );
        assert_eq!(Config::parse(&rendered).unwrap(), config);
    }

    #[test]
    fn test_from_reader() {
        let config = Config::from_reader(RR_FILE.as_bytes()).unwrap();
        assert_eq!(config.jobs.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/processes.in").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
