use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// All errors surfaced by the command-line front end.
///
/// Variants are split into two categories:
/// - **Input errors** (exit code 2): unreadable or malformed job files, I/O failures
/// - **Run errors** (exit code 1): the run itself could not produce output
#[derive(thiserror::Error, Debug)]
pub enum Error {
    // ── Input errors (exit code 2) ───────────────────────────────────
    #[error("{path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("invalid jobs: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("`--quantum` is only valid with `--use rr`")]
    UnexpectedQuantum,

    #[error("`--use rr` needs a quantum (none in file, none given with `--quantum`)")]
    MissingQuantum,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ── Run errors (exit code 1) ─────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Map each error variant to its process exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config { .. }
            | Self::Validation(_)
            | Self::UnexpectedQuantum
            | Self::MissingQuantum
            | Self::Io(_) => ExitCode::from(2),

            Self::Json(_) => ExitCode::from(1),
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
