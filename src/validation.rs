//! Input validation for job records.
//!
//! The tick engine assumes well-formed jobs. These checks run on the
//! loader side so that problems are reported with context before a run
//! starts. Detects:
//! - Empty job names
//! - Names longer than [`MAX_NAME_LEN`]
//! - Names containing whitespace or `#` (would not survive the text format)
//!
//! Duplicate names are legal: each entry is simulated as a distinct job.

use crate::models::Job;

/// Maximum job name length, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A job has an empty name.
    EmptyName,
    /// A job name exceeds [`MAX_NAME_LEN`].
    NameTooLong,
    /// A job name contains whitespace or a comment marker.
    InvalidNameCharacter,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a single job.
pub fn validate_job(job: &Job) -> ValidationResult {
    let mut errors = Vec::new();
    check_name(&job.name, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates all jobs of a run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();
    for job in jobs {
        check_name(&job.name, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_name(name: &str, errors: &mut Vec<ValidationError>) {
    if name.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyName,
            "Job name is empty",
        ));
        return;
    }

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        errors.push(ValidationError::new(
            ValidationErrorKind::NameTooLong,
            format!("Job name '{name}' is {len} characters (max {MAX_NAME_LEN})"),
        ));
    }

    if name.chars().any(|c| c.is_whitespace() || c == '#') {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidNameCharacter,
            format!("Job name '{name}' contains whitespace or '#'"),
        ));
    }
}
