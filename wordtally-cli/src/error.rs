//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No file matched any input pattern
    NoMatchingFiles(Vec<String>),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Processing error from the engine
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoMatchingFiles(patterns) => {
                write!(f, "No files found matching: {}", patterns.join(", "))
            }
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_files_display() {
        let error = CliError::NoMatchingFiles(vec!["*.txt".into(), "docs/*.md".into()]);
        assert_eq!(
            error.to_string(),
            "No files found matching: *.txt, docs/*.md"
        );
    }

    #[test]
    fn test_invalid_pattern_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("chunk_size must be positive".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: chunk_size must be positive"
        );
    }

    #[test]
    fn test_errors_survive_anyhow_wrapping() {
        let failure: CliResult<()> = Err(CliError::ProcessingError("worker 2 panicked".into()).into());
        let err = failure.unwrap_err();
        assert!(err.to_string().contains("worker 2 panicked"));
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
