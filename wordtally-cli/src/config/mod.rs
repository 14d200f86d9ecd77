//! Configuration module
//!
//! Values come from an optional TOML file; command-line flags override them.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use wordtally_engine::{config::defaults, ExecutionMode};

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Processing-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Execution mode
    pub mode: ExecutionMode,

    /// Nominal chunk size in bytes
    pub chunk_size: usize,

    /// Number of workers (0 = auto)
    pub workers: usize,

    /// Thread-pool queue capacity
    pub queue_capacity: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::ThreadPool,
            chunk_size: defaults::CHUNK_SIZE,
            workers: 0,
            queue_capacity: defaults::QUEUE_CAPACITY,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty_json: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The classic per-file report
    Text,
    /// JSON document with tallies and run metadata
    Json,
    /// Markdown table
    Markdown,
}

impl OutputFormat {
    /// Every format, in display order
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Markdown,
    ];

    /// Name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Text => "per-file report followed by the elapsed time",
            OutputFormat::Json => "tallies and run metadata as JSON",
            OutputFormat::Markdown => "one table row per file",
        }
    }
}

impl CliConfig {
    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;

        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the engine cannot use
    pub fn validate(&self) -> Result<()> {
        if self.processing.chunk_size == 0 {
            return Err(CliError::ConfigError("chunk_size must be greater than 0".into()).into());
        }
        if self.processing.queue_capacity == 0 {
            return Err(
                CliError::ConfigError("queue_capacity must be greater than 0".into()).into(),
            );
        }
        Ok(())
    }

    /// Serialize as commented TOML
    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        Ok(format!(
            "# wordtally configuration\n\
             # mode: sequential | thread-pool | distributed\n\
             # workers = 0 uses one worker per CPU\n\
             # format: text | json | markdown\n\n{body}"
        ))
    }
}
