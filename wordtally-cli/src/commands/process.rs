//! Process command implementation

use crate::{
    config::{CliConfig, OutputFormat},
    error::CliError,
    input::{resolve_patterns, FileReader},
    output::{create_formatter, write_output},
    progress::ProgressReporter,
};
use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use wordtally_engine::{EngineError, ExecutionMode, TallyProcessor};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Execution mode
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Number of workers (default: one per CPU)
    #[arg(short, long, value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Nominal chunk size in bytes
    #[arg(short, long, value_name = "BYTES")]
    pub chunk_size: Option<usize>,

    /// Bounded queue capacity (thread-pool mode)
    #[arg(short = 'k', long, value_name = "SLOTS")]
    pub queue_capacity: Option<usize>,

    /// Configuration file
    #[arg(long, value_name = "FILE", env = "WORDTALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Execution modes accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Single-threaded baseline
    Sequential,
    /// Worker threads sharing a bounded queue
    ThreadPool,
    /// Round-robin message passing with a credit window
    Distributed,
}

impl From<Mode> for ExecutionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Sequential => ExecutionMode::Sequential,
            Mode::ThreadPool => ExecutionMode::ThreadPool,
            Mode::Distributed => ExecutionMode::Distributed,
        }
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging();

        log::info!("Starting word count");
        log::debug!("Arguments: {:?}", self);

        let config = self.effective_config()?;
        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} files to process", files.len());

        let reporter = ProgressReporter::new(self.quiet, FileReader::total_size(&files)?);
        let hook = reporter.clone();

        let processing = &config.processing;
        let processor = TallyProcessor::builder()
            .mode(processing.mode)
            .chunk_size(processing.chunk_size)
            .workers((processing.workers > 0).then_some(processing.workers))
            .queue_capacity(processing.queue_capacity)
            .on_progress(move |_, bytes| hook.advance(bytes))
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let result = processor.process(FileReader::inputs(&files));
        reporter.finish();
        let output = result.map_err(|e| run_failed(e, files.len()))?;

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout().lock()),
        };
        let output_config = &config.output;
        let mut formatter =
            create_formatter(output_config.format, output_config.pretty_json, writer);
        write_output(formatter.as_mut(), &output)?;

        log::info!(
            "Counted {} files in {:.3} s",
            output.tallies.len(),
            output.metadata.elapsed.as_secs_f64()
        );
        Ok(())
    }

    /// Config file values overridden by command-line flags
    pub fn effective_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        if let Some(mode) = self.mode {
            config.processing.mode = mode.into();
        }
        if let Some(workers) = self.workers {
            config.processing.workers = workers;
        }
        if let Some(size) = self.chunk_size {
            config.processing.chunk_size = size;
        }
        if let Some(slots) = self.queue_capacity {
            config.processing.queue_capacity = slots;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }

        config.validate()?;
        Ok(config)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

/// Wrap an engine failure, keeping its source chain
fn run_failed(error: EngineError, files: usize) -> anyhow::Error {
    anyhow::Error::from(error).context(CliError::ProcessingError(format!(
        "word count over {files} files failed"
    )))
}
