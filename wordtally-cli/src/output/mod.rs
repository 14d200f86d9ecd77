//! Output formatting module

use crate::config::OutputFormat;
use anyhow::Result;
use std::io::Write;
use wordtally_engine::{FileTally, ProcessingMetadata};

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output one source's tally
    fn format_tally(&mut self, tally: &FileTally) -> Result<()>;

    /// Finalize output with the run metadata
    fn finish(&mut self, metadata: &ProcessingMetadata) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Build the formatter for `format` over `writer`
pub fn create_formatter<'a, W: Write + 'a>(
    format: OutputFormat,
    pretty_json: bool,
    writer: W,
) -> Box<dyn OutputFormatter + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

/// Write every tally, then the metadata
pub fn write_output(
    formatter: &mut dyn OutputFormatter,
    output: &wordtally_engine::Output,
) -> Result<()> {
    for tally in &output.tallies {
        formatter.format_tally(tally)?;
    }
    formatter.finish(&output.metadata)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;
    use wordtally_engine::{
        ExecutionMode, FileTally, PartialCounts, ProcessingMetadata, SourceId,
    };

    pub fn tallies() -> Vec<FileTally> {
        vec![
            FileTally {
                source_id: SourceId(0),
                name: "a.txt".into(),
                counts: PartialCounts::new(12, 5, 3),
                chunks_merged: 2,
            },
            FileTally {
                source_id: SourceId(1),
                name: "b.txt".into(),
                counts: PartialCounts::new(0, 0, 0),
                chunks_merged: 0,
            },
        ]
    }

    pub fn metadata() -> ProcessingMetadata {
        ProcessingMetadata {
            mode: ExecutionMode::ThreadPool,
            elapsed: Duration::from_micros(1500),
            bytes_processed: 80,
            chunks_issued: 2,
            workers: 2,
            chunks_per_worker: vec![1, 1],
        }
    }
}
