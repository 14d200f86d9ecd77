//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use wordtally_engine::{FileTally, ProcessingMetadata};

/// JSON formatter - buffers tallies and writes one document at the end
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    files: Vec<FileData>,
}

/// Per-file entry in the JSON document
#[derive(Debug, Serialize, Deserialize)]
pub struct FileData {
    /// File name
    pub name: String,
    /// Total number of words
    pub total_words: u64,
    /// Words whose first letter is a vowel
    pub starting_with_vowel: u64,
    /// Words whose last letter is a consonant
    pub ending_with_consonant: u64,
}

/// Run metadata in the JSON document
#[derive(Debug, Serialize, Deserialize)]
pub struct RunData {
    /// Execution mode
    pub mode: String,
    /// Elapsed wall-clock time in seconds
    pub elapsed_seconds: f64,
    /// Bytes read
    pub bytes_processed: u64,
    /// Throughput over the whole run
    pub bytes_per_second: f64,
    /// Chunks issued
    pub chunks_issued: usize,
    /// Chunks handled by each worker
    pub chunks_per_worker: Vec<usize>,
}

#[derive(Serialize)]
struct Document<'a> {
    files: &'a [FileData],
    run: RunData,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            files: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_tally(&mut self, tally: &FileTally) -> Result<()> {
        self.files.push(FileData {
            name: tally.name.clone(),
            total_words: tally.counts.total_words,
            starting_with_vowel: tally.counts.starting_with_vowel,
            ending_with_consonant: tally.counts.ending_with_consonant,
        });
        Ok(())
    }

    fn finish(&mut self, metadata: &ProcessingMetadata) -> Result<()> {
        let document = Document {
            files: &self.files,
            run: RunData {
                mode: metadata.mode.to_string(),
                elapsed_seconds: metadata.elapsed.as_secs_f64(),
                bytes_processed: metadata.bytes_processed,
                bytes_per_second: metadata.bytes_per_second(),
                chunks_issued: metadata.chunks_issued,
                chunks_per_worker: metadata.chunks_per_worker.clone(),
            },
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &document)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
