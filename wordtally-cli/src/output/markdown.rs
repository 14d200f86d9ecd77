//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use wordtally_engine::{FileTally, ProcessingMetadata};

/// Markdown formatter - outputs tallies as a table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(
            self.writer,
            "| File | Words | Starting with a vowel | Ending with a consonant |"
        )?;
        writeln!(self.writer, "|---|---:|---:|---:|")?;
        self.header_written = true;
        Ok(())
    }
}

impl<W: Write> OutputFormatter for MarkdownFormatter<W> {
    fn format_tally(&mut self, tally: &FileTally) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
        }

        // pipes would break the row
        let name = tally.name.replace('|', "\\|");
        writeln!(
            self.writer,
            "| {} | {} | {} | {} |",
            name,
            tally.counts.total_words,
            tally.counts.starting_with_vowel,
            tally.counts.ending_with_consonant
        )?;
        Ok(())
    }

    fn finish(&mut self, metadata: &ProcessingMetadata) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Mode: {}, elapsed time: {:.6} s*",
            metadata.mode,
            metadata.elapsed.as_secs_f64()
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
