//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use wordtally_engine::{FileTally, ProcessingMetadata};

/// Plain text formatter - one report block per file, then the elapsed time
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_tally(&mut self, tally: &FileTally) -> Result<()> {
        let counts = &tally.counts;
        writeln!(self.writer, "File name: {}", tally.name)?;
        writeln!(self.writer, "Total number of words: {}", counts.total_words)?;
        writeln!(
            self.writer,
            "Number of words starting with a vowel char: {}",
            counts.starting_with_vowel
        )?;
        writeln!(
            self.writer,
            "Number of words ending with a consonant char: {}",
            counts.ending_with_consonant
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self, metadata: &ProcessingMetadata) -> Result<()> {
        writeln!(
            self.writer,
            "Elapsed time = {:.6} s",
            metadata.elapsed.as_secs_f64()
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{metadata, tallies};

    #[test]
    fn test_report_layout() {
        let mut buf = Vec::new();
        let mut formatter = TextFormatter::new(&mut buf);
        for tally in tallies() {
            formatter.format_tally(&tally).unwrap();
        }
        formatter.finish(&metadata()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "File name: a.txt\n\
             Total number of words: 12\n\
             Number of words starting with a vowel char: 5\n\
             Number of words ending with a consonant char: 3\n\
             \n\
             File name: b.txt\n\
             Total number of words: 0\n\
             Number of words starting with a vowel char: 0\n\
             Number of words ending with a consonant char: 0\n\
             \n\
             Elapsed time = 0.001500 s\n"
        );
    }
}
