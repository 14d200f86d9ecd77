//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Byte-based progress bar over all input files
///
/// Cloning shares the same bar, so the engine's progress hook can own one
/// handle while the command keeps another to finish it.
#[derive(Clone)]
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter; quiet reporters draw nothing
    pub fn new(quiet: bool, total_bytes: u64) -> Self {
        if quiet {
            return Self { progress_bar: None };
        }

        let pb = ProgressBar::new(total_bytes);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
        }
    }

    /// Record `bytes` more input as issued
    pub fn advance(&self, bytes: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.inc(bytes as u64);
        }
    }

    /// Current position in bytes
    pub fn position(&self) -> u64 {
        self.progress_bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_tracks_nothing() {
        let reporter = ProgressReporter::new(true, 100);
        reporter.advance(40);
        assert_eq!(reporter.position(), 0);
        reporter.finish();
    }

    #[test]
    fn test_clones_share_the_bar() {
        let reporter = ProgressReporter::new(false, 100);
        let hook = reporter.clone();
        hook.advance(30);
        hook.advance(12);
        assert_eq!(reporter.position(), 42);
        reporter.finish();
    }
}
