//! Run driver and builder
//!
//! [`TallyProcessor`] registers every source, hands them to the executor for
//! the configured mode and, once the executor returns, checks that every
//! chunk issued for a source was merged exactly once before it reports
//! anything.

use crate::{
    aggregator::{FileTally, ResultAggregator},
    config::{EngineConfig, EngineConfigBuilder},
    error::{EngineError, Result},
    executor::{executor_for, ExecutionMode, ProgressFn, RunReport},
    input::Input,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wordtally_core::SourceId;

/// Word-count driver
pub struct TallyProcessor {
    config: EngineConfig,
    progress: Option<Arc<ProgressFn>>,
}

impl std::fmt::Debug for TallyProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TallyProcessor")
            .field("config", &self.config)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// Tallies plus run metadata
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Output {
    /// One tally per source, in input order
    pub tallies: Vec<FileTally>,
    /// How the run went
    pub metadata: ProcessingMetadata,
}

/// Run metadata
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProcessingMetadata {
    /// Execution mode used
    pub mode: ExecutionMode,
    /// Wall-clock time from first read to last merge
    pub elapsed: Duration,
    /// Bytes read across all sources
    pub bytes_processed: u64,
    /// Chunks issued across all sources
    pub chunks_issued: usize,
    /// Worker count (1 for sequential)
    pub workers: usize,
    /// Chunks handled by each worker
    pub chunks_per_worker: Vec<usize>,
}

impl ProcessingMetadata {
    /// Throughput in bytes per second
    pub fn bytes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes_processed as f64 / secs
        } else {
            0.0
        }
    }
}

impl TallyProcessor {
    /// Create a processor with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a processor with custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Create a builder
    pub fn builder() -> TallyProcessorBuilder {
        TallyProcessorBuilder::new()
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Count words in every input
    ///
    /// Any failure aborts the whole run; no partial tallies are returned.
    pub fn process(&self, inputs: Vec<Input>) -> Result<Output> {
        self.config.validate()?;
        let EngineConfig {
            mode,
            chunk_size,
            workers,
            queue_capacity,
        } = self.config;

        let aggregator = ResultAggregator::new();
        let mut sources = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.into_iter().enumerate() {
            let source_id = SourceId(index);
            aggregator.register(source_id, input.name())?;
            sources.push((source_id, input));
        }

        log::info!(
            "processing {} sources in {mode} mode ({} workers, {chunk_size}-byte chunks)",
            sources.len(),
            if mode == ExecutionMode::Sequential { 1 } else { workers }
        );

        let executor = executor_for(mode, chunk_size, workers, queue_capacity);
        let start = Instant::now();
        let report = executor.execute(sources, &aggregator, self.progress.as_deref())?;
        let elapsed = start.elapsed();

        let tallies = aggregator.snapshot_all()?;
        verify_complete(&tallies, &report)?;

        log::info!(
            "processed {} bytes in {} chunks in {:.3} s",
            report.bytes_processed,
            report.chunks_issued.values().sum::<usize>(),
            elapsed.as_secs_f64()
        );

        Ok(Output {
            tallies,
            metadata: ProcessingMetadata {
                mode,
                elapsed,
                bytes_processed: report.bytes_processed,
                chunks_issued: report.chunks_issued.values().sum(),
                workers: report.chunks_per_worker.len(),
                chunks_per_worker: report.chunks_per_worker,
            },
        })
    }

    /// Count words in a single in-memory text
    pub fn process_text(&self, name: &str, text: &str) -> Result<FileTally> {
        let mut output = self.process(vec![Input::from_text(name, text)])?;
        output
            .tallies
            .pop()
            .ok_or(EngineError::UnknownSource(SourceId(0)))
    }
}

impl Default for TallyProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Every registered source must have exactly as many merges as chunks issued
fn verify_complete(tallies: &[FileTally], report: &RunReport) -> Result<()> {
    for tally in tallies {
        let issued = report
            .chunks_issued
            .get(&tally.source_id)
            .copied()
            .unwrap_or(0);
        if tally.chunks_merged != issued {
            return Err(EngineError::IncompleteTally {
                source_id: tally.source_id,
                merged: tally.chunks_merged,
                issued,
            });
        }
    }
    Ok(())
}

/// Builder for [`TallyProcessor`]
#[derive(Default)]
pub struct TallyProcessorBuilder {
    config_builder: EngineConfigBuilder,
    progress: Option<Arc<ProgressFn>>,
}

impl TallyProcessorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution mode
    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.config_builder = self.config_builder.mode(mode);
        self
    }

    /// Set the nominal chunk size in bytes
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.config_builder = self.config_builder.chunk_size(bytes);
        self
    }

    /// Set the worker count (None = one per CPU)
    pub fn workers(mut self, count: Option<usize>) -> Self {
        self.config_builder = self.config_builder.workers(count);
        self
    }

    /// Set the thread-pool queue capacity
    pub fn queue_capacity(mut self, slots: usize) -> Self {
        self.config_builder = self.config_builder.queue_capacity(slots);
        self
    }

    /// Install a callback run after every issued chunk
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(SourceId, usize) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Build the processor
    pub fn build(self) -> Result<TallyProcessor> {
        Ok(TallyProcessor {
            config: self.config_builder.build()?,
            progress: self.progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wordtally_core::PartialCounts;

    #[test]
    fn test_process_text() {
        let processor = TallyProcessor::builder()
            .mode(ExecutionMode::Sequential)
            .build()
            .unwrap();

        let tally = processor.process_text("memo", "café. Óscar_1").unwrap();
        assert_eq!(tally.name, "memo");
        assert_eq!(tally.counts, PartialCounts::new(2, 1, 0));
    }

    #[test]
    fn test_tallies_follow_input_order() {
        let processor = TallyProcessor::builder()
            .mode(ExecutionMode::ThreadPool)
            .workers(Some(2))
            .chunk_size(8)
            .build()
            .unwrap();

        let output = processor
            .process(vec![
                Input::from_text("first", "abc def\n"),
                Input::from_text("second", "ovo "),
                Input::from_text("third", ""),
            ])
            .unwrap();

        let names: Vec<_> = output.tallies.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!(output.tallies[0].counts, PartialCounts::new(2, 1, 2));
        assert_eq!(output.tallies[1].counts, PartialCounts::new(1, 1, 0));
        assert!(output.tallies[2].counts.is_empty());

        assert_eq!(output.metadata.mode, ExecutionMode::ThreadPool);
        assert_eq!(output.metadata.workers, 2);
        assert_eq!(output.metadata.bytes_processed, 12);
    }

    #[test]
    fn test_progress_callback_sees_every_byte() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);

        let processor = TallyProcessor::builder()
            .mode(ExecutionMode::Distributed)
            .workers(Some(3))
            .chunk_size(5)
            .on_progress(move |_, bytes| {
                counter.fetch_add(bytes, Ordering::Relaxed);
            })
            .build()
            .unwrap();

        let text = "um dois tres quatro cinco seis sete oito nove dez";
        processor.process(vec![Input::from_text("n", text)]).unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), text.len());
    }

    #[test]
    fn test_incomplete_tally_detected() {
        let tallies = vec![FileTally {
            source_id: SourceId(0),
            name: "x".into(),
            counts: PartialCounts::default(),
            chunks_merged: 2,
        }];
        let report = RunReport {
            chunks_issued: BTreeMap::from([(SourceId(0), 3)]),
            ..RunReport::default()
        };

        assert!(matches!(
            verify_complete(&tallies, &report),
            Err(EngineError::IncompleteTally {
                merged: 2,
                issued: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_failed_run_reports_no_tallies() {
        let processor = TallyProcessor::builder()
            .mode(ExecutionMode::Distributed)
            .workers(Some(2))
            .build()
            .unwrap();

        let result = processor.process(vec![
            Input::from_text("fine", "text here"),
            Input::from_file("/nonexistent/input.txt"),
        ]);
        assert!(matches!(result, Err(EngineError::SourceOpen { .. })));
    }

    #[test]
    fn test_bytes_per_second() {
        let mut metadata = ProcessingMetadata {
            mode: ExecutionMode::Sequential,
            elapsed: Duration::from_millis(500),
            bytes_processed: 1000,
            chunks_issued: 1,
            workers: 1,
            chunks_per_worker: vec![1],
        };
        assert_eq!(metadata.bytes_per_second(), 2000.0);

        metadata.elapsed = Duration::ZERO;
        assert_eq!(metadata.bytes_per_second(), 0.0);
    }
}
