//! Sequential execution strategy

use crate::{
    aggregator::ResultAggregator,
    error::Result,
    executor::{feed_sources, ExecutionMode, Executor, ProgressFn, RunReport},
    input::Input,
};
use wordtally_core::SourceId;

/// Sequential single-threaded executor
///
/// Chunks exactly like the concurrent modes so all three produce the same
/// tallies.
#[derive(Debug, Clone)]
pub struct SequentialExecutor {
    chunk_size: usize,
}

impl SequentialExecutor {
    /// Create a sequential executor
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }
}

impl Executor for SequentialExecutor {
    fn execute(
        &self,
        sources: Vec<(SourceId, Input)>,
        aggregator: &ResultAggregator,
        progress: Option<&ProgressFn>,
    ) -> Result<RunReport> {
        let mut processed = 0;
        let stats = feed_sources(sources, self.chunk_size, progress, |chunk| {
            aggregator.merge(chunk.source_id, chunk.count_words())?;
            processed += 1;
            Ok(())
        })?;

        Ok(RunReport {
            chunks_issued: stats.chunks_issued,
            bytes_processed: stats.bytes_processed,
            chunks_per_worker: vec![processed],
        })
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
