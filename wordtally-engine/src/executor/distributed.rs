//! Distributed execution strategy
//!
//! Workers own nothing but their channel endpoints. The calling thread acts
//! as dispatcher: it chunks the sources, hands chunks out round-robin
//! through a [`DispatchBackpressure`] and merges replies as credits return.
//!
//! On failure the dispatcher is dropped, which closes every work channel;
//! workers see the disconnect and exit.

use crate::{
    aggregator::ResultAggregator,
    dispatch::{self, DispatchBackpressure, WorkerLink},
    error::Result,
    executor::{feed_sources, settle, ExecutionMode, Executor, FeedStats, ProgressFn, RunReport},
    input::Input,
};
use std::thread;
use wordtally_core::SourceId;

/// Message-passing executor with a credit window of one chunk per worker
#[derive(Debug, Clone)]
pub struct DistributedExecutor {
    chunk_size: usize,
    workers: usize,
}

impl DistributedExecutor {
    /// Create a distributed executor
    pub fn new(chunk_size: usize, workers: usize) -> Self {
        Self {
            chunk_size,
            workers,
        }
    }

    fn drive(
        &self,
        links: Vec<WorkerLink>,
        sources: Vec<(SourceId, Input)>,
        aggregator: &ResultAggregator,
        progress: Option<&ProgressFn>,
    ) -> Result<FeedStats> {
        let mut dispatcher = DispatchBackpressure::new(links)?;

        let stats = feed_sources(sources, self.chunk_size, progress, |chunk| {
            dispatcher.dispatch(chunk, aggregator)
        })?;

        let dispatched = dispatcher.finish(aggregator)?;
        log::debug!("chunks dispatched per worker: {dispatched:?}");
        Ok(stats)
    }
}

impl Executor for DistributedExecutor {
    fn execute(
        &self,
        sources: Vec<(SourceId, Input)>,
        aggregator: &ResultAggregator,
        progress: Option<&ProgressFn>,
    ) -> Result<RunReport> {
        let (links, endpoints): (Vec<_>, Vec<_>) = (0..self.workers).map(dispatch::link).unzip();
        log::debug!("starting {} workers", self.workers);

        let (stats, chunks_per_worker) = thread::scope(|s| {
            let handles: Vec<_> = endpoints
                .into_iter()
                .map(|endpoint| s.spawn(move || endpoint.serve()))
                .collect();

            // links are consumed here, so an early return disconnects workers
            let driver = self.drive(links, sources, aggregator, progress);

            let joined = handles.into_iter().map(|h| h.join()).collect();
            settle(driver, joined)
        })?;

        Ok(RunReport {
            chunks_issued: stats.chunks_issued,
            bytes_processed: stats.bytes_processed,
            chunks_per_worker,
        })
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Distributed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::io::{self, Read};
    use wordtally_core::PartialCounts;

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn test_distributed_tally() {
        let aggregator = ResultAggregator::new();
        aggregator.register(SourceId(0), "a").unwrap();

        let text = "uma frase. outra frase, mais longa! e o fim\n".repeat(40);
        let report = DistributedExecutor::new(12, 3)
            .execute(
                vec![(SourceId(0), Input::from_text("a", text))],
                &aggregator,
                None,
            )
            .unwrap();

        let tally = aggregator.snapshot(SourceId(0)).unwrap();
        assert_eq!(tally.counts, PartialCounts::new(360, 160, 80));
        assert_eq!(tally.chunks_merged, report.chunks_issued[&SourceId(0)]);

        // round-robin spreads chunks evenly
        let min = report.chunks_per_worker.iter().min().unwrap();
        let max = report.chunks_per_worker.iter().max().unwrap();
        assert!(max - min <= 1);
    }

    #[test]
    fn test_more_workers_than_chunks() {
        let aggregator = ResultAggregator::new();
        aggregator.register(SourceId(0), "tiny").unwrap();

        let report = DistributedExecutor::new(4000, 8)
            .execute(
                vec![(SourceId(0), Input::from_text("tiny", "olá mundo\n"))],
                &aggregator,
                None,
            )
            .unwrap();

        assert_eq!(report.chunks_per_worker, [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            aggregator.snapshot(SourceId(0)).unwrap().counts,
            PartialCounts::new(2, 1, 0)
        );
    }

    #[test]
    fn test_read_failure_stops_workers() {
        let aggregator = ResultAggregator::new();
        aggregator.register(SourceId(0), "pipe").unwrap();

        let result = DistributedExecutor::new(16, 4).execute(
            vec![(SourceId(0), Input::from_reader("pipe", BrokenPipe))],
            &aggregator,
            None,
        );

        assert!(matches!(result, Err(EngineError::Core(_))));
    }
}
