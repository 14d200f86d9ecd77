//! Thread-pool execution strategy
//!
//! The calling thread reads and chunks the sources and feeds a
//! [`BoundedQueue`]; `workers` scoped threads drain it. After the last chunk
//! the driver enqueues one terminal marker per worker, so every worker stops
//! after taking exactly one.
//!
//! Any failure aborts the queue, which wakes every blocked participant. A
//! panic on the driver side aborts it too, so the scope can still join.

use crate::{
    aggregator::ResultAggregator,
    error::Result,
    executor::{feed_sources, settle, ExecutionMode, Executor, ProgressFn, RunReport},
    input::Input,
    queue::{BoundedQueue, QueueItem},
};
use std::thread;
use wordtally_core::{Chunk, SourceId};

/// Multi-threaded executor over a shared bounded queue
#[derive(Debug, Clone)]
pub struct ThreadPoolExecutor {
    chunk_size: usize,
    workers: usize,
    queue_capacity: usize,
}

impl ThreadPoolExecutor {
    /// Create a thread-pool executor
    pub fn new(chunk_size: usize, workers: usize, queue_capacity: usize) -> Self {
        Self {
            chunk_size,
            workers,
            queue_capacity,
        }
    }
}

impl Executor for ThreadPoolExecutor {
    fn execute(
        &self,
        sources: Vec<(SourceId, Input)>,
        aggregator: &ResultAggregator,
        progress: Option<&ProgressFn>,
    ) -> Result<RunReport> {
        let queue = BoundedQueue::new(self.queue_capacity)?;
        log::debug!(
            "starting {} workers on a queue of {} slots",
            self.workers,
            self.queue_capacity
        );

        let (stats, chunks_per_worker) = thread::scope(|s| {
            let handles: Vec<_> = (0..self.workers)
                .map(|worker| {
                    let queue = &queue;
                    s.spawn(move || run_worker(worker, queue, aggregator))
                })
                .collect();

            let mut guard = AbortOnDrop {
                queue: &queue,
                armed: true,
            };
            let driver = feed_sources(sources, self.chunk_size, progress, |chunk| {
                queue.put(chunk)
            })
            .and_then(|stats| {
                for _ in 0..self.workers {
                    queue.end()?;
                }
                Ok(stats)
            });
            guard.armed = driver.is_err();
            drop(guard);

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
        ExecutionMode::ThreadPool
    }
}

/// Aborts the queue unless disarmed; covers both early returns and panics
struct AbortOnDrop<'a> {
    queue: &'a BoundedQueue<Chunk>,
    armed: bool,
}

impl Drop for AbortOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.queue.abort();
        }
    }
}

/// Worker life cycle: take items until a terminal marker
fn run_worker(
    worker: usize,
    queue: &BoundedQueue<Chunk>,
    aggregator: &ResultAggregator,
) -> Result<usize> {
    let mut guard = AbortOnDrop { queue, armed: true };
    let mut processed = 0;

    loop {
        match queue.get()? {
            QueueItem::Work(chunk) => {
                let counts = chunk.count_words();
                aggregator.merge(chunk.source_id, counts)?;
                processed += 1;
            }
            QueueItem::End => break,
        }
    }

    guard.armed = false;
    log::debug!("worker {worker} done after {processed} chunks");
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::panic::{self, AssertUnwindSafe};
    use wordtally_core::PartialCounts;

    #[test]
    fn test_thread_pool_tally() {
        let aggregator = ResultAggregator::new();
        aggregator.register(SourceId(0), "a").unwrap();
        aggregator.register(SourceId(1), "b").unwrap();

        let text = "uma frase. outra frase, mais longa! e o fim\n".repeat(50);
        let report = ThreadPoolExecutor::new(16, 4, 2)
            .execute(
                vec![
                    (SourceId(0), Input::from_text("a", text)),
                    (SourceId(1), Input::from_text("b", "sol\n")),
                ],
                &aggregator,
                None,
            )
            .unwrap();

        let a = aggregator.snapshot(SourceId(0)).unwrap();
        assert_eq!(a.counts, PartialCounts::new(450, 200, 100));
        assert_eq!(a.chunks_merged, report.chunks_issued[&SourceId(0)]);

        let b = aggregator.snapshot(SourceId(1)).unwrap();
        assert_eq!(b.counts, PartialCounts::new(1, 0, 1));

        let total: usize = report.chunks_per_worker.iter().sum();
        assert_eq!(report.chunks_per_worker.len(), 4);
        assert_eq!(total, report.chunks_issued.values().sum::<usize>());
    }

    #[test]
    fn test_missing_source_aborts_run() {
        let aggregator = ResultAggregator::new();
        aggregator.register(SourceId(0), "ok").unwrap();
        aggregator.register(SourceId(1), "missing").unwrap();

        let result = ThreadPoolExecutor::new(4, 3, 1).execute(
            vec![
                (SourceId(0), Input::from_text("ok", "a b c d e f g h")),
                (SourceId(1), Input::from_file("/nonexistent/wordtally.txt")),
            ],
            &aggregator,
            None,
        );

        assert!(matches!(result, Err(EngineError::SourceOpen { .. })));
    }

    #[test]
    fn test_panicking_progress_hook_releases_workers() {
        let aggregator = ResultAggregator::new();
        aggregator.register(SourceId(0), "a").unwrap();
        let hook = |_: SourceId, _: usize| panic!("progress hook failed");
        let text = "um dois tres quatro\n".repeat(20);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            ThreadPoolExecutor::new(4, 2, 1).execute(
                vec![(SourceId(0), Input::from_text("a", text))],
                &aggregator,
                Some(&hook),
            )
        }));

        assert!(outcome.is_err());
    }

    #[test]
    fn test_unregistered_source_fails_worker() {
        let aggregator = ResultAggregator::new();

        let result = ThreadPoolExecutor::new(4, 2, 1).execute(
            vec![(SourceId(9), Input::from_text("x", "a b c d e f g h i j k"))],
            &aggregator,
            None,
        );

        assert!(matches!(
            result,
            Err(EngineError::UnknownSource(SourceId(9)))
        ));
    }
}
