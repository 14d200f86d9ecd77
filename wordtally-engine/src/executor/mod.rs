//! Execution strategies for word counting

use crate::{
    aggregator::ResultAggregator,
    error::{EngineError, Result},
    input::Input,
};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::thread;
use wordtally_core::{Chunk, ChunkSource, SourceId};

pub mod distributed;
pub mod sequential;
pub mod thread_pool;

// Re-export executors
pub use distributed::DistributedExecutor;
pub use sequential::SequentialExecutor;
pub use thread_pool::ThreadPoolExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ExecutionMode {
    /// Single thread, no queue
    Sequential,
    /// Shared bounded queue drained by a pool of threads
    ThreadPool,
    /// Per-worker channels with round-robin dispatch
    Distributed,
}

impl ExecutionMode {
    /// Every mode, in display order
    pub const ALL: [ExecutionMode; 3] = [
        ExecutionMode::Sequential,
        ExecutionMode::ThreadPool,
        ExecutionMode::Distributed,
    ];

    /// Name used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::ThreadPool => "thread-pool",
            ExecutionMode::Distributed => "distributed",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "single-threaded baseline",
            ExecutionMode::ThreadPool => "worker threads sharing a bounded queue",
            ExecutionMode::Distributed => "round-robin message passing with a credit window",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "thread-pool" | "threadpool" | "pool" => Ok(ExecutionMode::ThreadPool),
            "distributed" => Ok(ExecutionMode::Distributed),
            other => Err(EngineError::Config(format!(
                "unknown execution mode '{other}'"
            ))),
        }
    }
}

/// Callback invoked by the reading thread after each chunk is issued
///
/// Receives the chunk's source and its length in bytes.
pub type ProgressFn = dyn Fn(SourceId, usize) + Send + Sync;

/// What an executor reports back besides the merged counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Chunks issued per source
    pub chunks_issued: BTreeMap<SourceId, usize>,
    /// Bytes read across all sources
    pub bytes_processed: u64,
    /// Chunks processed by each worker
    pub chunks_per_worker: Vec<usize>,
}

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Chunk every source, classify every chunk and merge the counts
    ///
    /// Every source must already be registered with `aggregator`. Sources
    /// are read one after another, in the order given.
    fn execute(
        &self,
        sources: Vec<(SourceId, Input)>,
        aggregator: &ResultAggregator,
        progress: Option<&ProgressFn>,
    ) -> Result<RunReport>;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Build the executor for `mode`
pub fn executor_for(
    mode: ExecutionMode,
    chunk_size: usize,
    workers: usize,
    queue_capacity: usize,
) -> Box<dyn Executor> {
    match mode {
        ExecutionMode::Sequential => Box::new(SequentialExecutor::new(chunk_size)),
        ExecutionMode::ThreadPool => Box::new(ThreadPoolExecutor::new(
            chunk_size,
            workers,
            queue_capacity,
        )),
        ExecutionMode::Distributed => Box::new(DistributedExecutor::new(chunk_size, workers)),
    }
}

#[derive(Debug, Default)]
pub(crate) struct FeedStats {
    pub(crate) chunks_issued: BTreeMap<SourceId, usize>,
    pub(crate) bytes_processed: u64,
}

/// Chunk each source in turn and hand every chunk to `sink`
///
/// Only one source is open at a time. The first error stops the feed.
pub(crate) fn feed_sources<F>(
    sources: Vec<(SourceId, Input)>,
    chunk_size: usize,
    progress: Option<&ProgressFn>,
    mut sink: F,
) -> Result<FeedStats>
where
    F: FnMut(Chunk) -> Result<()>,
{
    let mut stats = FeedStats::default();

    for (source_id, input) in sources {
        log::debug!("reading source {source_id}: {}", input.name());
        let reader = input.open()?;

        let mut issued = 0;
        for chunk in ChunkSource::new(reader, source_id, chunk_size)? {
            let chunk = chunk?;
            let len = chunk.len();
            log::trace!("issuing chunk {issued} of source {source_id} ({len} bytes)");

            sink(chunk)?;
            issued += 1;
            stats.bytes_processed += len as u64;
            if let Some(progress) = progress {
                progress(source_id, len);
            }
        }

        log::debug!("source {source_id} split into {issued} chunks");
        stats.chunks_issued.insert(source_id, issued);
    }

    Ok(stats)
}

/// Combine the driver's outcome with every worker's
///
/// A panic wins, then the first real error; [`EngineError::Aborted`] is only
/// reported when nothing else explains the failure.
pub(crate) fn settle<T>(
    driver: Result<T>,
    workers: Vec<thread::Result<Result<usize>>>,
) -> Result<(T, Vec<usize>)> {
    let mut worker_error = None;
    let mut processed = Vec::with_capacity(workers.len());

    for (worker, joined) in workers.into_iter().enumerate() {
        match joined {
            Err(_) => return Err(EngineError::WorkerPanicked { worker }),
            Ok(Ok(count)) => processed.push(count),
            Ok(Err(err)) => {
                log::debug!("worker {worker} failed: {err}");
                match worker_error {
                    None | Some(EngineError::Aborted) => worker_error = Some(err),
                    Some(_) => {}
                }
            }
        }
    }

    match (driver, worker_error) {
        (Ok(value), None) => Ok((value, processed)),
        (Err(EngineError::Aborted), Some(err)) => Err(err),
        (Err(err), _) => Err(err),
        (Ok(_), Some(err)) => Err(err),
    }
}
