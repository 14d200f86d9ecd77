//! Orchestration for bounded, parallel word counting
//!
//! This crate moves chunks from [`wordtally_core::ChunkSource`] to workers
//! and their counts back into a [`ResultAggregator`]. Three strategies share
//! the same chunking and classification, so they always agree:
//!
//! - [`SequentialExecutor`]: one thread, no queue
//! - [`ThreadPoolExecutor`]: a [`BoundedQueue`] drained by scoped threads
//! - [`DistributedExecutor`]: per-worker channels behind a
//!   [`DispatchBackpressure`] credit window
//!
//! # Example
//!
//! ```rust
//! use wordtally_engine::{ExecutionMode, Input, TallyProcessor};
//!
//! let processor = TallyProcessor::builder()
//!     .mode(ExecutionMode::Distributed)
//!     .workers(Some(2))
//!     .build()
//!     .unwrap();
//!
//! let output = processor
//!     .process(vec![Input::from_text("greeting", "olá, mundo\n")])
//!     .unwrap();
//! assert_eq!(output.tallies[0].counts.total_words, 2);
//! ```

#![warn(missing_docs)]

pub mod aggregator;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod input;
pub mod processor;
pub mod queue;

// Re-export key types
pub use aggregator::{FileTally, ResultAggregator};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use dispatch::DispatchBackpressure;
pub use error::{EngineError, Result};
pub use executor::{
    DistributedExecutor, ExecutionMode, Executor, ProgressFn, RunReport, SequentialExecutor,
    ThreadPoolExecutor,
};
pub use input::Input;
pub use processor::{Output, ProcessingMetadata, TallyProcessor, TallyProcessorBuilder};
pub use queue::{BoundedQueue, QueueItem, QueueState};

// Re-export from core for convenience
pub use wordtally_core::{PartialCounts, SourceId};
