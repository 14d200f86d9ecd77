//! Engine error types
//!
//! Every failure here is fatal for the run: the driver stops, joins its
//! workers and reports the error without any partial tallies.

use std::sync::PoisonError;
use thiserror::Error;
use wordtally_core::{CoreError, SourceId};

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A source could not be opened
    #[error("cannot open source '{name}': {source}")]
    SourceOpen {
        /// Display name of the source
        name: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Chunking failed (stream read error or bad chunk size)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A lock or condition variable failed
    #[error("synchronization primitive failed: {0}")]
    SyncPrimitive(String),

    /// The queue was aborted by a failing participant
    #[error("work queue aborted")]
    Aborted,

    /// A merge or snapshot named a source that was never registered
    #[error("source {0} was not registered")]
    UnknownSource(SourceId),

    /// Fewer merges arrived than chunks were issued
    #[error("source {source_id} incomplete: {merged} of {issued} chunks merged")]
    IncompleteTally {
        /// The affected source
        source_id: SourceId,
        /// Merges received
        merged: usize,
        /// Chunks issued by the driver
        issued: usize,
    },

    /// A worker's channel closed before it was told to stop
    #[error("worker {worker} disconnected")]
    WorkerDisconnected {
        /// Worker index
        worker: usize,
    },

    /// A worker thread panicked
    #[error("worker {worker} panicked")]
    WorkerPanicked {
        /// Worker index
        worker: usize,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl<T> From<PoisonError<T>> for EngineError {
    fn from(err: PoisonError<T>) -> Self {
        EngineError::SyncPrimitive(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_poisoned_lock_maps_to_sync_failure() {
        let lock = Arc::new(Mutex::new(0));
        let poisoner = Arc::clone(&lock);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison");
        })
        .join();

        let err: EngineError = lock.lock().unwrap_err().into();
        assert!(matches!(err, EngineError::SyncPrimitive(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = EngineError::IncompleteTally {
            source_id: SourceId(2),
            merged: 3,
            issued: 5,
        };
        assert_eq!(err.to_string(), "source #2 incomplete: 3 of 5 chunks merged");

        let err = EngineError::WorkerDisconnected { worker: 1 };
        assert_eq!(err.to_string(), "worker 1 disconnected");
    }
}
