//! Core error types

use crate::chunk::SourceId;
use thiserror::Error;

/// Errors raised while producing chunks
#[derive(Debug, Error)]
pub enum CoreError {
    /// The underlying stream failed mid-read
    #[error("failed to read source {source_id}: {source}")]
    Read {
        /// Source being chunked
        source_id: SourceId,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A chunk source was asked for zero-byte chunks
    #[error("nominal chunk size must be greater than 0")]
    InvalidChunkSize,
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
