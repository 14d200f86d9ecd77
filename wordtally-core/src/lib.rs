//! Boundary-safe chunking and word classification
//!
//! This crate holds the deterministic half of wordtally: everything that can
//! be computed on a single thread from a byte span.
//!
//! - [`decode`]: zero-allocation UTF-8 decode step
//! - [`category`]: diacritic folding and the [`CategoryTag`] lookup
//! - [`classifier`]: the word automaton producing [`PartialCounts`]
//! - [`chunk`]: [`ChunkSource`], which cuts a stream only at safe characters
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//! use wordtally_core::{ChunkSource, PartialCounts, SourceId};
//!
//! let text = "café. Óscar_1";
//! let source = ChunkSource::new(Cursor::new(text), SourceId(0), 4).unwrap();
//!
//! let total: PartialCounts = source.map(|chunk| chunk.unwrap().count_words()).sum();
//! assert_eq!(total, PartialCounts::new(2, 1, 0));
//! ```

#![warn(missing_docs)]

pub mod category;
pub mod chunk;
pub mod classifier;
pub mod counts;
pub mod decode;
pub mod error;

pub use category::{classify, fold, CategoryTag};
pub use chunk::{Chunk, ChunkSource, SourceId};
pub use classifier::{count_words, WordClassifier, WordCounterState};
pub use counts::PartialCounts;
pub use decode::{decode, lead_width, Decoded, Utf8Scanner};
pub use error::{CoreError, Result};
