//! Boundary-safe chunking of byte streams
//!
//! [`ChunkSource`] reads a stream incrementally and cuts it into chunks of at
//! least the nominal size. After the nominal size is reached it keeps
//! consuming whole characters until one in the safe-cut class (whitespace,
//! separator or punctuation) has been taken, so no chunk ever ends inside a
//! multi-byte character or inside a word. Apostrophes never qualify as a
//! cut: they occur inside elided words like `isn't`.

use crate::{
    category::CategoryTag,
    classifier::count_words,
    counts::PartialCounts,
    decode::decode,
    error::{CoreError, Result},
};
use std::fmt;
use std::io::{self, Read};
use std::iter::FusedIterator;

/// Bytes requested from the reader per refill
const READ_BLOCK: usize = 64 * 1024;

/// Longest UTF-8 sequence announced by a leading byte
const MAX_CHAR_WIDTH: usize = 4;

/// Index of a source in the ordered input list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceId(pub usize);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An owned span of one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Source the bytes belong to
    pub source_id: SourceId,
    /// The chunk content
    pub bytes: Vec<u8>,
}

impl Chunk {
    /// Create a chunk
    pub fn new(source_id: SourceId, bytes: Vec<u8>) -> Self {
        Self { source_id, bytes }
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-length chunk
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Run the word classifier over this chunk
    pub fn count_words(&self) -> PartialCounts {
        count_words(&self.bytes)
    }
}

/// Lazy, single-pass chunker over a byte stream
#[derive(Debug)]
pub struct ChunkSource<R> {
    reader: R,
    source_id: SourceId,
    nominal_size: usize,
    pending: Vec<u8>,
    eof: bool,
    done: bool,
}

impl<R: Read> ChunkSource<R> {
    /// Create a chunker producing chunks of roughly `nominal_size` bytes
    pub fn new(reader: R, source_id: SourceId, nominal_size: usize) -> Result<Self> {
        if nominal_size == 0 {
            return Err(CoreError::InvalidChunkSize);
        }

        Ok(Self {
            reader,
            source_id,
            nominal_size,
            pending: Vec::with_capacity(nominal_size + MAX_CHAR_WIDTH),
            eof: false,
            done: false,
        })
    }

    /// Source these chunks belong to
    pub fn source_id(&self) -> SourceId {
        self.source_id
    }

    /// Buffer at least `want` bytes unless the stream ends first
    fn fill_to(&mut self, want: usize) -> io::Result<()> {
        while self.pending.len() < want && !self.eof {
            let missing = (want - self.pending.len()).max(READ_BLOCK);
            let read = (&mut self.reader)
                .take(missing as u64)
                .read_to_end(&mut self.pending)?;
            if read < missing {
                self.eof = true;
            }
        }
        Ok(())
    }

    /// Offset just past the next safe cut, or the end of the stream
    ///
    /// Characters are stepped from the start of the chunk with the same
    /// widths the classifier uses, so a malformed lead byte before the
    /// nominal size still swallows the bytes it announces.
    fn find_cut(&mut self) -> io::Result<usize> {
        self.fill_to(self.nominal_size + 1)?;
        if self.pending.len() <= self.nominal_size {
            // Last chunk
            return Ok(self.pending.len());
        }

        let mut pos = 0;
        loop {
            self.fill_to(pos + MAX_CHAR_WIDTH)?;
            let Some(decoded) = decode(&self.pending[pos..]) else {
                return Ok(self.pending.len());
            };
            pos += decoded.len;
            if pos > self.nominal_size && CategoryTag::of_decoded(decoded).is_safe_cut() {
                return Ok(pos);
            }
        }
    }
}

impl<R: Read> Iterator for ChunkSource<R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let cut = match self.find_cut() {
            Ok(cut) => cut,
            Err(source) => {
                self.done = true;
                return Some(Err(CoreError::Read {
                    source_id: self.source_id,
                    source,
                }));
            }
        };

        if cut == 0 {
            self.done = true;
            return None;
        }

        let rest = self.pending.split_off(cut);
        let bytes = std::mem::replace(&mut self.pending, rest);
        Some(Ok(Chunk::new(self.source_id, bytes)))
    }
}

impl<R: Read> FusedIterator for ChunkSource<R> {}
