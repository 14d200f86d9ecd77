//! Per-source result aggregation
//!
//! The aggregator only adds numbers. Knowing when a tally is complete is the
//! driver's job: it compares [`FileTally::chunks_merged`] with the number of
//! chunks it issued for that source.

use crate::error::{EngineError, Result};
use std::collections::BTreeMap;
use std::sync::Mutex;
use wordtally_core::{PartialCounts, SourceId};

/// Aggregated counts for one source
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileTally {
    /// Source index
    pub source_id: SourceId,
    /// Display name of the source
    pub name: String,
    /// Merged counts
    pub counts: PartialCounts,
    /// Number of partial results merged so far
    pub chunks_merged: usize,
}

/// Thread-safe accumulator of partial counts
#[derive(Debug, Default)]
pub struct ResultAggregator {
    tallies: Mutex<BTreeMap<SourceId, FileTally>>,
}

impl ResultAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zeroed tally; must happen before any merge for `source_id`
    pub fn register(&self, source_id: SourceId, name: impl Into<String>) -> Result<()> {
        let mut tallies = self.tallies.lock()?;
        if tallies.contains_key(&source_id) {
            return Err(EngineError::Config(format!(
                "source {source_id} registered twice"
            )));
        }

        tallies.insert(
            source_id,
            FileTally {
                source_id,
                name: name.into(),
                counts: PartialCounts::default(),
                chunks_merged: 0,
            },
        );
        Ok(())
    }

    /// Add one chunk's counts to its source's tally
    pub fn merge(&self, source_id: SourceId, counts: PartialCounts) -> Result<()> {
        let mut tallies = self.tallies.lock()?;
        let tally = tallies
            .get_mut(&source_id)
            .ok_or(EngineError::UnknownSource(source_id))?;

        tally.counts += counts;
        tally.chunks_merged += 1;
        Ok(())
    }

    /// Copy of one source's tally
    pub fn snapshot(&self, source_id: SourceId) -> Result<FileTally> {
        self.tallies
            .lock()?
            .get(&source_id)
            .cloned()
            .ok_or(EngineError::UnknownSource(source_id))
    }

    /// Copies of every tally, ordered by source id
    pub fn snapshot_all(&self) -> Result<Vec<FileTally>> {
        Ok(self.tallies.lock()?.values().cloned().collect())
    }

    /// Number of registered sources
    pub fn len(&self) -> Result<usize> {
        Ok(self.tallies.lock()?.len())
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
