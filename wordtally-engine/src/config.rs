//! Configuration types for the engine

use crate::{
    error::{EngineError, Result},
    ExecutionMode,
};

/// Default configuration constants
pub mod defaults {
    /// Nominal chunk size in bytes
    pub const CHUNK_SIZE: usize = 4000;

    /// Slots in the thread-pool work queue
    pub const QUEUE_CAPACITY: usize = 10;
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Execution mode selector
    pub mode: ExecutionMode,
    /// Nominal chunk size in bytes
    pub chunk_size: usize,
    /// Number of workers
    pub workers: usize,
    /// Capacity of the bounded queue (thread-pool mode only)
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::ThreadPool,
            chunk_size: defaults::CHUNK_SIZE,
            workers: num_cpus::get(),
            queue_capacity: defaults::QUEUE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Create a configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(EngineError::Config(
                "chunk_size must be greater than 0".into(),
            ));
        }

        if self.workers == 0 {
            return Err(EngineError::Config(
                "at least one worker is required".into(),
            ));
        }

        if self.queue_capacity == 0 {
            return Err(EngineError::Config(
                "queue_capacity must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for [`EngineConfig`]
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    mode: Option<ExecutionMode>,
    chunk_size: Option<usize>,
    workers: Option<usize>,
    queue_capacity: Option<usize>,
}

impl EngineConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution mode
    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the nominal chunk size in bytes
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Set the number of workers (None = one per CPU)
    pub fn workers(mut self, count: Option<usize>) -> Self {
        self.workers = count;
        self
    }

    /// Set the bounded queue capacity
    pub fn queue_capacity(mut self, slots: usize) -> Self {
        self.queue_capacity = Some(slots);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<EngineConfig> {
        let mut config = EngineConfig::default();

        if let Some(mode) = self.mode {
            config.mode = mode;
        }

        if let Some(size) = self.chunk_size {
            config.chunk_size = size;
        }

        if let Some(workers) = self.workers {
            config.workers = workers;
        }

        if let Some(slots) = self.queue_capacity {
            config.queue_capacity = slots;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.mode, ExecutionMode::ThreadPool);
        assert_eq!(config.chunk_size, 4000);
        assert_eq!(config.queue_capacity, 10);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::builder()
            .mode(ExecutionMode::Distributed)
            .chunk_size(128)
            .workers(Some(3))
            .queue_capacity(2)
            .build()
            .unwrap();

        assert_eq!(config.mode, ExecutionMode::Distributed);
        assert_eq!(config.chunk_size, 128);
        assert_eq!(config.workers, 3);
        assert_eq!(config.queue_capacity, 2);
    }

    #[test]
    fn test_builder_rejects_zeroes() {
        assert!(EngineConfig::builder().chunk_size(0).build().is_err());
        assert!(EngineConfig::builder().workers(Some(0)).build().is_err());
        assert!(EngineConfig::builder().queue_capacity(0).build().is_err());
    }
}
