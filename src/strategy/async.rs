//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. It processes load requests in batches using
//! thread-based parallelism with customer-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch line reading)
//!     └── BatchProcessor (customer partitioning + tokio tasks)
//!         └── LoadProcessor
//!             └── ConcurrentRegistry (DashMap-sharded accounts and seen loads)
//! ```
//!
//! # Thread-Based Parallelism
//!
//! - Batches are processed one after another, so a customer whose loads span
//!   several batches still sees them in input order
//! - Within a batch, each customer's loads run on their own tokio task
//! - Responses are written back in input order, matching the sync strategy

use crate::core::{BatchProcessor, ConcurrentRegistry, LoadProcessor, LogObserver};
use crate::io::async_reader::AsyncReader;
use crate::io::json_format::write_response;
use crate::strategy::ProcessingStrategy;
use crate::types::{LimitObserver, VelocityError};
use log::warn;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how requests are batched and the number of worker threads
/// for parallel processing within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of requests per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    observer: Arc<dyn LimitObserver>,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy that logs its decisions
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            observer: Arc::new(LogObserver),
        }
    }

    /// Report decisions to `observer` instead of the log
    pub fn with_observer(mut self, observer: Arc<dyn LimitObserver>) -> Self {
        self.observer = observer;
        self
    }

    async fn process_batches(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), VelocityError> {
        let registry = Arc::new(ConcurrentRegistry::new());
        let processor = BatchProcessor::new(LoadProcessor::new(
            registry,
            Arc::clone(&self.observer),
        ));

        let file = tokio::fs::File::open(input_path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => VelocityError::file_not_found(input_path),
                _ => VelocityError::from(e),
            })?;
        let mut reader = AsyncReader::new(file);

        // Wait for each batch before reading the next one so a customer's
        // loads never run ahead of earlier ones in another batch.
        loop {
            let batch = reader.read_batch(self.config.batch_size).await?;
            if batch.is_empty() {
                break;
            }

            for response in processor.process_batch(batch).await? {
                write_response(&response, output)?;
            }
        }

        Ok(())
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), VelocityError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| VelocityError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        let result = runtime.block_on(self.process_batches(input_path, output));
        output.flush()?;
        result
    }
}
