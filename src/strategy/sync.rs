//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It coordinates:
//! - line parsing via `SyncReader` (iterator interface)
//! - load evaluation via `LoadProcessor` over an RwLock-guarded `Registry`
//! - response output via `json_format::write_response`
//!
//! Requests are handled strictly one at a time in input order, so each
//! customer's loads are evaluated in the order they were submitted.

use crate::core::{LoadProcessor, LogObserver, Registry};
use crate::io::json_format::write_response;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{LimitObserver, VelocityError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use velocity_limits::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new();
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("input.txt"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Clone)]
pub struct SyncProcessingStrategy {
    observer: Arc<dyn LimitObserver>,
}

impl SyncProcessingStrategy {
    /// Create a strategy that logs its decisions
    pub fn new() -> Self {
        Self::with_observer(Arc::new(LogObserver))
    }

    /// Create a strategy reporting to `observer`
    pub fn with_observer(observer: Arc<dyn LimitObserver>) -> Self {
        Self { observer }
    }

    fn process_requests(
        processor: &LoadProcessor<Registry>,
        reader: SyncReader,
        output: &mut dyn Write,
    ) -> Result<(), VelocityError> {
        for result in reader {
            let request = result?;
            if let Some(response) = processor.process(&request) {
                write_response(&response, output)?;
            }
        }
        Ok(())
    }
}

impl Default for SyncProcessingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), VelocityError> {
        let processor = LoadProcessor::new(Arc::new(Registry::new()), Arc::clone(&self.observer));
        let reader = SyncReader::new(input_path)?;

        let result = Self::process_requests(&processor, reader, output);
        output.flush()?;
        result
    }
}
