//! Processing strategy module for load processing
//!
//! This module defines the Strategy pattern for complete load processing
//! pipelines, covering reading requests, evaluating them against the velocity
//! limits and writing responses. Different implementations (synchronous,
//! asynchronous batch) can be selected at runtime.

use crate::cli::StrategyType;
use crate::core::LogObserver;
use crate::types::VelocityError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete load processing pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Process load requests from input file and write responses to output
    ///
    /// One response line is written per evaluated request, in input order.
    /// Duplicate requests produce no line.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - A line cannot be read or is not a valid load request
    /// - Output cannot be written
    ///
    /// Processing stops at the first error. Responses for the requests before
    /// it have already been written and flushed.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), VelocityError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// The returned strategy reports its decisions through [`LogObserver`].
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    let observer = Arc::new(LogObserver);
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::with_observer(observer)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config).with_observer(observer))
        }
    }
}
