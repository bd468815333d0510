//! Asynchronous implementations of core components
//!
//! This module provides the thread-safe pieces used by the async batch
//! strategy:
//!
//! - **ConcurrentRegistry**: account and seen-load registry sharded with DashMap
//! - **BatchProcessor**: partitions batches by customer and processes each
//!   customer on its own tokio task
//!
//! # Thread Safety
//!
//! - Loads for different customers proceed in parallel
//! - Loads for the same customer run sequentially on one task, in input order
//! - Each account is additionally guarded by its own mutex

pub mod batch_processor;
pub mod registry;

pub use batch_processor::BatchProcessor;
pub use registry::ConcurrentRegistry;
