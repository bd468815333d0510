//! Core business logic module
//!
//! This module contains the load processing components:
//! - `traits` - The registry abstraction shared by both registries
//! - `registry` - RwLock-guarded account and seen-load registry
//! - `processor` - Duplicate check, account fetch, load evaluation and recording for one request
//! - `observer` - Log, no-op and recording observers
//! - `async` - Concurrent registry and customer-partitioned batch processing

pub mod r#async;
pub mod observer;
pub mod processor;
pub mod registry;
pub mod traits;

pub use observer::{LogObserver, NoopObserver, RecordingObserver};
pub use processor::LoadProcessor;
pub use r#async::{BatchProcessor, ConcurrentRegistry};
pub use registry::Registry;
pub use traits::{AccountHandle, AccountRegistry};
