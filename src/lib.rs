//! Velocity Limits Library
//! # Overview
//!
//! This library accepts or rejects "load funds" requests against per-customer
//! velocity limits, with a synchronous and an asynchronous processing strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, limits, requests, errors, events)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Load processing components:
//!   - [`core::registry`] - Account ownership and duplicate detection
//!   - [`core::processor`] - Carrying one request through registry and account
//!   - [`core::observer`] - Where decisions are reported
//! - [`io`] - JSON line reading and writing
//! - [`strategy`] - Sync and async processing pipelines
//!
//! # Limits
//!
//! Every customer may load at most:
//!
//! - **$5,000 per day**, in at most **3 loads** (UTC calendar day)
//! - **$20,000 per week** (UTC calendar week starting Monday)
//!
//! A load dated in a later day or week starts that window afresh. Replayed
//! loads (same load ID for the same customer) are ignored.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    AccountHandle, AccountRegistry, ConcurrentRegistry, LoadProcessor, LogObserver, Registry,
};
pub use io::write_response;
pub use types::{
    Account, CustomerId, DailyLimit, LimitEvent, LimitObserver, LoadRequest, LoadResponse,
    Rejection, TransactionId, VelocityError, WeeklyLimit, WindowedLimit,
};
