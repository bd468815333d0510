//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: the customer account and its load funds decision
//! - `limits`: daily and weekly velocity limits and their windows
//! - `request`: load requests, responses and identifiers
//! - `event`: decisions reported to observers
//! - `error`: error and rejection types

pub mod account;
pub mod error;
pub mod event;
pub mod limits;
pub mod request;

pub use account::Account;
pub use error::{Rejection, VelocityError};
pub use event::{LimitEvent, LimitObserver};
pub use limits::{DailyLimit, WeeklyLimit, WindowedLimit};
pub use request::{CustomerId, LoadRequest, LoadResponse, TransactionId};
