//! Core traits for account registries
//!
//! This module defines the trait abstraction that allows the RwLock-based
//! registry and the sharded concurrent registry to be used interchangeably
//! by the load processor.

use crate::types::Account;
use std::sync::{Arc, Mutex};

/// Shared handle to an account owned by a registry
///
/// The registry keeps the only `Account` per customer; callers lock the handle
/// for the duration of one load so loads for a customer never interleave.
pub type AccountHandle = Arc<Mutex<Account>>;

/// Trait for the account and seen-load registry
///
/// Implementations must be safe to share between threads. Creation of an
/// account for a given customer happens exactly once; every later lookup
/// returns the same handle.
pub trait AccountRegistry: Send + Sync {
    /// Get the customer's account, creating an empty one on first reference
    fn get_or_create_account(&self, customer_id: &str) -> AccountHandle;

    /// Get the customer's account if one was created
    fn get_account(&self, customer_id: &str) -> Option<AccountHandle>;

    /// Whether `(id, customer_id)` was recorded before
    fn is_duplicate_transaction(&self, id: &str, customer_id: &str) -> bool;

    /// Mark `(id, customer_id)` as seen; recording twice has no further effect
    fn record_transaction(&self, id: &str, customer_id: &str);

    /// Number of accounts created so far
    fn account_count(&self) -> usize;
}
