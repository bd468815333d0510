//! Account registry module
//!
//! This module provides the `Registry` struct which owns every customer
//! account and remembers which loads were already processed.
//!
//! The Registry is responsible for:
//! - Creating an account the first time a customer is referenced
//! - Handing out the same account handle on every later lookup
//! - Recording processed `(load id, customer id)` pairs for duplicate detection
//!
//! Lookups of existing accounts take a shared read lock and proceed in
//! parallel; creation and recording take the write lock. The locks guard the
//! maps only. Access to an account's own state goes through its handle.

use super::traits::{AccountHandle, AccountRegistry};
use crate::types::{Account, CustomerId, TransactionId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// In-memory account and seen-load registry guarded by read/write locks
#[derive(Debug, Default)]
pub struct Registry {
    /// Map of customer IDs to account handles
    accounts: RwLock<HashMap<CustomerId, AccountHandle>>,

    /// Load IDs already processed, scoped per customer
    transactions: RwLock<HashMap<CustomerId, HashSet<TransactionId>>>,
}

impl Registry {
    /// Create a new Registry with no accounts
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRegistry for Registry {
    /// Get or create the account for `customer_id`
    ///
    /// The fast path only takes the read lock. On a miss the write lock is
    /// taken and the map is checked again, so two callers racing on an unseen
    /// customer both end up with the handle created by whichever got the lock
    /// first.
    fn get_or_create_account(&self, customer_id: &str) -> AccountHandle {
        if let Some(account) = self.get_account(customer_id) {
            return account;
        }

        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            accounts
                .entry(customer_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Account::new(customer_id)))),
        )
    }

    fn get_account(&self, customer_id: &str) -> Option<AccountHandle> {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(customer_id)
            .map(Arc::clone)
    }

    fn is_duplicate_transaction(&self, id: &str, customer_id: &str) -> bool {
        self.transactions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(customer_id)
            .is_some_and(|seen| seen.contains(id))
    }

    fn record_transaction(&self, id: &str, customer_id: &str) {
        self.transactions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(customer_id.to_string())
            .or_default()
            .insert(id.to_string());
    }

    fn account_count(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
