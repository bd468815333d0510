//! Thread-safe sharded registry for async batch processing
//!
//! This module provides the `ConcurrentRegistry` struct, which stores accounts
//! and processed loads in `DashMap`s so that workers handling different
//! customers rarely contend.
//!
//! # Design
//!
//! DashMap shards its keys across independently locked buckets. Lookups of
//! existing accounts take a shard read lock; `entry().or_insert_with()` takes
//! the shard write lock, so an unseen customer is created exactly once even
//! when several workers race on it.

use crate::core::traits::{AccountHandle, AccountRegistry};
use crate::types::{Account, CustomerId, TransactionId};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Thread-safe account and seen-load registry
#[derive(Debug, Default)]
pub struct ConcurrentRegistry {
    /// Concurrent map of customer IDs to account handles
    accounts: DashMap<CustomerId, AccountHandle>,

    /// Load IDs already processed, scoped per customer
    transactions: DashMap<CustomerId, HashSet<TransactionId>>,
}

impl ConcurrentRegistry {
    /// Create a new empty ConcurrentRegistry
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRegistry for ConcurrentRegistry {
    fn get_or_create_account(&self, customer_id: &str) -> AccountHandle {
        if let Some(account) = self.get_account(customer_id) {
            return account;
        }

        Arc::clone(
            &self
                .accounts
                .entry(customer_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Account::new(customer_id)))),
        )
    }

    fn get_account(&self, customer_id: &str) -> Option<AccountHandle> {
        self.accounts
            .get(customer_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    fn is_duplicate_transaction(&self, id: &str, customer_id: &str) -> bool {
        self.transactions
            .get(customer_id)
            .is_some_and(|seen| seen.contains(id))
    }

    fn record_transaction(&self, id: &str, customer_id: &str) {
        self.transactions
            .entry(customer_id.to_string())
            .or_default()
            .insert(id.to_string());
    }

    fn account_count(&self) -> usize {
        self.accounts.len()
    }
}
