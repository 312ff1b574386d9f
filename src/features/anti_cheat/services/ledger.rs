//! Action ledger storage.
//!
//! The guard only talks to the [`ActionLedger`] trait so the in-memory map can
//! later be swapped for a shared store in multi-instance deployments.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::features::anti_cheat::models::{ActionRecord, LedgerKey};

/// Exclusive access to one ledger record; the per-key lock is released on drop
pub type RecordGuard = OwnedMutexGuard<ActionRecord>;

#[async_trait]
pub trait ActionLedger: Send + Sync {
    /// Lock the record for `key`, creating an empty one on first use
    async fn acquire(&self, key: &LedgerKey) -> RecordGuard;

    /// Copy of the current record, if one exists
    async fn snapshot(&self, key: &LedgerKey) -> Option<ActionRecord>;

    /// Forget every record of a user. Returns the number of records removed
    async fn remove_user(&self, user_id: &str) -> usize;

    /// Drop records whose latest call is at or before `idle_before`.
    /// Records currently locked by a check are skipped
    async fn evict_idle(&self, idle_before: DateTime<Utc>) -> usize;

    /// Number of (user, action) records currently held
    fn tracked_records(&self) -> usize;
}

/// Process-local ledger: one `tokio::sync::Mutex` per key inside a `DashMap`.
///
/// The map shard lock is only held while looking up or inserting the cell,
/// never across an `.await`.
#[derive(Default)]
pub struct InMemoryActionLedger {
    records: DashMap<LedgerKey, Arc<Mutex<ActionRecord>>>,
}

impl InMemoryActionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: &LedgerKey) -> Arc<Mutex<ActionRecord>> {
        self.records
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(ActionRecord::new(key.clone()))))
            .value()
            .clone()
    }
}

#[async_trait]
impl ActionLedger for InMemoryActionLedger {
    async fn acquire(&self, key: &LedgerKey) -> RecordGuard {
        loop {
            let record = self.cell(key).lock_owned().await;
            // a retired record was removed from the map after we cloned its cell
            if !record.is_retired() {
                return record;
            }
        }
    }

    async fn snapshot(&self, key: &LedgerKey) -> Option<ActionRecord> {
        let cell = self.records.get(key).map(|entry| entry.value().clone())?;
        let record = cell.lock().await;
        (!record.is_retired()).then(|| record.clone())
    }

    async fn remove_user(&self, user_id: &str) -> usize {
        let keys: Vec<LedgerKey> = self
            .records
            .iter()
            .filter(|entry| entry.key().user_id == user_id)
            .map(|entry| entry.key().clone())
            .collect();

        let mut removed = 0;
        for key in keys {
            if let Some((_, cell)) = self.records.remove(&key) {
                cell.lock().await.retire();
                removed += 1;
            }
        }
        removed
    }

    async fn evict_idle(&self, idle_before: DateTime<Utc>) -> usize {
        let before = self.records.len();

        self.records.retain(|_, cell| match cell.try_lock() {
            Ok(mut record) => {
                let idle = record.latest().map_or(true, |latest| latest <= idle_before);
                if idle {
                    record.retire();
                }
                !idle
            }
            Err(_) => true,
        });

        before.saturating_sub(self.records.len())
    }

    fn tracked_records(&self) -> usize {
        self.records.len()
    }
}
