//! Per-invocation unit of work
//!
//! A `Transaction` buffers every put and delete in a write set and applies
//! them to its [`MemoryStore`] in one step on [`commit`](Transaction::commit).
//! Dropping it without committing discards the write set.
//!
//! Reads see the transaction's own writes first, then committed data. Scans
//! merge the two in key order.

use crate::cursor::{range_bounds, Cursor};
use crate::memory::{MemoryStore, WriteSet};
use agentledger_core::{ScanCursor, StorageError, Substrate, TxId};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Buffered transaction over a [`MemoryStore`]
///
/// # Example
///
/// ```
/// use agentledger_core::Substrate;
/// use agentledger_storage::MemoryStore;
///
/// let store = MemoryStore::new();
/// let txn = store.begin();
/// txn.put("agent1", b"{}").unwrap();
///
/// // not visible outside the transaction yet
/// assert_eq!(store.get("agent1").unwrap(), None);
///
/// txn.commit();
/// assert_eq!(store.get("agent1").unwrap(), Some(b"{}".to_vec()));
/// ```
#[derive(Debug)]
pub struct Transaction<'a> {
    id: TxId,
    store: &'a MemoryStore,
    writes: Mutex<WriteSet>,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(store: &'a MemoryStore) -> Self {
        Transaction {
            id: TxId::new(),
            store,
            writes: Mutex::new(WriteSet::new()),
        }
    }

    /// Transaction id
    pub fn id(&self) -> TxId {
        self.id
    }

    /// Number of buffered puts and deletes
    pub fn pending_writes(&self) -> usize {
        self.writes.lock().len()
    }

    /// Apply the write set and return the store version it produced
    pub fn commit(self) -> u64 {
        let writes = self.writes.into_inner();
        let count = writes.len();
        let version = self.store.apply(writes);
        info!(tx_id = %self.id, writes = count, version, "transaction committed");
        version
    }

    /// Discard the write set
    pub fn rollback(self) {
        debug!(tx_id = %self.id, discarded = self.writes.lock().len(), "transaction rolled back");
    }
}

impl Substrate for Transaction<'_> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if let Some(buffered) = self.writes.lock().get(key) {
            return Ok(buffered.clone());
        }
        Ok(self.store.committed(key))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.writes
            .lock()
            .insert(key.to_string(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.writes.lock().insert(key.to_string(), None);
        Ok(())
    }

    fn scan_range<'s>(
        &'s self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn ScanCursor + 's>, StorageError> {
        let mut merged: BTreeMap<String, Vec<u8>> =
            self.store.committed_range(start, end).into_iter().collect();

        if let Some(bounds) = range_bounds(start, end) {
            let writes = self.writes.lock();
            for (key, value) in writes.range::<str, _>(bounds) {
                match value {
                    Some(bytes) => {
                        merged.insert(key.clone(), bytes.clone());
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            }
        }

        Ok(Box::new(Cursor::new(
            merged.into_iter().collect(),
            self.store.cursors(),
        )))
    }
}
