//! In-memory ordered key-value store
//!
//! # Design
//!
//! - BTreeMap: keys stay in byte-wise order, so range scans need no sort
//! - RwLock: concurrent readers, one writer at a time
//! - AtomicU64 version: bumped once per applied write batch
//!
//! Direct `Substrate` calls on a `MemoryStore` auto-commit. Grouped writes
//! go through [`MemoryStore::begin`].

use crate::cursor::{collect_range, Cursor, CursorTracker};
use crate::transaction::Transaction;
use agentledger_core::{ScanCursor, StorageError, Substrate};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// A buffered write: `Some` puts the bytes, `None` deletes the key
pub(crate) type WriteSet = BTreeMap<String, Option<Vec<u8>>>;

/// BTreeMap-backed store
///
/// # Example
///
/// ```
/// use agentledger_core::Substrate;
/// use agentledger_storage::MemoryStore;
///
/// let store = MemoryStore::new();
/// store.put("agent1", b"{}").unwrap();
/// assert_eq!(store.get("agent1").unwrap(), Some(b"{}".to_vec()));
/// assert_eq!(store.version(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    version: AtomicU64,
    cursors: CursorTracker,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Current version
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Number of scan cursors opened on this store and not yet dropped
    ///
    /// Includes cursors opened through transactions.
    pub fn open_cursors(&self) -> usize {
        self.cursors.open_count()
    }

    /// Start a unit of work against this store
    pub fn begin(&self) -> Transaction<'_> {
        Transaction::new(self)
    }

    /// Copy of every committed key in order
    pub fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    pub(crate) fn cursors(&self) -> &CursorTracker {
        &self.cursors
    }

    /// Committed value for `key`, bypassing any transaction
    pub(crate) fn committed(&self, key: &str) -> Option<Vec<u8>> {
        self.data.read().get(key).cloned()
    }

    /// Committed entries in `[start, end)`
    pub(crate) fn committed_range(&self, start: &str, end: &str) -> Vec<(String, Vec<u8>)> {
        collect_range(&self.data.read(), start, end)
    }

    /// Apply a write set under one write lock and return the new version
    ///
    /// An empty write set leaves the version unchanged.
    pub(crate) fn apply(&self, writes: WriteSet) -> u64 {
        if writes.is_empty() {
            return self.version();
        }

        let mut data = self.data.write();
        for (key, value) in writes {
            match value {
                Some(bytes) => {
                    data.insert(key, bytes);
                }
                None => {
                    data.remove(&key);
                }
            }
        }
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl Substrate for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.committed(key))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut writes = WriteSet::new();
        writes.insert(key.to_string(), Some(value.to_vec()));
        self.apply(writes);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut writes = WriteSet::new();
        writes.insert(key.to_string(), None);
        self.apply(writes);
        Ok(())
    }

    fn scan_range<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn ScanCursor + 'a>, StorageError> {
        let entries = self.committed_range(start, end);
        Ok(Box::new(Cursor::new(entries, &self.cursors)))
    }
}
