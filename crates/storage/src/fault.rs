//! Fault injection for substrate consumers
//!
//! `FaultySubstrate` wraps any [`Substrate`] and fails selected calls with
//! [`StorageError::Unavailable`]. Hosts and record-store tests use it to
//! drive error paths that a healthy store never takes.

use agentledger_core::{KvPair, ScanCursor, StorageError, Substrate};
use parking_lot::Mutex;
use std::collections::HashSet;

#[derive(Debug, Default)]
struct Faults {
    get_keys: HashSet<String>,
    put_keys: HashSet<String>,
    delete_keys: HashSet<String>,
    puts_before_failure: Option<usize>,
    scan_open: bool,
    scan_step_after: Option<usize>,
}

/// Substrate wrapper that fails on demand
///
/// # Example
///
/// ```
/// use agentledger_core::Substrate;
/// use agentledger_storage::{FaultySubstrate, MemoryStore};
///
/// let faulty = FaultySubstrate::new(MemoryStore::new());
/// faulty.fail_put("agent1");
///
/// assert!(faulty.put("agent1", b"{}").is_err());
/// assert!(faulty.put("agent2", b"{}").is_ok());
/// ```
#[derive(Debug)]
pub struct FaultySubstrate<S> {
    inner: S,
    faults: Mutex<Faults>,
}

impl<S: Substrate> FaultySubstrate<S> {
    /// Wrap a substrate with no faults armed
    pub fn new(inner: S) -> Self {
        FaultySubstrate {
            inner,
            faults: Mutex::new(Faults::default()),
        }
    }

    /// The wrapped substrate
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Fail every `get` of `key`
    pub fn fail_get(&self, key: &str) {
        self.faults.lock().get_keys.insert(key.to_string());
    }

    /// Fail every `put` of `key`
    pub fn fail_put(&self, key: &str) {
        self.faults.lock().put_keys.insert(key.to_string());
    }

    /// Let `count` more puts through, then fail every later put
    pub fn fail_puts_after(&self, count: usize) {
        self.faults.lock().puts_before_failure = Some(count);
    }

    /// Fail every `delete` of `key`
    pub fn fail_delete(&self, key: &str) {
        self.faults.lock().delete_keys.insert(key.to_string());
    }

    /// Fail every `scan_range` call before a cursor is opened
    pub fn fail_scan_open(&self) {
        self.faults.lock().scan_open = true;
    }

    /// Open cursors normally but fail the step after `count` entries
    pub fn fail_scan_step_after(&self, count: usize) {
        self.faults.lock().scan_step_after = Some(count);
    }

    /// Disarm every fault
    pub fn heal(&self) {
        *self.faults.lock() = Faults::default();
    }

    fn injected(op: &str, key: &str) -> StorageError {
        StorageError::Unavailable(format!("injected {op} failure for {key:?}"))
    }
}

impl<S: Substrate> Substrate for FaultySubstrate<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if self.faults.lock().get_keys.contains(key) {
            return Err(Self::injected("get", key));
        }
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        {
            let mut faults = self.faults.lock();
            if faults.put_keys.contains(key) {
                return Err(Self::injected("put", key));
            }
            if let Some(remaining) = faults.puts_before_failure.as_mut() {
                if *remaining == 0 {
                    return Err(Self::injected("put", key));
                }
                *remaining -= 1;
            }
        }
        self.inner.put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        if self.faults.lock().delete_keys.contains(key) {
            return Err(Self::injected("delete", key));
        }
        self.inner.delete(key)
    }

    fn scan_range<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn ScanCursor + 'a>, StorageError> {
        let (scan_open, step_after) = {
            let faults = self.faults.lock();
            (faults.scan_open, faults.scan_step_after)
        };
        if scan_open {
            return Err(Self::injected("scan", start));
        }

        let cursor = self.inner.scan_range(start, end)?;
        match step_after {
            Some(limit) => Ok(Box::new(FailingCursor {
                inner: cursor,
                left: limit,
            })),
            None => Ok(cursor),
        }
    }
}

/// Cursor that yields `left` entries and then one error
struct FailingCursor<'a> {
    inner: Box<dyn ScanCursor + 'a>,
    left: usize,
}

impl Iterator for FailingCursor<'_> {
    type Item = Result<KvPair, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.left == 0 {
            return Some(Err(StorageError::Unavailable(
                "injected scan step failure".into(),
            )));
        }
        self.left -= 1;
        self.inner.next()
    }
}
