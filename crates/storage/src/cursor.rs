//! Range scan cursors
//!
//! A cursor iterates a snapshot of the range cloned when it was opened, so
//! later writes never disturb an open scan. Each cursor holds a slot in the
//! owning store's open-cursor count and gives it back on drop.

use agentledger_core::{KvPair, StorageError};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared count of cursors that have not been dropped yet
#[derive(Debug, Default, Clone)]
pub(crate) struct CursorTracker {
    open: Arc<AtomicUsize>,
}

impl CursorTracker {
    pub(crate) fn open_count(&self) -> usize {
        self.open.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Arc<AtomicUsize> {
        self.open.fetch_add(1, Ordering::AcqRel);
        Arc::clone(&self.open)
    }
}

/// Ordered cursor over a snapshot of `(key, value)` pairs
#[derive(Debug)]
pub struct Cursor {
    entries: std::vec::IntoIter<KvPair>,
    open: Arc<AtomicUsize>,
}

impl Cursor {
    pub(crate) fn new(entries: Vec<KvPair>, tracker: &CursorTracker) -> Self {
        Cursor {
            entries: entries.into_iter(),
            open: tracker.acquire(),
        }
    }

    /// Entries not yet yielded
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }
}

impl Iterator for Cursor {
    type Item = Result<KvPair, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(Ok)
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Bounds for `[start, end)` where an empty string leaves that side open
pub(crate) fn range_bounds<'a>(start: &'a str, end: &'a str) -> Option<(Bound<&'a str>, Bound<&'a str>)> {
    if !start.is_empty() && !end.is_empty() && start > end {
        return None;
    }

    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start)
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end)
    };
    Some((lower, upper))
}

/// Clone the entries of `map` that fall in `[start, end)`
pub(crate) fn collect_range(map: &BTreeMap<String, Vec<u8>>, start: &str, end: &str) -> Vec<KvPair> {
    match range_bounds(start, end) {
        Some(bounds) => map
            .range::<str, _>(bounds)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        None => Vec::new(),
    }
}
