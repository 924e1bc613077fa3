//! Key-value substrate contract
//!
//! The record store owns no storage. It runs against whatever the host
//! supplies through [`Substrate`]: four synchronous, blocking primitives that
//! are strongly consistent within one invocation.

use crate::error::StorageError;
use std::sync::Arc;

/// A `(key, value)` pair yielded by a range scan
pub type KvPair = (String, Vec<u8>);

/// Ordered iteration over a key range
///
/// A cursor holds host-side resources for as long as it is alive.
/// Implementations release them on drop, so every exit path of a scan
/// (exhaustion, early return, error) gives them back.
pub trait ScanCursor: Iterator<Item = Result<KvPair, StorageError>> {}

impl<T> ScanCursor for T where T: Iterator<Item = Result<KvPair, StorageError>> {}

/// Key-value substrate supplied by the execution host
///
/// Keys are strings ordered byte-wise. Values are opaque bytes.
pub trait Substrate {
    /// Point lookup. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Insert or overwrite a key.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Open a cursor over `[start, end)` in key order.
    ///
    /// An empty `start` begins at the first key and an empty `end` runs to
    /// the last, so `("", "")` covers the whole namespace.
    fn scan_range<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn ScanCursor + 'a>, StorageError>;
}

impl<T: Substrate + ?Sized> Substrate for &T {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn scan_range<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn ScanCursor + 'a>, StorageError> {
        (**self).scan_range(start, end)
    }
}

impl<T: Substrate + ?Sized> Substrate for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn scan_range<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn ScanCursor + 'a>, StorageError> {
        (**self).scan_range(start, end)
    }
}
