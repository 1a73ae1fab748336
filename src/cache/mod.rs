//! Label cache keyed by image content hash
//!
//! A [`CacheStore`] maps a [`ContentHash`] to the labels computed for that
//! content. Entries are written once, after a confirmed miss, and are never
//! updated or deleted by this service. Concurrent writers of the same key
//! write equivalent data, so the first write wins and later writes are no-ops.
//!
//! Absence is a normal outcome (`Ok(None)`); backend failures surface as
//! [`StoreError`](crate::errors::StoreError) and are never folded into a miss.

use async_trait::async_trait;

use crate::errors::StoreResult;
use crate::models::{CacheEntry, ContentHash, Label};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryCacheStore;
pub use sqlite::SqliteCacheStore;

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up the entry stored for `key`
    ///
    /// * `Ok(Some(entry))` - cache hit
    /// * `Ok(None)` - cache miss
    /// * `Err(StoreError)` - the store could not answer
    async fn get(&self, key: &ContentHash) -> StoreResult<Option<CacheEntry>>;

    /// Store `labels` for `key`, stamped with the current time
    ///
    /// Label order is preserved. Writing a key that already exists leaves the
    /// existing entry in place.
    async fn put(&self, key: &ContentHash, labels: &[Label]) -> StoreResult<()>;

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}
