//! Quote persistence contract and the in-memory fallback store.

pub mod memory;

use crate::errors::Result;
use crate::estimates::QuoteData;
use async_trait::async_trait;

pub use memory::InMemoryQuoteStore;

/// Key-value persistence for quotes, keyed by id.
///
/// Backed by either the in-process map in this module or the SQLite table in
/// `quotesmith-storage-sqlite`; callers are indifferent to which. The backing
/// is chosen once at process start from configuration, never by runtime
/// fallback. `set` is an upsert; no transactional guarantees beyond
/// single-record atomicity.
#[async_trait]
pub trait QuoteStoreTrait: Send + Sync {
    /// Fetch a quote by id. Absence is a normal result, not a failure.
    async fn get(&self, id: &str) -> Result<Option<QuoteData>>;

    /// Insert or replace a quote under its id.
    async fn set(&self, quote: QuoteData) -> Result<()>;

    /// Remove a quote. Returns whether a record existed.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// All persisted ids, ordered by creation time descending.
    async fn list_ids(&self) -> Result<Vec<String>>;
}
