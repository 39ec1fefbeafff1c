use crate::errors::Result;
use crate::estimates::estimates_model::{EstimateInput, QuoteData, QuoteUpdate};
use async_trait::async_trait;

/// Trait for turning validated estimate input into a complete quote.
///
/// Implemented by the deterministic mock synthesizer in this crate and by
/// the AI synthesizer in `quotesmith-ai`. Implementations either return a
/// fully populated, internally consistent `QuoteData` or an error; they
/// never partially commit.
#[async_trait]
pub trait QuoteSynthesizerTrait: Send + Sync {
    async fn synthesize(&self, input: &EstimateInput, quote_id: &str) -> Result<QuoteData>;
}

/// Trait for estimate service operations.
#[async_trait]
pub trait EstimateServiceTrait: Send + Sync {
    /// Validate the input, synthesize a quote under a fresh id and persist it.
    async fn generate(&self, input: EstimateInput) -> Result<QuoteData>;

    /// Fetch a quote. Absence is a normal result, not an error.
    async fn get(&self, id: &str) -> Result<Option<QuoteData>>;

    /// Merge the provided fields over an existing quote and re-persist it.
    /// Fails with `Error::NotFound` when the id does not exist.
    async fn update(&self, id: &str, update: QuoteUpdate) -> Result<QuoteData>;

    /// Clone an existing quote under a new id with rewritten line-item ids
    /// and fresh timestamps. Fails with `Error::NotFound` when absent.
    async fn duplicate(&self, id: &str) -> Result<QuoteData>;

    /// Remove a quote. Returns whether a record existed.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// List persisted quote ids, newest first.
    async fn list_ids(&self) -> Result<Vec<String>>;
}
