//! In-memory quote store.
//!
//! Default persistence when no database path is configured. Map operations
//! are effectively atomic per key, which satisfies the single-writer-per-key
//! discipline required under concurrent requests.

use async_trait::async_trait;
use dashmap::DashMap;

use super::QuoteStoreTrait;
use crate::errors::Result;
use crate::estimates::QuoteData;

#[derive(Default)]
pub struct InMemoryQuoteStore {
    quotes: DashMap<String, QuoteData>,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuoteStoreTrait for InMemoryQuoteStore {
    async fn get(&self, id: &str) -> Result<Option<QuoteData>> {
        Ok(self.quotes.get(id).map(|entry| entry.value().clone()))
    }

    async fn set(&self, quote: QuoteData) -> Result<()> {
        self.quotes.insert(quote.id.clone(), quote);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.quotes.remove(id).is_some())
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        let mut entries: Vec<_> = self
            .quotes
            .iter()
            .map(|entry| (entry.value().created_at, entry.key().clone()))
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(entries.into_iter().map(|(_, id)| id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimates::{EstimateInput, MockSynthesizer, QualityLevel};
    use chrono::Duration;

    fn quote(id: &str) -> QuoteData {
        let input = EstimateInput {
            project_type: "Painting".to_string(),
            area_square_feet: 250.0,
            quality_level: QualityLevel::Basic,
            location: "Pune".to_string(),
            notes: None,
        };
        MockSynthesizer::default().build_quote(&input, id)
    }

    #[tokio::test]
    async fn set_is_an_upsert() {
        let store = InMemoryQuoteStore::new();
        let mut q = quote("est_1_a");
        store.set(q.clone()).await.unwrap();

        q.assumptions.push("Revised".to_string());
        store.set(q.clone()).await.unwrap();

        let fetched = store.get("est_1_a").await.unwrap().unwrap();
        assert_eq!(fetched, q);
        assert_eq!(store.list_ids().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_record_is_none_not_an_error() {
        let store = InMemoryQuoteStore::new();
        assert!(store.get("est_0_missing").await.unwrap().is_none());
        assert!(!store.delete("est_0_missing").await.unwrap());
    }

    #[tokio::test]
    async fn list_is_ordered_newest_first() {
        let store = InMemoryQuoteStore::new();
        let older = quote("est_1_old");
        let mut newer = quote("est_2_new");
        newer.created_at = older.created_at + Duration::seconds(5);
        store.set(older).await.unwrap();
        store.set(newer).await.unwrap();

        assert_eq!(store.list_ids().await.unwrap(), vec!["est_2_new", "est_1_old"]);
    }
}
