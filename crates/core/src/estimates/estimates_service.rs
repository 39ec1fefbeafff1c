//! Estimate service: validation, synthesis dispatch, persistence.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::constants::{
    MAX_AREA_SQUARE_FEET, MAX_NOTES_LEN, MIN_LOCATION_LEN, QUOTE_ID_PREFIX, QUOTE_ID_SUFFIX_LEN,
};
use crate::errors::{Error, Result, ValidationError};
use crate::estimates::estimates_model::{EstimateInput, QuoteData, QuoteUpdate};
use crate::estimates::estimates_traits::{EstimateServiceTrait, QuoteSynthesizerTrait};
use crate::store::QuoteStoreTrait;

/// Validate user-supplied estimate input against the stated constraints.
///
/// Collects every violation so the caller sees the full list at once.
/// Truncates over-long notes in place instead of rejecting them.
pub fn validate_input(input: &mut EstimateInput) -> std::result::Result<(), ValidationError> {
    let mut violations: Vec<String> = Vec::new();

    if input.project_type.trim().is_empty() {
        violations.push("projectType must not be empty".to_string());
    }
    if input.area_square_feet <= 0.0 || input.area_square_feet.is_nan() {
        violations.push("areaSquareFeet must be greater than 0".to_string());
    } else if input.area_square_feet > MAX_AREA_SQUARE_FEET {
        violations.push(format!(
            "areaSquareFeet must not exceed {}",
            MAX_AREA_SQUARE_FEET
        ));
    }
    if input.location.chars().count() < MIN_LOCATION_LEN {
        violations.push(format!(
            "location must be at least {} characters",
            MIN_LOCATION_LEN
        ));
    }

    if let Some(notes) = input.notes.as_mut() {
        if notes.chars().count() > MAX_NOTES_LEN {
            *notes = notes.chars().take(MAX_NOTES_LEN).collect();
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidInput(violations.join("; ")))
    }
}

/// Generate a fresh opaque quote id: monotonic millis plus a random suffix,
/// unique across concurrently generated quotes.
pub fn generate_quote_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(QUOTE_ID_SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!(
        "{}_{}_{}",
        QUOTE_ID_PREFIX,
        Utc::now().timestamp_millis(),
        suffix
    )
}

/// Estimate service over an injected store and synthesizer.
///
/// The synthesizer variant (mock vs AI) is selected once at process start
/// from configuration; the service itself is indifferent to which.
pub struct EstimateService {
    store: Arc<dyn QuoteStoreTrait>,
    synthesizer: Arc<dyn QuoteSynthesizerTrait>,
}

impl EstimateService {
    pub fn new(
        store: Arc<dyn QuoteStoreTrait>,
        synthesizer: Arc<dyn QuoteSynthesizerTrait>,
    ) -> Self {
        Self { store, synthesizer }
    }
}

#[async_trait]
impl EstimateServiceTrait for EstimateService {
    async fn generate(&self, mut input: EstimateInput) -> Result<QuoteData> {
        // Fail fast: nothing is synthesized or persisted on invalid input.
        validate_input(&mut input)?;

        let quote_id = generate_quote_id();
        debug!("Generating estimate {}", quote_id);

        let quote = self.synthesizer.synthesize(&input, &quote_id).await?;
        self.store.set(quote.clone()).await?;
        Ok(quote)
    }

    async fn get(&self, id: &str) -> Result<Option<QuoteData>> {
        self.store.get(id).await
    }

    async fn update(&self, id: &str, update: QuoteUpdate) -> Result<QuoteData> {
        let Some(mut existing) = self.store.get(id).await? else {
            return Err(Error::NotFound(id.to_string()));
        };

        if let Some(mut project_info) = update.project_info {
            validate_input(&mut project_info)?;
            existing.project_info = project_info;
        }
        if let Some(line_items) = update.line_items {
            existing.line_items = line_items;
        }
        if let Some(totals) = update.totals {
            existing.totals = totals;
        }
        if let Some(range) = update.total_cost_range {
            existing.total_cost_range = range;
        }
        if let Some(timeline) = update.timeline {
            existing.timeline = timeline;
        }
        if let Some(confidence) = update.confidence {
            existing.confidence = confidence;
        }
        if let Some(assumptions) = update.assumptions {
            existing.assumptions = assumptions;
        }
        existing.updated_at = Utc::now();

        self.store.set(existing.clone()).await?;
        Ok(existing)
    }

    async fn duplicate(&self, id: &str) -> Result<QuoteData> {
        let Some(existing) = self.store.get(id).await? else {
            return Err(Error::NotFound(id.to_string()));
        };

        let new_id = generate_quote_id();
        let now = Utc::now();
        let mut cloned = existing;
        cloned.line_items = cloned
            .line_items
            .into_iter()
            .map(|mut item| {
                item.id = format!("{}_{}", new_id, item.ordinal_suffix());
                item
            })
            .collect();
        cloned.id = new_id;
        cloned.created_at = now;
        cloned.updated_at = now;

        self.store.set(cloned.clone()).await?;
        Ok(cloned)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.store.delete(id).await?;
        if !removed {
            warn!("Delete requested for unknown estimate {}", id);
        }
        Ok(removed)
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        self.store.list_ids().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimates::estimates_model::QualityLevel;
    use crate::estimates::mock_synthesizer::MockSynthesizer;
    use crate::store::memory::InMemoryQuoteStore;

    fn service_with_store() -> (EstimateService, Arc<InMemoryQuoteStore>) {
        let store = Arc::new(InMemoryQuoteStore::new());
        let service = EstimateService::new(store.clone(), Arc::new(MockSynthesizer::default()));
        (service, store)
    }

    fn valid_input() -> EstimateInput {
        EstimateInput {
            project_type: "Flooring".to_string(),
            area_square_feet: 800.0,
            quality_level: QualityLevel::Standard,
            location: "Bengaluru".to_string(),
            notes: None,
        }
    }

    #[test]
    fn validation_lists_every_violation() {
        let mut input = EstimateInput {
            project_type: "  ".to_string(),
            area_square_feet: -2.0,
            quality_level: QualityLevel::Basic,
            location: "Pu".to_string(),
            notes: None,
        };
        let err = validate_input(&mut input).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("projectType"));
        assert!(message.contains("areaSquareFeet"));
        assert!(message.contains("location"));
    }

    #[test]
    fn validation_rejects_oversized_area() {
        let mut input = valid_input();
        input.area_square_feet = 100_001.0;
        assert!(validate_input(&mut input).is_err());
    }

    #[test]
    fn validation_truncates_long_notes() {
        let mut input = valid_input();
        input.notes = Some("x".repeat(900));
        validate_input(&mut input).unwrap();
        assert_eq!(input.notes.unwrap().chars().count(), 500);
    }

    #[test]
    fn quote_ids_are_unique_and_prefixed() {
        let a = generate_quote_id();
        let b = generate_quote_id();
        assert!(a.starts_with("est_"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn generate_then_get_round_trips() {
        let (service, _) = service_with_store();
        let quote = service.generate(valid_input()).await.unwrap();
        let fetched = service.get(&quote.id).await.unwrap().unwrap();
        assert_eq!(fetched, quote);

        // Get is idempotent without an intervening update.
        let again = service.get(&quote.id).await.unwrap().unwrap();
        assert_eq!(again, fetched);
    }

    #[tokio::test]
    async fn generate_rejects_invalid_input_without_persisting() {
        let (service, store) = service_with_store();
        let mut input = valid_input();
        input.area_square_feet = 0.0;
        let err = service.generate(input).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(store.list_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_fields_and_refreshes_updated_at() {
        let (service, _) = service_with_store();
        let quote = service.generate(valid_input()).await.unwrap();

        let update = QuoteUpdate {
            assumptions: Some(vec!["Negotiated discount applied".to_string()]),
            ..Default::default()
        };
        let merged = service.update(&quote.id, update).await.unwrap();

        assert_eq!(merged.id, quote.id);
        assert_eq!(merged.assumptions, vec!["Negotiated discount applied"]);
        assert_eq!(merged.line_items, quote.line_items);
        assert!(merged.updated_at >= quote.updated_at);
        assert_eq!(merged.created_at, quote.created_at);
    }

    #[tokio::test]
    async fn update_revalidates_replacement_project_info() {
        let (service, _) = service_with_store();
        let quote = service.generate(valid_input()).await.unwrap();

        let mut bad_info = valid_input();
        bad_info.area_square_feet = -5.0;
        let err = service
            .update(
                &quote.id,
                QuoteUpdate {
                    project_info: Some(bad_info),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        // The stored record is untouched.
        let stored = service.get(&quote.id).await.unwrap().unwrap();
        assert_eq!(stored.project_info, quote.project_info);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_store_unmodified() {
        let (service, store) = service_with_store();
        let err = service
            .update("est_0_missing", QuoteUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(store.list_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_rewrites_line_item_ids_under_new_quote_id() {
        let (service, _) = service_with_store();
        let quote = service.generate(valid_input()).await.unwrap();
        let clone = service.duplicate(&quote.id).await.unwrap();

        assert_ne!(clone.id, quote.id);
        assert_eq!(clone.created_at, clone.updated_at);
        assert_eq!(clone.project_info, quote.project_info);
        assert_eq!(clone.totals, quote.totals);
        assert_eq!(clone.line_items.len(), quote.line_items.len());
        for (original, cloned) in quote.line_items.iter().zip(&clone.line_items) {
            assert_eq!(
                cloned.id,
                format!("{}_{}", clone.id, original.ordinal_suffix())
            );
            assert_eq!(cloned.total_cost, original.total_cost);
        }
    }

    #[tokio::test]
    async fn duplicate_unknown_id_is_not_found() {
        let (service, _) = service_with_store();
        let err = service.duplicate("est_0_missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_existed() {
        let (service, _) = service_with_store();
        let quote = service.generate(valid_input()).await.unwrap();
        assert!(service.delete(&quote.id).await.unwrap());
        assert!(!service.delete(&quote.id).await.unwrap());
        assert!(service.get(&quote.id).await.unwrap().is_none());
    }
}
