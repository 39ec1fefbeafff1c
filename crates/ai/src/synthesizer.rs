//! AI quote synthesizer.
//!
//! Builds a structured prompt from the estimate input, invokes the Anthropic
//! provider through rig-core, and parses the JSON response into a complete
//! `QuoteData` under a strict contract: either every required field is
//! present and well-typed, or the whole operation fails. The decision to use
//! this synthesizer at all (vs the mock) is made one level up, from
//! configuration.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Client as HttpClient;
use rig::{client::CompletionClient, completion::Prompt, providers::anthropic};
use serde::Deserialize;

use quotesmith_core::errors::Result;
use quotesmith_core::estimates::{
    Confidence, CostRange, EstimateInput, ItemCategory, LineItem, QuoteData,
    QuoteSynthesizerTrait, QuoteTotals, Timeline,
};

use crate::error::AiError;
use crate::prompt::{system_prompt, user_prompt};

/// Configuration for the AI synthesizer.
#[derive(Debug, Clone)]
pub struct AiSynthesizerConfig {
    pub model_id: String,
    pub max_tokens: u64,
    /// Low temperature: structured output, not creative text.
    pub temperature: f64,
    /// Finite bound on the external call.
    pub timeout_ms: u64,
    pub currency: String,
    pub currency_name: String,
}

impl Default for AiSynthesizerConfig {
    fn default() -> Self {
        Self {
            model_id: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 2048,
            temperature: 0.2,
            timeout_ms: 30_000,
            currency: "INR".to_string(),
            currency_name: "Indian Rupees (INR)".to_string(),
        }
    }
}

/// Quote synthesizer backed by an external text-generation provider.
pub struct AiSynthesizer {
    api_key: String,
    config: AiSynthesizerConfig,
}

impl AiSynthesizer {
    pub fn new(api_key: impl Into<String>, config: AiSynthesizerConfig) -> Self {
        Self {
            api_key: api_key.into(),
            config,
        }
    }

    async fn complete(&self, input: &EstimateInput) -> std::result::Result<String, AiError> {
        if self.api_key.is_empty() {
            return Err(AiError::MissingApiKey("anthropic".to_string()));
        }

        let system = system_prompt(&self.config.currency, &self.config.currency_name);
        let user = user_prompt(input);
        debug!("Requesting synthesis from model {}", self.config.model_id);

        let client: anthropic::Client<HttpClient> = anthropic::Client::new(&self.api_key)
            .map_err(|e| AiError::Provider(e.to_string()))?;
        let agent = client
            .agent(&self.config.model_id)
            .preamble(&system)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build();

        let request = agent.prompt(&user);
        match tokio::time::timeout(Duration::from_millis(self.config.timeout_ms), request).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(AiError::Provider(e.to_string())),
            Err(_) => Err(AiError::Timeout(self.config.timeout_ms)),
        }
    }
}

#[async_trait]
impl QuoteSynthesizerTrait for AiSynthesizer {
    async fn synthesize(&self, input: &EstimateInput, quote_id: &str) -> Result<QuoteData> {
        let raw = self
            .complete(input)
            .await
            .map_err(quotesmith_core::Error::from)?;
        let quote = parse_quote_response(&raw, input, quote_id, Utc::now())
            .map_err(quotesmith_core::Error::from)?;
        Ok(quote)
    }
}

// ============================================================================
// Response contract
// ============================================================================

/// Untrusted external contract: every required field must be present and
/// well-typed before a quote is constructed. Missing fields, wrong types and
/// unknown enum values all fail deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesisResponse {
    total_cost_range: RangeDto,
    timeline: TimelineDto,
    confidence: Confidence,
    breakdown: BreakdownDto,
    line_items: Vec<LineItemDto>,
    assumptions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RangeDto {
    min: f64,
    max: f64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct TimelineDto {
    min: f64,
    max: f64,
    unit: String,
}

#[derive(Debug, Deserialize)]
struct BreakdownDto {
    materials: f64,
    labor: f64,
    other: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItemDto {
    category: ItemCategory,
    item: String,
    quantity: f64,
    unit: String,
    unit_cost: f64,
    #[serde(default)]
    notes: Option<String>,
}

/// Strip surrounding markdown code-fence markers, if any.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the fence line ("```" or "```json") and the closing fence.
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    body.trim().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a raw provider response into a complete, internally consistent
/// quote. Pure: all nondeterminism (the provider call, the clock) stays with
/// the caller.
pub fn parse_quote_response(
    raw: &str,
    input: &EstimateInput,
    quote_id: &str,
    now: DateTime<Utc>,
) -> std::result::Result<QuoteData, AiError> {
    let body = strip_code_fences(raw);
    let parsed: SynthesisResponse =
        serde_json::from_str(body).map_err(|e| AiError::invalid_response(e.to_string()))?;

    let line_items: Vec<LineItem> = parsed
        .line_items
        .into_iter()
        .enumerate()
        .map(|(i, row)| LineItem {
            id: format!("{}_{}", quote_id, i + 1),
            category: row.category,
            item: row.item,
            quantity: row.quantity,
            unit: row.unit,
            unit_cost: row.unit_cost,
            // Never trust a model-supplied total.
            total_cost: row.quantity * row.unit_cost,
            editable: true,
            notes: row.notes,
        })
        .collect();

    let subtotal = parsed.breakdown.materials + parsed.breakdown.labor + parsed.breakdown.other;

    Ok(QuoteData {
        id: quote_id.to_string(),
        project_info: input.clone(),
        line_items,
        totals: QuoteTotals {
            materials: parsed.breakdown.materials,
            labor: parsed.breakdown.labor,
            equipment: 0.0,
            other: parsed.breakdown.other,
            subtotal,
            total: subtotal,
        },
        total_cost_range: CostRange {
            min: parsed.total_cost_range.min,
            max: parsed.total_cost_range.max,
            currency: parsed.total_cost_range.currency,
        },
        timeline: Timeline {
            min: parsed.timeline.min,
            max: parsed.timeline.max,
            unit: parsed.timeline.unit,
        },
        confidence: parsed.confidence,
        assumptions: parsed.assumptions,
        created_at: now,
        updated_at: now,
    })
}
