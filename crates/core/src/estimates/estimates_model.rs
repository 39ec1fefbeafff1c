//! Estimate domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quality tier selected by the contractor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Basic,
    Standard,
    Premium,
}

impl QualityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLevel::Basic => "basic",
            QualityLevel::Standard => "standard",
            QualityLevel::Premium => "premium",
        }
    }

    /// Capitalized label for display ("Basic Materials" etc.).
    pub fn label(&self) -> &'static str {
        match self {
            QualityLevel::Basic => "Basic",
            QualityLevel::Standard => "Standard",
            QualityLevel::Premium => "Premium",
        }
    }
}

/// Cost category of a line item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Materials,
    Labor,
    Equipment,
    Other,
}

/// Coarse accuracy label driving the cost-range spread.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Relative spread applied around the recomputed total when the client
    /// re-derives the cost range after edits.
    pub fn spread(&self) -> f64 {
        match self {
            Confidence::High => 0.05,
            Confidence::Medium => 0.10,
            Confidence::Low => 0.20,
        }
    }
}

/// User-supplied request for an estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInput {
    pub project_type: String,
    pub area_square_feet: f64,
    pub quality_level: QualityLevel,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One priced component of a quote.
///
/// `total_cost` is derived: it always equals `quantity * unit_cost` and is
/// recomputed on every edit rather than stored as authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub category: ItemCategory,
    pub item: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub editable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LineItem {
    /// Ordinal suffix of the line-item id (`"est_x_3"` -> `"3"`).
    /// Falls back to the full id when no underscore is present.
    pub fn ordinal_suffix(&self) -> &str {
        self.id.rsplit('_').next().unwrap_or(&self.id)
    }
}

/// Aggregation over line items by category. A derived view, never an
/// independent source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub materials: f64,
    pub labor: f64,
    #[serde(default)]
    pub equipment: f64,
    pub other: f64,
    pub subtotal: f64,
    pub total: f64,
}

/// Expected cost window for the whole project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

/// Expected project duration window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

/// The persisted estimate aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    pub id: String,
    pub project_info: EstimateInput,
    pub line_items: Vec<LineItem>,
    pub totals: QuoteTotals,
    pub total_cost_range: CostRange,
    pub timeline: Timeline,
    pub confidence: Confidence,
    pub assumptions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial-field update for a persisted quote. `id`, `created_at` and
/// `updated_at` are never client-controlled.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_info: Option<EstimateInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<QuoteTotals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost_range: Option<CostRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<Vec<String>>,
}
