//! Deterministic mock quote synthesizer.
//!
//! Used when no AI provider is configured. Pure arithmetic over the input:
//! no randomness, no I/O, and total over every input that passes validation.

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::Result;
use crate::estimates::estimates_model::{
    Confidence, CostRange, EstimateInput, ItemCategory, LineItem, QualityLevel, QuoteData,
    QuoteTotals, Timeline,
};
use crate::estimates::estimates_traits::QuoteSynthesizerTrait;

/// Pricing constants for one market. Currency and per-tier rates are
/// configuration data, not code branches, so a single synthesizer serves
/// both the INR-tuned and USD-tuned deployments.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// ISO currency code used in the cost range.
    pub currency: String,
    /// Human-readable currency name for the assumptions list.
    pub currency_name: String,
    /// Base rate per square foot at `basic` quality.
    pub basic_rate: f64,
    /// Base rate per square foot at `standard` quality.
    pub standard_rate: f64,
    /// Base rate per square foot at `premium` quality.
    pub premium_rate: f64,
    /// Share of the base cost attributed to materials.
    pub materials_ratio: f64,
    /// Share of the base cost attributed to labor.
    pub labor_ratio: f64,
    /// Share of the base cost attributed to everything else.
    pub other_ratio: f64,
}

impl PricingConfig {
    /// Indian-market preset (rates per sq ft in INR).
    pub fn inr() -> Self {
        Self {
            currency: "INR".to_string(),
            currency_name: "Indian Rupees (INR)".to_string(),
            basic_rate: 45.0,
            standard_rate: 65.0,
            premium_rate: 85.0,
            materials_ratio: 0.55,
            labor_ratio: 0.38,
            other_ratio: 0.07,
        }
    }

    /// US-market preset (rates per sq ft in USD).
    pub fn usd() -> Self {
        Self {
            currency: "USD".to_string(),
            currency_name: "US Dollars (USD)".to_string(),
            basic_rate: 4.0,
            standard_rate: 7.0,
            premium_rate: 11.0,
            materials_ratio: 0.55,
            labor_ratio: 0.38,
            other_ratio: 0.07,
        }
    }

    /// Look up a preset by currency code, defaulting to INR.
    pub fn for_currency(code: &str) -> Self {
        if code.eq_ignore_ascii_case("usd") {
            Self::usd()
        } else {
            Self::inr()
        }
    }

    fn rate(&self, quality: QualityLevel) -> f64 {
        match quality {
            QualityLevel::Basic => self.basic_rate,
            QualityLevel::Standard => self.standard_rate,
            QualityLevel::Premium => self.premium_rate,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::inr()
    }
}

/// Deterministic quote synthesizer used when no AI provider is configured.
pub struct MockSynthesizer {
    pricing: PricingConfig,
}

impl MockSynthesizer {
    pub fn new(pricing: PricingConfig) -> Self {
        Self { pricing }
    }

    /// Build a complete quote from the input. Split out of the trait impl so
    /// callers and tests can use it without an async context.
    pub fn build_quote(&self, input: &EstimateInput, quote_id: &str) -> QuoteData {
        let now = Utc::now();
        let pricing = &self.pricing;

        let base = input.area_square_feet * pricing.rate(input.quality_level);
        let materials = (base * pricing.materials_ratio).round();
        let labor = (base * pricing.labor_ratio).round();
        let other = (base * pricing.other_ratio).round();
        let total = materials + labor + other;
        let min = (total * 0.9).round();
        let max = (total * 1.2).round();

        // One materials bucket, one labor bucket sized by a days estimate,
        // one catch-all bucket. Unit costs divide the bucket exactly so
        // quantity * unit_cost reproduces each category total.
        let material_qty = (input.area_square_feet / 80.0).ceil().max(1.0);
        let labor_days = (input.area_square_feet / 300.0).ceil().max(1.0);

        let line_items = vec![
            LineItem {
                id: format!("{}_1", quote_id),
                category: ItemCategory::Materials,
                item: format!("{} Materials", input.quality_level.label()),
                quantity: material_qty,
                unit: "units".to_string(),
                unit_cost: materials / material_qty,
                total_cost: materials,
                editable: true,
                notes: Some(format!("For {}", input.project_type.to_lowercase())),
            },
            LineItem {
                id: format!("{}_2", quote_id),
                category: ItemCategory::Labor,
                item: "Skilled Labor".to_string(),
                quantity: labor_days,
                unit: "days".to_string(),
                unit_cost: labor / labor_days,
                total_cost: labor,
                editable: true,
                notes: Some("Includes 2 workers".to_string()),
            },
            LineItem {
                id: format!("{}_3", quote_id),
                category: ItemCategory::Other,
                item: "Supplies & Miscellaneous".to_string(),
                quantity: 1.0,
                unit: "lot".to_string(),
                unit_cost: other,
                total_cost: other,
                editable: true,
                notes: None,
            },
        ];

        let mut assumptions = vec![
            format!("Based on {} sq ft area", input.area_square_feet),
            format!("{} quality materials", input.quality_level.label()),
            format!("Location: {}", input.location),
        ];
        match input.notes.as_deref().filter(|n| !n.is_empty()) {
            Some(notes) => assumptions.push(format!("Notes: {}", notes)),
            None => assumptions.push("Standard assumptions applied".to_string()),
        }
        assumptions.push(format!("Prices in {}", pricing.currency_name));

        QuoteData {
            id: quote_id.to_string(),
            project_info: input.clone(),
            line_items,
            totals: QuoteTotals {
                materials,
                labor,
                equipment: 0.0,
                other,
                subtotal: total,
                total,
            },
            total_cost_range: CostRange {
                min,
                max,
                currency: pricing.currency.clone(),
            },
            timeline: Timeline {
                min: (labor_days - 1.0).max(3.0),
                max: labor_days + 3.0,
                unit: "days".to_string(),
            },
            // The mock never claims high or low accuracy.
            confidence: Confidence::Medium,
            assumptions,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

#[async_trait]
impl QuoteSynthesizerTrait for MockSynthesizer {
    async fn synthesize(&self, input: &EstimateInput, quote_id: &str) -> Result<QuoteData> {
        Ok(self.build_quote(input, quote_id))
    }
}
