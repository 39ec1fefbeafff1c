//! Estimates module - domain models, services, and traits.

mod estimates_model;
mod estimates_service;
mod estimates_traits;
mod mock_synthesizer;
mod working_copy;

pub use estimates_model::{
    Confidence, CostRange, EstimateInput, ItemCategory, LineItem, QualityLevel, QuoteData,
    QuoteTotals, QuoteUpdate, Timeline,
};
pub use estimates_service::{generate_quote_id, validate_input, EstimateService};
pub use estimates_traits::{EstimateServiceTrait, QuoteSynthesizerTrait};
pub use mock_synthesizer::{MockSynthesizer, PricingConfig};
pub use working_copy::{recalc_totals, LineItemDraft, WorkingQuote};
