//! Quotesmith Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Quotesmith.
//! It is database-agnostic and provider-agnostic: persistence is reached
//! through `QuoteStoreTrait` (implemented by the `storage-sqlite` crate and
//! the bundled in-memory store) and quote synthesis through
//! `QuoteSynthesizerTrait` (implemented here by the mock synthesizer and by
//! the `quotesmith-ai` crate).

pub mod constants;
pub mod errors;
pub mod estimates;
pub mod store;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
