//! Quotesmith AI - quote synthesis via rig-core.
//!
//! This crate implements `quotesmith_core::estimates::QuoteSynthesizerTrait`
//! against an external text-generation provider:
//!
//! - `prompt`: fixed JSON-shape system prompt + user turn construction
//! - `synthesizer`: rig-core Anthropic invocation with a bounded timeout and
//!   strict response parsing
//! - `error`: provider error taxonomy, converted to the core taxonomy at the
//!   crate boundary
//!
//! Whether this synthesizer or the deterministic mock gets used is decided
//! once at startup from configuration; this crate never falls back to the
//! mock on its own.

pub mod error;
pub mod prompt;
pub mod synthesizer;

pub use error::AiError;
pub use synthesizer::{parse_quote_response, AiSynthesizer, AiSynthesizerConfig};
