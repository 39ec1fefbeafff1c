//! AI synthesizer error types.

use quotesmith_core::errors::SynthesisError;
use thiserror::Error;

/// AI synthesizer errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// Missing API key for a provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Provider error (from rig-core or the API).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider response did not parse into the required quote shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The call did not complete within the configured bound.
    #[error("Timed out after {0}ms")]
    Timeout(u64),
}

impl AiError {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}

/// Conversion to the provider-agnostic core taxonomy at the crate boundary.
impl From<AiError> for quotesmith_core::Error {
    fn from(err: AiError) -> Self {
        let synthesis = match err {
            AiError::MissingApiKey(provider) => SynthesisError::MissingApiKey(provider),
            AiError::Provider(msg) => SynthesisError::Unavailable(msg),
            AiError::InvalidResponse(msg) => SynthesisError::InvalidResponse(msg),
            AiError::Timeout(ms) => SynthesisError::Timeout(ms),
        };
        quotesmith_core::Error::Synthesis(synthesis)
    }
}
