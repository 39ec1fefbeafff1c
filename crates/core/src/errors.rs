//! Core error types for the Quotesmith application.
//!
//! This module defines database-agnostic and provider-agnostic error types.
//! Storage-specific errors (from Diesel, SQLite, etc.) are converted to these
//! types by the storage layer; provider-specific errors (from rig-core) by
//! the AI layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the estimate application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Estimate not found: {0}")]
    NotFound(String),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Quote synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, r2d2, etc.) into this format.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store is configured but unreachable.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A query failed to execute.
    #[error("Storage query failed: {0}")]
    QueryFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A persisted record could not be decoded into a domain model.
    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),

    /// Internal/unexpected storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// Errors raised by the AI quote synthesizer.
///
/// The mock synthesizer is total and never raises these.
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// The provider response did not parse into the required quote shape.
    #[error("Invalid synthesis response: {0}")]
    InvalidResponse(String),

    /// The external call did not complete within the configured bound.
    #[error("Synthesis timed out after {0}ms")]
    Timeout(u64),

    /// The provider could not be reached or rejected the call.
    #[error("Synthesis provider unavailable: {0}")]
    Unavailable(String),

    /// No API key configured for the provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),
}

/// Validation errors for user-supplied estimate input.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// One or more stated constraints were violated; the message lists them.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

// === From implementations for common error types ===

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(StorageError::Corrupt(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
