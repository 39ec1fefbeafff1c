//! Storage-specific error types for SQLite operations.
//!
//! This module wraps Diesel/r2d2 errors and converts them to the
//! database-agnostic error types defined in `quotesmith_core`.

use diesel::result::Error as DieselError;
use quotesmith_core::errors::{Error, StorageError as CoreStorageError};
use thiserror::Error;

/// Storage-specific errors, internal to this crate. Converted to
/// `quotesmith_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Core error: {0}")]
    CoreError(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

/// Convert core Error to StorageError (for the write-actor transaction wrapper)
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(err.to_string())
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Storage(CoreStorageError::Unavailable(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Storage(CoreStorageError::Unavailable(e.to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Storage(CoreStorageError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => {
                Error::Storage(CoreStorageError::MigrationFailed(e))
            }
            StorageError::SerializationError(e) => Error::Storage(CoreStorageError::Corrupt(e)),
            StorageError::CoreError(e) => Error::Storage(CoreStorageError::Internal(e)),
        }
    }
}
