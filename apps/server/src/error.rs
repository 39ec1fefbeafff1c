use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use quotesmith_core::errors::Error as CoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Estimate not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            ApiError::Core(CoreError::Validation(v)) => (
                StatusCode::BAD_REQUEST,
                "Invalid input".to_string(),
                Some(v.to_string()),
            ),
            ApiError::Core(CoreError::NotFound(_)) | ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "Estimate not found".to_string(),
                None,
            ),
            ApiError::Core(CoreError::Synthesis(e)) => {
                tracing::error!("Quote synthesis failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate estimate".to_string(),
                    None,
                )
            }
            ApiError::Core(CoreError::Storage(e)) => {
                tracing::error!("Storage operation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage operation failed".to_string(),
                    None,
                )
            }
            ApiError::Core(e) => {
                tracing::error!("Unhandled core error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            ApiError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, reason.clone(), None)
            }
            ApiError::Anyhow(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };
        let body = Json(ErrorBody { error, details });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
