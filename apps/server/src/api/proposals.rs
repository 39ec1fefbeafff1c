use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProposalRequest {
    estimate_id: Option<String>,
}

/// Placeholder for proposal document rendering. Validates the referenced
/// estimate exists but does not produce a PDF yet.
async fn generate_proposal(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProposalRequest>,
) -> ApiResult<Json<Value>> {
    let estimate_id = body
        .estimate_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("estimateId is required".to_string()))?;

    state
        .estimate_service
        .get(&estimate_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(json!({
        "message": "Proposal generation is not implemented yet",
        "estimateId": estimate_id,
        "pdfUrl": Value::Null,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/proposals/generate", post(generate_proposal))
}
