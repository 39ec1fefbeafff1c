use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use quotesmith_core::estimates::{EstimateInput, QuoteData, QuoteUpdate};

async fn generate_estimate(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EstimateInput>,
) -> ApiResult<(StatusCode, Json<QuoteData>)> {
    let quote = state.estimate_service.generate(input).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}

async fn list_estimates(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let ids = state.estimate_service.list_ids().await?;
    Ok(Json(ids))
}

async fn get_estimate(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<QuoteData>> {
    let quote = state
        .estimate_service
        .get(&id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(quote))
}

async fn update_estimate(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<QuoteUpdate>,
) -> ApiResult<Json<QuoteData>> {
    let quote = state.estimate_service.update(&id, update).await?;
    Ok(Json(quote))
}

async fn delete_estimate(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let existed = state.estimate_service.delete(&id).await?;
    if !existed {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn duplicate_estimate(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<QuoteData>)> {
    let quote = state.estimate_service.duplicate(&id).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/estimates/generate", post(generate_estimate))
        .route("/estimates", get(list_estimates))
        .route(
            "/estimates/{id}",
            get(get_estimate)
                .put(update_estimate)
                .delete(delete_estimate),
        )
        .route("/estimates/{id}/duplicate", post(duplicate_estimate))
}
