use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use quotesmith_server::{api::app_router, build_state, config::Config};

// Env vars that would flip the router into SQLite or AI mode leak in from
// the host; clear them so every test runs against the in-memory mock stack.
async fn build_test_router() -> axum::Router {
    for key in ["QS_DB_PATH", "ANTHROPIC_API_KEY", "QS_CURRENCY"] {
        std::env::remove_var(key);
    }
    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn valid_input() -> Value {
    json!({
        "projectType": "bathroom renovation",
        "areaSquareFeet": 120.0,
        "qualityLevel": "standard",
        "location": "Pune"
    })
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn generate_quote(app: &axum::Router) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/estimates/generate",
            valid_input(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = build_test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn generate_returns_complete_quote() {
    let app = build_test_router().await;
    let quote = generate_quote(&app).await;

    let id = quote["id"].as_str().unwrap();
    assert!(id.starts_with("est_"));
    assert_eq!(quote["projectInfo"]["projectType"], "bathroom renovation");

    // 120 sqft at the standard tier: 120 * 65 = 7800
    assert_eq!(quote["totals"]["total"], json!(7800.0));
    assert_eq!(quote["totalCostRange"]["min"], json!(7020.0));
    assert_eq!(quote["totalCostRange"]["max"], json!(9360.0));
    assert_eq!(quote["totalCostRange"]["currency"], "INR");
    assert_eq!(quote["confidence"], "medium");

    let items = quote["lineItems"].as_array().unwrap();
    assert!(!items.is_empty());
    for item in items {
        let item_id = item["id"].as_str().unwrap();
        assert!(item_id.starts_with(id), "line item id carries the quote id");
        let quantity = item["quantity"].as_f64().unwrap();
        let unit_cost = item["unitCost"].as_f64().unwrap();
        let total_cost = item["totalCost"].as_f64().unwrap();
        assert!((quantity * unit_cost - total_cost).abs() < 1e-6);
    }
}

#[tokio::test]
async fn generate_rejects_invalid_input() {
    let app = build_test_router().await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/estimates/generate",
            json!({
                "projectType": "",
                "areaSquareFeet": -5.0,
                "qualityLevel": "standard",
                "location": "NY"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Invalid input");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn get_roundtrips_persisted_quote() {
    let app = build_test_router().await;
    let quote = generate_quote(&app).await;
    let id = quote["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/estimates/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json(response).await;
    assert_eq!(fetched, quote);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let app = build_test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/estimates/est_0_zzzzzzz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Estimate not found");
}

#[tokio::test]
async fn update_merges_partial_fields() {
    let app = build_test_router().await;
    let quote = generate_quote(&app).await;
    let id = quote["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/estimates/{id}"),
            json!({ "assumptions": ["Client supplies fixtures"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["assumptions"], json!(["Client supplies fixtures"]));
    // untouched fields survive the merge
    assert_eq!(updated["totals"], quote["totals"]);
    assert_eq!(updated["lineItems"], quote["lineItems"]);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let app = build_test_router().await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/estimates/est_0_zzzzzzz",
            json!({ "assumptions": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_rewrites_ids_and_persists_copy() {
    let app = build_test_router().await;
    let quote = generate_quote(&app).await;
    let source_id = quote["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(format!("/api/estimates/{source_id}/duplicate"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let copy = read_json(response).await;

    let copy_id = copy["id"].as_str().unwrap();
    assert_ne!(copy_id, source_id);
    assert_eq!(copy["totals"], quote["totals"]);
    for (item, original) in copy["lineItems"]
        .as_array()
        .unwrap()
        .iter()
        .zip(quote["lineItems"].as_array().unwrap())
    {
        assert!(item["id"].as_str().unwrap().starts_with(copy_id));
        assert_eq!(item["totalCost"], original["totalCost"]);
    }

    // both quotes are listed, newest first
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/estimates")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let ids = read_json(response).await;
    let ids: Vec<&str> = ids.as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
    assert!(ids.contains(&source_id));
    assert!(ids.contains(&copy_id));
}

#[tokio::test]
async fn delete_removes_quote() {
    let app = build_test_router().await;
    let quote = generate_quote(&app).await;
    let id = quote["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/estimates/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/estimates/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn proposal_stub_contract() {
    let app = build_test_router().await;
    let quote = generate_quote(&app).await;
    let id = quote["id"].as_str().unwrap();

    // missing estimateId
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/proposals/generate",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // unknown estimate
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/proposals/generate",
            json!({ "estimateId": "est_0_zzzzzzz" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // known estimate gets the placeholder payload
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/proposals/generate",
            json!({ "estimateId": id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["estimateId"], id);
    assert!(body["pdfUrl"].is_null());
}
