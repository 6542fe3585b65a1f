use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// Fallback for requests that hit a known route with the wrong method,
/// keeping the JSON error envelope consistent with every other failure.
pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}
