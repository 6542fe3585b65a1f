use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, assets, speak};
use crate::state::AppState;

/// Create the API router
///
/// CORS, rate limiting and security headers are applied in main.rs once
/// state is available.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::health_check))
        .route("/api/tts", post(speak::synthesize_handler))
        .fallback(assets::serve_asset)
        .method_not_allowed_fallback(api::method_not_allowed)
        .layer(TraceLayer::new_for_http())
}
