//! Static asset surface.
//!
//! Mounted as the router fallback: anything that is not an API route is
//! looked up in the asset cache, with a navigation fallback to the cached
//! root document for HTML requests that miss.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::core::assets::CachedAsset;
use crate::state::AppState;

pub async fn serve_asset(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = uri.path();

    if let Some(asset) = state.assets.get(path).await {
        return asset_response(asset);
    }

    if wants_html(&headers) {
        if let Some(asset) = state.assets.navigation_fallback().await {
            return asset_response(asset);
        }
    }

    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

fn asset_response(asset: CachedAsset) -> Response {
    ([(header::CONTENT_TYPE, asset.content_type)], asset.body).into_response()
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}
