//! Text-to-speech relay endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::info;

use crate::core::tts::{ProviderVersion, TtsError, create_provider};
use crate::errors::AppResult;
use crate::state::AppState;

/// Body of `POST /api/tts`
#[derive(Debug, Deserialize)]
pub struct SynthesisRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Version tag selecting the provider; omitted means `1.0`. Kept as a
    /// raw string so unrecognized tags produce a 400, not a decode error.
    #[serde(default)]
    pub version: Option<String>,
}

/// Relay one synthesis request to the provider selected by the version
/// tag. Validation failures are rejected before any provider is
/// contacted; exactly one adapter is invoked per accepted request.
pub async fn synthesize_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynthesisRequest>,
) -> AppResult<Response> {
    let text = request.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(TtsError::InvalidInput("Text is required".to_string()).into());
    }

    let version = match request.version.as_deref() {
        Some(tag) => ProviderVersion::parse(tag)?,
        None => ProviderVersion::default(),
    };

    let provider = create_provider(version, &state.config, state.http.clone())?;
    info!(
        provider = provider.name(),
        version = %version,
        chars = text.chars().count(),
        "relaying synthesis request"
    );

    let audio = provider.synthesize(text).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg".to_string()),
            (header::CONTENT_LENGTH, audio.len().to_string()),
        ],
        audio,
    )
        .into_response())
}
