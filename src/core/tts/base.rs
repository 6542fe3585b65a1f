//! Shared types for the TTS provider adapters.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Result type for TTS operations
pub type TtsResult<T> = Result<T, TtsError>;

/// Errors produced while relaying a synthesis request.
///
/// Every variant is recovered at the boundary of the request being handled
/// and converted into a structured JSON error response; see
/// [`crate::errors::AppError`] for the HTTP status mapping.
#[derive(Debug, Error)]
pub enum TtsError {
    /// The caller's request is malformed (blank text, unknown version).
    #[error("{0}")]
    InvalidInput(String),

    /// A required credential or voice identifier is absent from the
    /// server configuration.
    #[error("{0}")]
    MissingConfiguration(String),

    /// The provider answered with a non-success HTTP status. The status is
    /// passed through to the caller together with a best-effort message
    /// extracted from the provider's error body.
    #[error("upstream error ({status}): {message}")]
    UpstreamHttp { status: u16, message: String },

    /// The provider answered successfully but violated its own protocol,
    /// e.g. a submit response without a job token or a completed job
    /// without a result URL.
    #[error("{0}")]
    UpstreamProtocol(String),

    /// The polling budget was exhausted before the job completed.
    #[error("{0}")]
    Timeout(String),

    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// A text-to-speech provider adapter.
///
/// Each adapter owns its credentials and endpoint configuration and turns a
/// text string into a complete audio byte buffer. Adapters are constructed
/// per request by [`super::create_provider`]; they hold no mutable state.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Short provider name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Synthesize `text` into audio bytes. The returned buffer is served
    /// verbatim with `Content-Type: audio/mpeg`.
    async fn synthesize(&self, text: &str) -> TtsResult<Bytes>;
}
