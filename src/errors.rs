//! Application error type and its HTTP mapping.
//!
//! Every failure is recovered at the boundary of the request being
//! handled and converted into a JSON `{ "error": ... }` envelope with a
//! status mirroring the failure; nothing propagates past the request.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::core::tts::TtsError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Tts(#[from] TtsError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Tts(e) => match e {
                TtsError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                TtsError::MissingConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
                // The upstream provider's status is passed through to the
                // caller; a status reqwest accepted but http cannot
                // represent degrades to 502.
                TtsError::UpstreamHttp { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                TtsError::UpstreamProtocol(_) => StatusCode::INTERNAL_SERVER_ERROR,
                TtsError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                TtsError::Network(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: TtsError) -> StatusCode {
        AppError::from(error).status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(TtsError::InvalidInput("blank".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(TtsError::MissingConfiguration("no key".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(TtsError::UpstreamHttp {
                status: 429,
                message: "rate limited".into()
            }),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_of(TtsError::UpstreamProtocol("no uuid".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(TtsError::Timeout("poll budget exhausted".into())),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_unrepresentable_upstream_status_degrades() {
        assert_eq!(
            status_of(TtsError::UpstreamHttp {
                status: 99,
                message: "odd".into()
            }),
            StatusCode::BAD_GATEWAY
        );
    }
}
