//! Resemble AI TTS provider implementation.
//!
//! One synchronous HTTP call: `POST /stream` with Bearer auth; the
//! response body is the raw audio. No retry.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{Value, json};

use super::config::ResembleConfig;
use crate::config::ServerConfig;
use crate::core::tts::base::{SpeechProvider, TtsError, TtsResult};

pub struct ResembleTts {
    config: ResembleConfig,
    client: reqwest::Client,
}

impl ResembleTts {
    pub fn new(config: ResembleConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn from_server_config(config: &ServerConfig, client: reqwest::Client) -> TtsResult<Self> {
        Ok(Self::new(ResembleConfig::from_server_config(config)?, client))
    }
}

#[async_trait]
impl SpeechProvider for ResembleTts {
    fn name(&self) -> &'static str {
        "resemble"
    }

    async fn synthesize(&self, text: &str) -> TtsResult<Bytes> {
        let body = json!({
            "voice_uuid": self.config.voice_uuid,
            "data": text,
            "output_format": "mp3",
        });

        let response = self
            .client
            .post(self.config.synthesis_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = extract_error_message(response).await.unwrap_or_else(|| {
                format!(
                    "Resemble API error: {}",
                    status.canonical_reason().unwrap_or("request failed")
                )
            });
            return Err(TtsError::UpstreamHttp {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?)
    }
}

/// Resemble error bodies carry the useful text under `message`.
async fn extract_error_message(response: reqwest::Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    body.get("message")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let server = ServerConfig::from_lookup(|name| match name {
            "RESEMBLE_API_KEY" => Some("key".to_string()),
            "RESEMBLE_VOICE_UUID" => Some("voice-1".to_string()),
            _ => None,
        })
        .unwrap();
        let tts = ResembleTts::from_server_config(&server, reqwest::Client::new()).unwrap();
        assert_eq!(tts.name(), "resemble");
    }
}
