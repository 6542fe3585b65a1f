//! ElevenLabs TTS provider implementation.
//!
//! Two sequential HTTP calls per synthesis: a voice-settings fetch so the
//! relayed audio matches what the web interface produces, then the
//! synthesis POST itself. The settings fetch is best-effort; any failure
//! falls back to the stock defaults.
//!
//! # API Reference
//!
//! - Voice settings: `GET /v1/voices/{voice_id}`
//! - Synthesis: `POST /v1/text-to-speech/{voice_id}` (body: text,
//!   model_id, voice_settings; response: audio bytes)

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{Value, json};

use super::config::ElevenLabsConfig;
use crate::config::ServerConfig;
use crate::core::tts::base::{SpeechProvider, TtsError, TtsResult};

/// Voice settings applied when the settings fetch fails; these match the
/// web interface defaults.
const FALLBACK_STABILITY: f64 = 0.5;
const FALLBACK_SIMILARITY_BOOST: f64 = 0.75;

pub struct ElevenLabsTts {
    config: ElevenLabsConfig,
    client: reqwest::Client,
}

impl ElevenLabsTts {
    pub fn new(config: ElevenLabsConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn from_server_config(config: &ServerConfig, client: reqwest::Client) -> TtsResult<Self> {
        Ok(Self::new(
            ElevenLabsConfig::from_server_config(config)?,
            client,
        ))
    }

    /// Fetch the voice's stored settings. Errors here must never fail the
    /// synthesis, so every failure path returns the fallback defaults.
    async fn voice_settings(&self) -> Value {
        let fallback = json!({
            "stability": FALLBACK_STABILITY,
            "similarity_boost": FALLBACK_SIMILARITY_BOOST,
        });

        let response = self
            .client
            .get(self.config.voice_settings_url())
            .header("xi-api-key", &self.config.api_key)
            .send()
            .await;

        let response = match response {
            Ok(r) if r.status().is_success() => r,
            _ => return fallback,
        };

        match response.json::<Value>().await {
            Ok(body) => body.get("settings").cloned().unwrap_or(fallback),
            Err(_) => fallback,
        }
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsTts {
    fn name(&self) -> &'static str {
        "elevenlabs"
    }

    async fn synthesize(&self, text: &str) -> TtsResult<Bytes> {
        let voice_settings = self.voice_settings().await;

        let body = json!({
            "text": text,
            "model_id": self.config.model_id,
            "voice_settings": voice_settings,
        });

        let response = self
            .client
            .post(self.config.synthesis_url())
            .header("xi-api-key", &self.config.api_key)
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = extract_error_message(response).await.unwrap_or_else(|| {
                format!(
                    "ElevenLabs API error: {}",
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

/// ElevenLabs error bodies carry the useful text under `detail.message`.
async fn extract_error_message(response: reqwest::Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    body.get("detail")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let server = ServerConfig::from_lookup(|name| match name {
            "ELEVENLABS_API_KEY" => Some("test_key".to_string()),
            _ => None,
        })
        .unwrap();
        let tts = ElevenLabsTts::from_server_config(&server, reqwest::Client::new()).unwrap();
        assert_eq!(tts.name(), "elevenlabs");
    }
}
