use std::time::Duration;

use crate::config::ServerConfig;
use crate::core::tts::base::{TtsError, TtsResult};

/// Job submission host
pub const FINEVOICE_CONVERTER_URL: &str = "https://converter.fineshare.net";

/// Job status host
pub const FINEVOICE_STATUS_URL: &str = "https://voiceai.fineshare.net";

/// Voice model used when no override is configured
const DEFAULT_VOICE_MODEL: &str = "danny21-321536";

/// Fixed spacing between status checks
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Attempt budget; together with the interval this caps the wait at ~30 s
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;

/// Resolved FineVoice adapter configuration
#[derive(Debug, Clone)]
pub struct FineVoiceConfig {
    pub api_key: String,
    pub voice_model: String,
    pub converter_url: String,
    pub status_url: String,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

impl FineVoiceConfig {
    pub fn from_server_config(config: &ServerConfig) -> TtsResult<Self> {
        let api_key = config.finevoice_api_key.clone().ok_or_else(|| {
            TtsError::MissingConfiguration("FineVoice API key not configured".to_string())
        })?;

        Ok(Self {
            api_key,
            voice_model: config
                .finevoice_voice_model
                .clone()
                .unwrap_or_else(|| DEFAULT_VOICE_MODEL.to_string()),
            converter_url: config
                .finevoice_converter_url
                .clone()
                .unwrap_or_else(|| FINEVOICE_CONVERTER_URL.to_string()),
            status_url: config
                .finevoice_status_url
                .clone()
                .unwrap_or_else(|| FINEVOICE_STATUS_URL.to_string()),
            poll_interval: config
                .finevoice_poll_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            max_poll_attempts: config
                .finevoice_max_poll_attempts
                .unwrap_or(DEFAULT_MAX_POLL_ATTEMPTS),
        })
    }

    /// Synthesis job submission endpoint
    pub fn submit_url(&self) -> String {
        format!("{}/api/fsmstexttospeech", self.converter_url)
    }

    /// Status endpoint for a submitted job
    pub fn status_url_for(&self, uuid: &str) -> String {
        format!("{}/api/checkfilechangestatus/{}", self.status_url, uuid)
    }
}
