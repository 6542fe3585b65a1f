use crate::config::ServerConfig;
use crate::core::tts::base::{TtsError, TtsResult};

/// ElevenLabs API base URL
pub const ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io";

/// Voice used when no override is configured
const DEFAULT_VOICE_ID: &str = "wFzdaipEHKrAyjK9EKuv";

/// Default synthesis model; turbo v3 alpha has the best Hebrew coverage
const DEFAULT_MODEL_ID: &str = "eleven_turbo_v3_alpha";

/// Resolved ElevenLabs adapter configuration
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: String,
    pub voice_id: String,
    pub model_id: String,
    pub base_url: String,
}

impl ElevenLabsConfig {
    pub fn from_server_config(config: &ServerConfig) -> TtsResult<Self> {
        let api_key = config.elevenlabs_api_key.clone().ok_or_else(|| {
            TtsError::MissingConfiguration("ElevenLabs API key not configured".to_string())
        })?;

        Ok(Self {
            api_key,
            voice_id: config
                .elevenlabs_voice_id
                .clone()
                .unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
            model_id: config
                .elevenlabs_model_id
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            base_url: config
                .elevenlabs_base_url
                .clone()
                .unwrap_or_else(|| ELEVENLABS_API_URL.to_string()),
        })
    }

    /// Endpoint returning the voice's stored settings
    pub fn voice_settings_url(&self) -> String {
        format!("{}/v1/voices/{}", self.base_url, self.voice_id)
    }

    /// Synthesis endpoint for the configured voice
    pub fn synthesis_url(&self) -> String {
        format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id)
    }
}
