use crate::config::ServerConfig;
use crate::core::tts::base::{TtsError, TtsResult};

/// Resemble synthesis cluster base URL
pub const RESEMBLE_API_URL: &str = "https://f.cluster.resemble.ai";

/// Resolved Resemble adapter configuration
#[derive(Debug, Clone)]
pub struct ResembleConfig {
    pub api_key: String,
    pub voice_uuid: String,
    pub base_url: String,
}

impl ResembleConfig {
    pub fn from_server_config(config: &ServerConfig) -> TtsResult<Self> {
        let api_key = config.resemble_api_key.clone().ok_or_else(|| {
            TtsError::MissingConfiguration("Resemble API key not configured".to_string())
        })?;
        let voice_uuid = config.resemble_voice_uuid.clone().ok_or_else(|| {
            TtsError::MissingConfiguration("Resemble voice UUID not configured".to_string())
        })?;

        Ok(Self {
            api_key,
            voice_uuid,
            base_url: config
                .resemble_base_url
                .clone()
                .unwrap_or_else(|| RESEMBLE_API_URL.to_string()),
        })
    }

    /// Streaming synthesis endpoint; the response body is the raw audio
    pub fn synthesis_url(&self) -> String {
        format!("{}/stream", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(pairs: &'static [(&'static str, &'static str)]) -> ServerConfig {
        ServerConfig::from_lookup(|name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        })
        .unwrap()
    }

    #[test]
    fn test_requires_api_key_and_voice() {
        let err = ResembleConfig::from_server_config(&server(&[])).unwrap_err();
        assert!(matches!(err, TtsError::MissingConfiguration(msg) if msg.contains("API key")));

        let err =
            ResembleConfig::from_server_config(&server(&[("RESEMBLE_API_KEY", "key")]))
                .unwrap_err();
        assert!(matches!(err, TtsError::MissingConfiguration(msg) if msg.contains("voice")));
    }

    #[test]
    fn test_synthesis_url() {
        let config = ResembleConfig::from_server_config(&server(&[
            ("RESEMBLE_API_KEY", "key"),
            ("RESEMBLE_VOICE_UUID", "voice-1"),
        ]))
        .unwrap();
        assert_eq!(config.synthesis_url(), "https://f.cluster.resemble.ai/stream");
    }
}
