pub mod base;
pub mod elevenlabs;
pub mod finevoice;
pub mod resemble;

pub use base::{SpeechProvider, TtsError, TtsResult};
pub use elevenlabs::{ELEVENLABS_API_URL, ElevenLabsConfig, ElevenLabsTts};
pub use finevoice::{
    FINEVOICE_CONVERTER_URL, FINEVOICE_STATUS_URL, FineVoiceConfig, FineVoiceTts,
};
pub use resemble::{RESEMBLE_API_URL, ResembleConfig, ResembleTts};

use std::fmt;

use crate::config::ServerConfig;

/// Provider selection tag carried in the request body.
///
/// The tags are historical API versions, each pinned to one vendor:
/// `1.0` ElevenLabs, `2.0` Resemble, `2.1` FineVoice. An omitted tag
/// means `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderVersion {
    ElevenLabs,
    Resemble,
    FineVoice,
}

impl ProviderVersion {
    /// Parse a version tag. Unrecognized tags are an input error; the
    /// request must be rejected before any provider is contacted.
    pub fn parse(tag: &str) -> TtsResult<Self> {
        match tag.trim() {
            "1.0" => Ok(Self::ElevenLabs),
            "2.0" => Ok(Self::Resemble),
            "2.1" => Ok(Self::FineVoice),
            other => Err(TtsError::InvalidInput(format!(
                "Unsupported version: '{other}'. Supported versions: 1.0, 2.0, 2.1"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "1.0",
            Self::Resemble => "2.0",
            Self::FineVoice => "2.1",
        }
    }
}

impl Default for ProviderVersion {
    fn default() -> Self {
        Self::ElevenLabs
    }
}

impl fmt::Display for ProviderVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Factory function to create a TTS provider adapter.
///
/// Routes to exactly one adapter per call; credential validation happens
/// here, before any network traffic. `client` is the process-wide pooled
/// HTTP client.
pub fn create_provider(
    version: ProviderVersion,
    config: &ServerConfig,
    client: reqwest::Client,
) -> TtsResult<Box<dyn SpeechProvider>> {
    match version {
        ProviderVersion::ElevenLabs => {
            Ok(Box::new(ElevenLabsTts::from_server_config(config, client)?))
        }
        ProviderVersion::Resemble => {
            Ok(Box::new(ResembleTts::from_server_config(config, client)?))
        }
        ProviderVersion::FineVoice => {
            Ok(Box::new(FineVoiceTts::from_server_config(config, client)?))
        }
    }
}
