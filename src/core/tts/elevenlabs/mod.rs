//! ElevenLabs TTS adapter (version tag `1.0`)

mod config;
mod provider;

pub use config::{ELEVENLABS_API_URL, ElevenLabsConfig};
pub use provider::ElevenLabsTts;
