//! FineVoice TTS adapter (version tag `2.1`)
//!
//! The only asynchronous provider: synthesis opens a job on the vendor
//! side which is polled to completion before the audio can be fetched.

mod config;
mod messages;
mod provider;

pub use config::{FINEVOICE_CONVERTER_URL, FINEVOICE_STATUS_URL, FineVoiceConfig};
pub use provider::{FineVoiceTts, Sleeper, TokioSleeper};
