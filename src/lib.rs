pub mod config;
pub mod core;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export commonly used items for convenience
// (the `core` module shadows the builtin crate, so paths are crate-prefixed)
pub use crate::config::ServerConfig;
pub use crate::core::tts::{ProviderVersion, SpeechProvider, TtsError, TtsResult, create_provider};
pub use crate::errors::{AppError, AppResult};
pub use crate::state::AppState;
