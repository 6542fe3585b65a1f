//! Configuration module for the voice-relay server
//!
//! Configuration comes from the process environment, with `.env` values
//! loaded by the binaries before [`ServerConfig::from_env`] runs. The
//! configuration is constructed exactly once at startup and handed down to
//! handlers and provider adapters; nothing performs ambient environment
//! lookups at request time.
//!
//! # Example
//! ```rust,no_run
//! use voice_relay::config::ServerConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Default bind host
const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port
const DEFAULT_PORT: u16 = 3000;
/// Default static asset directory (the batch generators write here too)
const DEFAULT_STATIC_DIR: &str = "public";
/// Default asset cache version tag; bump to invalidate cached assets
const DEFAULT_ASSET_CACHE_VERSION: &str = "v4";
/// Default rate limit (requests per second per IP)
const DEFAULT_RATE_LIMIT_RPS: u32 = 60;
/// Default rate limit burst size
const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Server configuration
///
/// Contains everything needed to run the relay server and the batch
/// generators:
/// - Server settings (host, port)
/// - Provider credentials (ElevenLabs, Resemble, FineVoice)
/// - Static asset settings
/// - Security settings (CORS, rate limiting)
///
/// Endpoint override fields exist so tests can point the adapters at mock
/// servers; when unset, the vendor production URLs are used.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // ElevenLabs (version 1.0)
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_voice_id: Option<String>,
    pub elevenlabs_model_id: Option<String>,

    // Resemble (version 2.0)
    pub resemble_api_key: Option<String>,
    pub resemble_voice_uuid: Option<String>,

    // FineVoice (version 2.1)
    pub finevoice_api_key: Option<String>,
    pub finevoice_voice_model: Option<String>,
    /// Spacing between job status checks, in milliseconds (vendor default
    /// when unset)
    pub finevoice_poll_interval_ms: Option<u64>,
    /// Status check attempt budget (vendor default when unset)
    pub finevoice_max_poll_attempts: Option<u32>,

    // Endpoint overrides, primarily for tests
    pub elevenlabs_base_url: Option<String>,
    pub resemble_base_url: Option<String>,
    pub finevoice_converter_url: Option<String>,
    pub finevoice_status_url: Option<String>,

    // Static assets
    pub static_dir: PathBuf,
    /// Version tag for the asset cache; entries carrying a stale tag are
    /// dropped when a cache with a newer tag activates.
    pub asset_cache_version: String,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,

    /// Maximum requests per second per IP address
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    pub rate_limit_burst_size: u32,
}

/// Implement Drop to zeroize provider credentials when ServerConfig is
/// dropped so key material does not linger in memory.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.elevenlabs_api_key {
            key.zeroize();
        }
        if let Some(ref mut key) = self.resemble_api_key {
            key.zeroize();
        }
        if let Some(ref mut key) = self.finevoice_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Tests pass a closure over a fixed map instead of mutating the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = non_empty(lookup("HOST")).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = numeric(non_empty(lookup("PORT")), "PORT", DEFAULT_PORT)?;

        let static_dir = non_empty(lookup("STATIC_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        let asset_cache_version = non_empty(lookup("ASSET_CACHE_VERSION"))
            .unwrap_or_else(|| DEFAULT_ASSET_CACHE_VERSION.to_string());

        let rate_limit_requests_per_second = numeric(
            non_empty(lookup("RATE_LIMIT_REQUESTS_PER_SECOND")),
            "RATE_LIMIT_REQUESTS_PER_SECOND",
            DEFAULT_RATE_LIMIT_RPS,
        )?;
        let rate_limit_burst_size = numeric(
            non_empty(lookup("RATE_LIMIT_BURST_SIZE")),
            "RATE_LIMIT_BURST_SIZE",
            DEFAULT_RATE_LIMIT_BURST,
        )?;

        Ok(Self {
            host,
            port,
            elevenlabs_api_key: non_empty(lookup("ELEVENLABS_API_KEY")),
            elevenlabs_voice_id: non_empty(lookup("ELEVENLABS_VOICE_ID")),
            elevenlabs_model_id: non_empty(lookup("ELEVENLABS_MODEL_ID")),
            resemble_api_key: non_empty(lookup("RESEMBLE_API_KEY")),
            resemble_voice_uuid: non_empty(lookup("RESEMBLE_VOICE_UUID")),
            finevoice_api_key: non_empty(lookup("FINEVOICE_API_KEY")),
            finevoice_voice_model: non_empty(lookup("FINEVOICE_VOICE_MODEL")),
            finevoice_poll_interval_ms: numeric_opt(
                non_empty(lookup("FINEVOICE_POLL_INTERVAL_MS")),
                "FINEVOICE_POLL_INTERVAL_MS",
            )?,
            finevoice_max_poll_attempts: numeric_opt(
                non_empty(lookup("FINEVOICE_MAX_POLL_ATTEMPTS")),
                "FINEVOICE_MAX_POLL_ATTEMPTS",
            )?,
            elevenlabs_base_url: non_empty(lookup("ELEVENLABS_BASE_URL")),
            resemble_base_url: non_empty(lookup("RESEMBLE_BASE_URL")),
            finevoice_converter_url: non_empty(lookup("FINEVOICE_CONVERTER_URL")),
            finevoice_status_url: non_empty(lookup("FINEVOICE_STATUS_URL")),
            static_dir,
            asset_cache_version,
            cors_allowed_origins: non_empty(lookup("CORS_ALLOWED_ORIGINS")),
            rate_limit_requests_per_second,
            rate_limit_burst_size,
        })
    }

    /// Socket address string the server binds to.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Treat unset and blank environment variables the same way.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn numeric<T: std::str::FromStr>(
    raw: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    numeric_opt(raw, name).map(|value| value.unwrap_or(default))
}

fn numeric_opt<T: std::str::FromStr>(
    raw: Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(None),
    }
}
