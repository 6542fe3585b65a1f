//! FineVoice TTS provider implementation.
//!
//! FineVoice is asynchronous on the vendor side: a synthesis request opens
//! a job, the job is polled at a fixed interval until it reports
//! completion, and the finished audio is fetched from the URL carried by
//! the terminal status. The bounded fixed-interval poll is a simple
//! substitute for a push notification the vendor does not provide; it
//! holds the request open for up to ~30 s.
//!
//! The poll is expressed as an explicit state machine with an injectable
//! [`Sleeper`] so tests can drive it without real timers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use super::config::FineVoiceConfig;
use super::messages::{JobStatus, SubmitRequest, SubmitResponse};
use crate::config::ServerConfig;
use crate::core::lang::language_tag;
use crate::core::tts::base::{SpeechProvider, TtsError, TtsResult};

/// Pluggable sleep used between poll attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, period: Duration);
}

/// Production sleeper backed by the tokio timer.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}

/// Poll loop state. The loop only ever moves forward: every attempt
/// either completes the job, spends one unit of the attempt budget, or
/// exhausts it.
enum PollState {
    Polling { attempt: u32 },
    Complete { url: String },
    TimedOut,
}

pub struct FineVoiceTts {
    config: FineVoiceConfig,
    client: reqwest::Client,
    sleeper: Arc<dyn Sleeper>,
}

impl FineVoiceTts {
    pub fn new(config: FineVoiceConfig, client: reqwest::Client) -> Self {
        Self::with_sleeper(config, client, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(
        config: FineVoiceConfig,
        client: reqwest::Client,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            config,
            client,
            sleeper,
        }
    }

    pub fn from_server_config(config: &ServerConfig, client: reqwest::Client) -> TtsResult<Self> {
        Ok(Self::new(FineVoiceConfig::from_server_config(config)?, client))
    }

    /// Resolved voice model identifier.
    pub fn voice_model(&self) -> &str {
        &self.config.voice_model
    }

    /// Synthesize with an explicit language tag; `None` infers the tag
    /// from the text's character set. The batch generators pass explicit
    /// tags, the HTTP handler relies on inference.
    pub async fn synthesize_with_language(
        &self,
        text: &str,
        language_code: Option<&str>,
    ) -> TtsResult<Bytes> {
        let language_code = language_code.unwrap_or_else(|| language_tag(text));
        let uuid = self.submit(text, language_code).await?;
        tracing::debug!(job = %uuid, language = language_code, "FineVoice job submitted");
        let url = self.poll(&uuid).await?;
        self.fetch(&url).await
    }

    /// Open a synthesis job. A success response without a job token is a
    /// terminal protocol failure.
    async fn submit(&self, text: &str, language_code: &str) -> TtsResult<String> {
        let request = SubmitRequest::new(text, &self.config.voice_model, language_code);

        let response = self
            .client
            .post(self.config.submit_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = extract_error_message(response).await.unwrap_or_else(|| {
                format!(
                    "FineVoice API error: {}",
                    status.canonical_reason().unwrap_or("request failed")
                )
            });
            return Err(TtsError::UpstreamHttp {
                status: status.as_u16(),
                message,
            });
        }

        let body: SubmitResponse = response.json().await.map_err(|_| {
            TtsError::UpstreamProtocol("FineVoice submit response was not valid JSON".to_string())
        })?;

        body.uuid.filter(|uuid| !uuid.is_empty()).ok_or_else(|| {
            TtsError::UpstreamProtocol("FineVoice API did not return a task uuid".to_string())
        })
    }

    /// Drive the job to completion within the attempt budget. At most
    /// `max_poll_attempts` status requests are issued.
    async fn poll(&self, uuid: &str) -> TtsResult<String> {
        let mut state = PollState::Polling { attempt: 0 };
        loop {
            state = match state {
                PollState::Polling { attempt } if attempt >= self.config.max_poll_attempts => {
                    PollState::TimedOut
                }
                PollState::Polling { attempt } => match self.check_status(uuid).await {
                    Some(url) => PollState::Complete { url },
                    None => {
                        self.sleeper.sleep(self.config.poll_interval).await;
                        PollState::Polling {
                            attempt: attempt + 1,
                        }
                    }
                },
                PollState::Complete { url } => return Ok(url),
                PollState::TimedOut => {
                    return Err(TtsError::Timeout(
                        "FineVoice audio generation timed out".to_string(),
                    ));
                }
            };
        }
    }

    /// One status request. Returns the result URL once the job reports
    /// the terminal status; `None` covers "not ready", non-success HTTP
    /// and undecodable bodies alike, since the loop cannot tell them
    /// apart.
    async fn check_status(&self, uuid: &str) -> Option<String> {
        let response = self
            .client
            .get(self.config.status_url_for(uuid))
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }

        let status: JobStatus = response.json().await.ok()?;
        status.completed_url().map(str::to_string)
    }

    /// Retrieve the finished audio. Not retried.
    async fn fetch(&self, url: &str) -> TtsResult<Bytes> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TtsError::UpstreamProtocol(
                "Failed to fetch generated audio".to_string(),
            ));
        }
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl SpeechProvider for FineVoiceTts {
    fn name(&self) -> &'static str {
        "finevoice"
    }

    async fn synthesize(&self, text: &str) -> TtsResult<Bytes> {
        self.synthesize_with_language(text, None).await
    }
}

/// FineVoice error bodies carry the useful text under `message`, or
/// `error.message` on some routes.
async fn extract_error_message(response: reqwest::Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    body.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
