//! FineVoice poller tests
//!
//! Drive the submit → poll → fetch state machine against wiremock
//! backends with a counting sleeper instead of real timers, so the whole
//! attempt budget runs in milliseconds.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voice_relay::core::tts::finevoice::{FineVoiceConfig, FineVoiceTts, Sleeper};
use voice_relay::core::tts::{SpeechProvider, TtsError};

/// Records sleep calls and returns immediately.
#[derive(Default)]
struct CountingSleeper {
    slept: AtomicU32,
}

#[async_trait]
impl Sleeper for CountingSleeper {
    async fn sleep(&self, _period: Duration) {
        self.slept.fetch_add(1, Ordering::SeqCst);
    }
}

fn test_config(server: &MockServer, max_attempts: u32) -> FineVoiceConfig {
    FineVoiceConfig {
        api_key: "test_key".to_string(),
        voice_model: "danny21-321536".to_string(),
        converter_url: server.uri(),
        status_url: server.uri(),
        poll_interval: Duration::from_millis(500),
        max_poll_attempts: max_attempts,
    }
}

fn tts_with_sleeper(
    server: &MockServer,
    max_attempts: u32,
) -> (FineVoiceTts, Arc<CountingSleeper>) {
    let sleeper = Arc::new(CountingSleeper::default());
    let tts = FineVoiceTts::with_sleeper(
        test_config(server, max_attempts),
        reqwest::Client::new(),
        sleeper.clone(),
    );
    (tts, sleeper)
}

async fn mount_submit(server: &MockServer, uuid: &str) {
    Mock::given(method("POST"))
        .and(path("/api/fsmstexttospeech"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uuid": uuid })))
        .mount(server)
        .await;
}

async fn count_status_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path().contains("checkfilechangestatus"))
        .count()
}

#[tokio::test]
async fn test_completes_after_pending_attempts() {
    let server = MockServer::start().await;
    mount_submit(&server, "job-1").await;

    // Two "not ready" responses, then completion
    Mock::given(method("GET"))
        .and(path("/api/checkfilechangestatus/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 1 })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/checkfilechangestatus/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 3,
            "url": format!("{}/files/out.mp3", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/out.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"audio-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let (tts, sleeper) = tts_with_sleeper(&server, 60);
    let audio = tts.synthesize("hello").await.unwrap();

    assert_eq!(&audio[..], b"audio-bytes");
    // One sleep per "not ready" attempt, none after completion
    assert_eq!(sleeper.slept.load(Ordering::SeqCst), 2);
    assert_eq!(count_status_requests(&server).await, 3);
}

#[tokio::test]
async fn test_timeout_exhausts_attempt_budget() {
    let server = MockServer::start().await;
    mount_submit(&server, "job-2").await;

    Mock::given(method("GET"))
        .and(path("/api/checkfilechangestatus/job-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 1 })))
        .mount(&server)
        .await;

    let (tts, sleeper) = tts_with_sleeper(&server, 60);
    let err = tts.synthesize("hello").await.unwrap_err();

    assert!(matches!(err, TtsError::Timeout(_)));
    // Exactly the budget, never more
    assert_eq!(count_status_requests(&server).await, 60);
    assert_eq!(sleeper.slept.load(Ordering::SeqCst), 60);
}

#[tokio::test]
async fn test_submit_without_uuid_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/fsmstexttospeech"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (tts, _) = tts_with_sleeper(&server, 60);
    let err = tts.synthesize("hello").await.unwrap_err();

    match err {
        TtsError::UpstreamProtocol(msg) => assert!(msg.contains("uuid")),
        other => panic!("expected UpstreamProtocol, got: {other:?}"),
    }
    // No polling ever happened
    assert_eq!(count_status_requests(&server).await, 0);
}

#[tokio::test]
async fn test_submit_error_passes_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/fsmstexttospeech"))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({ "message": "insufficient credits" })),
        )
        .mount(&server)
        .await;

    let (tts, _) = tts_with_sleeper(&server, 60);
    let err = tts.synthesize("hello").await.unwrap_err();

    match err {
        TtsError::UpstreamHttp { status, message } => {
            assert_eq!(status, 402);
            assert_eq!(message, "insufficient credits");
        }
        other => panic!("expected UpstreamHttp, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_transient_poll_failures_are_retried() {
    let server = MockServer::start().await;
    mount_submit(&server, "job-3").await;

    // Status endpoint falls over twice before answering
    Mock::given(method("GET"))
        .and(path("/api/checkfilechangestatus/job-3"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/checkfilechangestatus/job-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 3,
            "url": format!("{}/files/out.mp3", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/out.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"recovered".to_vec()))
        .mount(&server)
        .await;

    let (tts, _) = tts_with_sleeper(&server, 60);
    let audio = tts.synthesize("hello").await.unwrap();

    assert_eq!(&audio[..], b"recovered");
    assert_eq!(count_status_requests(&server).await, 3);
}

#[tokio::test]
async fn test_completion_without_url_keeps_polling() {
    let server = MockServer::start().await;
    mount_submit(&server, "job-4").await;

    // Terminal status but no result URL: not complete
    Mock::given(method("GET"))
        .and(path("/api/checkfilechangestatus/job-4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 3 })))
        .mount(&server)
        .await;

    let (tts, _) = tts_with_sleeper(&server, 4);
    let err = tts.synthesize("hello").await.unwrap_err();

    assert!(matches!(err, TtsError::Timeout(_)));
    assert_eq!(count_status_requests(&server).await, 4);
}

#[tokio::test]
async fn test_fetch_failure_is_not_retried() {
    let server = MockServer::start().await;
    mount_submit(&server, "job-5").await;

    Mock::given(method("GET"))
        .and(path("/api/checkfilechangestatus/job-5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 3,
            "url": format!("{}/files/broken.mp3", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/broken.mp3"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (tts, _) = tts_with_sleeper(&server, 60);
    let err = tts.synthesize("hello").await.unwrap_err();

    match err {
        TtsError::UpstreamProtocol(msg) => assert!(msg.contains("fetch")),
        other => panic!("expected UpstreamProtocol, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_english_text_submits_english_language() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/fsmstexttospeech"))
        .and(body_partial_json(json!({
            "speech": "hello",
            "Parameter": { "languageCode": "en-US" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uuid": "job-en" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/checkfilechangestatus/job-en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 3,
            "url": format!("{}/files/en.mp3", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/en.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"audio".to_vec()))
        .mount(&server)
        .await;

    let (tts, _) = tts_with_sleeper(&server, 60);
    tts.synthesize("hello").await.unwrap();
}

#[tokio::test]
async fn test_explicit_language_overrides_inference() {
    let server = MockServer::start().await;

    // English text, but the caller pins Hebrew
    Mock::given(method("POST"))
        .and(path("/api/fsmstexttospeech"))
        .and(body_partial_json(json!({
            "Parameter": { "languageCode": "he-IL" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uuid": "job-he" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/checkfilechangestatus/job-he"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 3,
            "url": format!("{}/files/he.mp3", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/he.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"audio".to_vec()))
        .mount(&server)
        .await;

    let (tts, _) = tts_with_sleeper(&server, 60);
    tts.synthesize_with_language("hi", Some("he-IL")).await.unwrap();
}
