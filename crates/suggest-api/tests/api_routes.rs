//! Route-level tests: the full router with deterministic model fixtures
//! behind it

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use suggest_api::{routes, AppState, ResponseGenerator, ServerConfig, SpeechClient};
use suggest_engine::{SuggestionEngine, Suggestions};
use suggest_providers::{
    ChatGenerator, ChatMessage, CompletionSampler, ProviderError, SampledToken,
};

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

struct FixtureSampler {
    samples: Vec<SampledToken>,
}

#[async_trait]
impl CompletionSampler for FixtureSampler {
    async fn sample_next_token(
        &self,
        _prompt: &str,
        _temperature: f32,
    ) -> Result<Vec<SampledToken>, ProviderError> {
        Ok(self.samples.clone())
    }
}

struct FailingSampler;

#[async_trait]
impl CompletionSampler for FailingSampler {
    async fn sample_next_token(
        &self,
        _prompt: &str,
        _temperature: f32,
    ) -> Result<Vec<SampledToken>, ProviderError> {
        Err(ProviderError::NetworkError("connection refused".to_string()))
    }
}

struct ScriptedChat {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedChat {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        }
    }
}

#[async_trait]
impl ChatGenerator for ScriptedChat {
    async fn chat(
        &self,
        _system_prompt: &str,
        _history: &[ChatMessage],
        _temperature: f32,
    ) -> Result<String, ProviderError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ProviderError::ProviderError("script exhausted".to_string()))
    }
}

fn state_with(
    sampler: Arc<dyn CompletionSampler>,
    chat_replies: &[&str],
    config: ServerConfig,
) -> AppState {
    let engine = Arc::new(SuggestionEngine::new(sampler));
    let responder = Arc::new(ResponseGenerator::new(
        Arc::new(ScriptedChat::new(chat_replies)),
        config.user_name.clone(),
    ));
    let speech = config
        .whisper_url
        .as_ref()
        .map(|url| Arc::new(SpeechClient::new(url.clone())));
    AppState::with_components(engine, responder, speech, config)
}

fn default_state(samples: &[(&str, f64)]) -> AppState {
    let sampler = Arc::new(FixtureSampler {
        samples: samples
            .iter()
            .map(|(text, lp)| SampledToken::new(*text, *lp))
            .collect(),
    });
    state_with(
        sampler,
        &[],
        ServerConfig {
            user_name: "Sam".to_string(),
            ..ServerConfig::default()
        },
    )
}

async fn body_json(body: Body) -> serde_json::Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_body(convo_history: &str) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"audio_file\"; \
             filename=\"clip.wav\"\r\nContent-Type: audio/wav\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"RIFF-fake-audio");
    body.extend_from_slice(
        format!(
            "\r\n--{BOUNDARY}\r\nContent-Disposition: form-data; \
             name=\"convo_history\"\r\n\r\n{convo_history}\r\n--{BOUNDARY}--\r\n"
        )
        .as_bytes(),
    );
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

#[tokio::test]
async fn test_home_route() {
    let app = routes::app(default_state(&[]));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("suggest-text"));
}

#[tokio::test]
async fn test_user_name_route() {
    let app = routes::app(default_state(&[]));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/user_name")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response.into_body()).await, "Sam");
}

#[tokio::test]
async fn test_suggest_route_returns_ranked_lists() {
    let app = routes::app(default_state(&[
        ("\u{0120}there", -0.3),
        ("\u{0120}world", -0.8),
    ]));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/suggest")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text": "hello "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let suggestions: Suggestions = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(suggestions.words, vec!["there", "world"]);
    assert!(!suggestions.chars.is_empty());
}

#[tokio::test]
async fn test_suggest_route_empty_text_returns_alphabet() {
    let app = routes::app(default_state(&[]));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/suggest")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text": ""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let suggestions: Suggestions = serde_json::from_slice(&bytes).unwrap();
    assert!(suggestions.words.is_empty());
    assert_eq!(suggestions.chars.len(), 27);
}

#[tokio::test]
async fn test_suggest_route_rejects_malformed_body() {
    let app = routes::app(default_state(&[]));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/suggest")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"wrong_field": 1}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_suggest_route_maps_upstream_failure_to_bad_gateway() {
    let state = state_with(
        Arc::new(FailingSampler),
        &[],
        ServerConfig {
            user_name: "Sam".to_string(),
            ..ServerConfig::default()
        },
    );
    let app = routes::app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/suggest")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text": "hello "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error = body_json(response.into_body()).await;
    assert_eq!(error["error"]["type"], "engine");
}

#[tokio::test]
async fn test_full_response_without_speech_service_is_server_error() {
    let app = routes::app(default_state(&[]));
    let (content_type, body) = multipart_body(r#"[{"role":"user","content":"hi"}]"#);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/full-response")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = body_json(response.into_body()).await;
    assert_eq!(error["error"]["type"], "internal");
}

#[tokio::test]
async fn test_full_response_missing_audio_is_bad_request() {
    let app = routes::app(default_state(&[]));
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; \
         name=\"convo_history\"\r\n\r\n[]\r\n--{BOUNDARY}--\r\n"
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/full-response")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_full_response_transcribes_and_generates_replies() {
    let mut speech_server = mockito::Server::new_async().await;
    let transcribe_mock = speech_server
        .mock("POST", "/transcribe")
        .with_status(200)
        .with_body(r#"{"transcription": "Did you end up going hiking?"}"#)
        .create_async()
        .await;

    let upload_dir = tempfile::tempdir().unwrap();
    let state = state_with(
        Arc::new(FixtureSampler { samples: vec![] }),
        &[
            "excited,annoyed,indifferent",
            "Yes! The views were incredible.",
            "No, I got dragged into errands all day.",
            "I did, it was fine.",
        ],
        ServerConfig {
            user_name: "Sam".to_string(),
            whisper_url: Some(speech_server.url()),
            upload_dir: upload_dir.path().to_path_buf(),
            ..ServerConfig::default()
        },
    );
    let app = routes::app(state);

    let (content_type, body) =
        multipart_body(r#"[{"role":"user","content":"Hey, how was your weekend?"}]"#);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/full-response")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response.into_body()).await;
    assert_eq!(payload["transcription"], "Did you end up going hiking?");
    assert_eq!(
        payload["adjectives"],
        serde_json::json!(["excited", "annoyed", "indifferent"])
    );
    assert_eq!(payload["responses"][0], "Yes! The views were incredible.");

    // The audio clip is persisted where the speech service can read it
    assert!(upload_dir.path().join("clip.wav").exists());
    transcribe_mock.assert_async().await;
}
