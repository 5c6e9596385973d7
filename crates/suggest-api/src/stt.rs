//! Client for the external speech-to-text service

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

const TRANSCRIBE_TIMEOUT: Duration = Duration::from_secs(120);

/// Thin client for the transcription endpoint of a whisper-style service.
///
/// The service shares a filesystem with this process: requests carry the
/// path of the uploaded audio file, not its bytes.
pub struct SpeechClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct TranscribeRequest<'a> {
    speech_file_path: &'a str,
}

#[derive(Deserialize)]
struct TranscribeResponse {
    transcription: Option<String>,
}

impl SpeechClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(TRANSCRIBE_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.into(),
        }
    }

    /// Transcribe the audio file at `speech_file_path`
    pub async fn transcribe(&self, speech_file_path: &Path) -> Result<String, ApiError> {
        let url = format!("{}/transcribe", self.base_url.trim_end_matches('/'));
        let path = speech_file_path.to_string_lossy();
        debug!("Requesting transcription for {}", path);

        let response = self
            .client
            .post(&url)
            .json(&TranscribeRequest {
                speech_file_path: &path,
            })
            .send()
            .await
            .map_err(|e| ApiError::Transcription(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Transcription(format!(
                "speech service returned {}",
                response.status()
            )));
        }

        let body: TranscribeResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Transcription(e.to_string()))?;

        body.transcription
            .ok_or_else(|| ApiError::Transcription("response missing transcription".to_string()))
    }
}
