//! Voice-turn endpoint: transcribe an uploaded audio clip and generate
//! candidate replies to it

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use suggest_providers::ChatMessage;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FullResponse {
    pub responses: Vec<String>,
    pub adjectives: Vec<String>,
    pub transcription: String,
}

/// POST /full-response — multipart form with an `audio_file` part and a
/// `convo_history` part holding the conversation so far as a JSON array
/// of chat messages
pub async fn full_response(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FullResponse>, ApiError> {
    let mut audio: Option<(String, Vec<u8>)> = None;
    let mut convo_history: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("audio_file") => {
                let file_name = field
                    .file_name()
                    .map(sanitize_file_name)
                    .unwrap_or_else(|| "speech.wav".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                audio = Some((file_name, bytes.to_vec()));
            }
            Some("convo_history") => {
                convo_history = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        audio.ok_or_else(|| ApiError::BadRequest("missing audio_file field".to_string()))?;
    let convo = convo_history
        .ok_or_else(|| ApiError::BadRequest("missing convo_history field".to_string()))?;
    let mut history: Vec<ChatMessage> = serde_json::from_str(&convo)?;

    let speech = state
        .speech
        .as_ref()
        .ok_or_else(|| ApiError::Internal("WHISPER_API_URL is not configured".to_string()))?;

    // The speech service reads the file from the shared filesystem
    tokio::fs::create_dir_all(&state.config.upload_dir).await?;
    let audio_path = state.config.upload_dir.join(&file_name);
    tokio::fs::write(&audio_path, &bytes).await?;

    let transcription = speech.transcribe(&audio_path).await?;
    debug!("Transcribed speech: {}", transcription);
    history.push(ChatMessage::user(transcription.clone()));

    let generated = state.responder.generate(&history).await?;
    Ok(Json(FullResponse {
        responses: generated.responses,
        adjectives: generated.adjectives,
        transcription,
    }))
}

/// Uploaded names are untrusted; keep only the final path component
fn sanitize_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "speech.wav".to_string())
}
