//! Real-time suggestion endpoint

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use suggest_engine::Suggestions;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub text: String,
}

/// POST /suggest — ranked word and char suggestions for the input so far
pub async fn suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<Suggestions>, ApiError> {
    debug!(len = request.text.len(), "Suggestion request");
    let suggestions = state.engine.suggest(&request.text).await?;
    Ok(Json(suggestions))
}
