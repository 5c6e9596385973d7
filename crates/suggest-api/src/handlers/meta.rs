//! Service metadata endpoints

use axum::extract::State;
use axum::Json;
use tracing::warn;

use crate::state::AppState;

/// GET / — landing text for anyone poking the service by hand
pub async fn home() -> &'static str {
    "This is the suggest-text API. POST /suggest for typing suggestions."
}

/// GET /user_name — the display name responses are written as
pub async fn user_name(State(state): State<AppState>) -> Json<String> {
    if state.config.user_name.is_empty() {
        warn!("USER_NAME is not set");
    }
    Json(state.config.user_name.clone())
}
