//! Route table and middleware stack

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{meta, respond, suggest};
use crate::state::AppState;

/// Build the application router.
///
/// CORS is wide open: the browser-based keyboard UI is served from a
/// different origin than this API.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(meta::home))
        .route("/user_name", get(meta::user_name))
        .route("/suggest", post(suggest::suggest))
        .route("/full-response", post(respond::full_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
