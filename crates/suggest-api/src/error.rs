//! API error types and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use suggest_engine::SuggestError;
use suggest_providers::ProviderError;
use thiserror::Error;

/// Errors surfaced by the HTTP layer
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Suggestion engine error: {0}")]
    Engine(#[from] SuggestError),

    #[error("Model provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Serialization(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(_) | ApiError::Provider(_) | ApiError::Transcription(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Io(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Engine(_) => "engine",
            ApiError::Provider(_) => "provider",
            ApiError::Transcription(_) => "transcription",
            ApiError::Serialization(_) => "serialization",
            ApiError::Io(_) => "io",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        let body = Json(json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_maps_to_400() {
        let err = ApiError::BadRequest("missing field".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "bad_request");
    }

    #[test]
    fn test_upstream_errors_map_to_502() {
        let err = ApiError::Provider(ProviderError::NetworkError("refused".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = ApiError::Transcription("unreachable".to_string());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_errors_map_to_500() {
        let err = ApiError::Internal("speech service not configured".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
