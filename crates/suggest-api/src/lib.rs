//! HTTP layer for the suggest-text service
//!
//! Thin axum wrapper over [`suggest_engine`]: request parsing, state
//! wiring, the speech-to-text client and the conversational responder.

pub mod config;
pub mod error;
pub mod handlers;
pub mod responder;
pub mod routes;
pub mod state;
pub mod stt;

pub use config::ServerConfig;
pub use error::ApiError;
pub use responder::{GeneratedResponses, ResponseGenerator, FALLBACK_ADJECTIVES};
pub use routes::app;
pub use state::AppState;
pub use stt::SpeechClient;
