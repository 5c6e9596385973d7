//! Shared application state

use std::sync::Arc;

use suggest_engine::SuggestionEngine;
use suggest_providers::{ModelConfig, OpenAiProvider, ProviderError};

use crate::config::ServerConfig;
use crate::responder::ResponseGenerator;
use crate::stt::SpeechClient;

/// Everything handlers need, cheap to clone per request
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SuggestionEngine>,
    pub responder: Arc<ResponseGenerator>,
    /// Absent when no speech service is configured
    pub speech: Option<Arc<SpeechClient>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire the full production stack over one shared OpenAI provider
    pub fn new(config: ServerConfig, model: ModelConfig) -> Result<Self, ProviderError> {
        let provider = Arc::new(OpenAiProvider::new(model)?);
        let engine = Arc::new(SuggestionEngine::new(provider.clone()));
        let responder = Arc::new(ResponseGenerator::new(
            provider,
            config.user_name.clone(),
        ));
        let speech = config
            .whisper_url
            .as_ref()
            .map(|url| Arc::new(SpeechClient::new(url.clone())));
        Ok(Self {
            engine,
            responder,
            speech,
            config: Arc::new(config),
        })
    }

    /// Assemble from pre-built components; used by tests to inject
    /// deterministic model fixtures
    pub fn with_components(
        engine: Arc<SuggestionEngine>,
        responder: Arc<ResponseGenerator>,
        speech: Option<Arc<SpeechClient>>,
        config: ServerConfig,
    ) -> Self {
        Self {
            engine,
            responder,
            speech,
            config: Arc::new(config),
        }
    }
}
