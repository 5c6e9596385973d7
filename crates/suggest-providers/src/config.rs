//! Model endpoint configuration
//!
//! Built once at process start and passed by reference into the provider;
//! nothing here is read from the environment after construction.

use crate::error::ProviderError;

/// Default number of independent samples requested per suggestion call.
///
/// This is an accuracy/cost knob: more samples approximate the next-token
/// distribution better at the price of a larger batched request.
pub const DEFAULT_SAMPLE_COUNT: u32 = 256;

/// Default number of top log-probabilities requested per sampled token
pub const DEFAULT_LOGPROB_DEPTH: u32 = 5;

/// Fixed sampling seed sent with every request
pub const DEFAULT_SEED: u64 = 0;

/// Configuration for an OpenAI-compatible completion endpoint
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL of the API, e.g. `http://localhost:8000/v1`
    pub base_url: String,
    /// API key; may be empty for unauthenticated local servers
    pub api_key: String,
    /// Model id to use; when `None` the first model listed by the
    /// endpoint is discovered and cached
    pub model: Option<String>,
    /// Samples per batched completion request
    pub sample_count: u32,
    /// Log-probability depth per sampled token
    pub logprob_depth: u32,
    /// Sampling seed
    pub seed: u64,
}

impl ModelConfig {
    /// Create a configuration for the given endpoint
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(ProviderError::ConfigError(
                "Model base URL is required".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model: None,
            sample_count: DEFAULT_SAMPLE_COUNT,
            logprob_depth: DEFAULT_LOGPROB_DEPTH,
            seed: DEFAULT_SEED,
        })
    }

    /// Build the configuration from `OPENAI_BASE_URL`, `OPENAI_API_KEY`
    /// and optionally `OPENAI_MODEL`
    pub fn from_env() -> Result<Self, ProviderError> {
        let base_url = std::env::var("OPENAI_BASE_URL")
            .map_err(|_| ProviderError::ConfigError("OPENAI_BASE_URL is not set".to_string()))?;
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();

        let mut config = Self::new(base_url, api_key)?;
        config.model = std::env::var("OPENAI_MODEL").ok().filter(|m| !m.is_empty());
        Ok(config)
    }

    /// Use a fixed model id instead of endpoint discovery
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the per-request sample count
    pub fn with_sample_count(mut self, sample_count: u32) -> Self {
        self.sample_count = sample_count;
        self
    }
}
