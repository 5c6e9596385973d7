//! OpenAI-compatible provider implementation
//!
//! Works against any endpoint speaking the OpenAI API with
//! log-probabilities on the legacy `/completions` route (OpenAI itself,
//! vLLM, llama.cpp server, ...).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio::sync::OnceCell;
use tracing::{debug, error};

use crate::config::ModelConfig;
use crate::error::ProviderError;
use crate::sampler::{ChatGenerator, ChatMessage, CompletionSampler, SampledToken};

/// Provider for OpenAI-compatible endpoints
pub struct OpenAiProvider {
    config: ModelConfig,
    client: Client,
    discovered_model: OnceCell<String>,
}

impl OpenAiProvider {
    /// Create a provider for the configured endpoint
    pub fn new(config: ModelConfig) -> Result<Self, ProviderError> {
        if config.base_url.is_empty() {
            return Err(ProviderError::ConfigError(
                "Model base URL is required".to_string(),
            ));
        }

        Ok(Self {
            config,
            client: Client::new(),
            discovered_model: OnceCell::new(),
        })
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.config.api_key.is_empty() {
            builder
        } else {
            builder.header("Authorization", format!("Bearer {}", self.config.api_key))
        }
    }

    /// Resolve the model id: the configured one, or the first model the
    /// endpoint lists, discovered once and cached for the process lifetime
    async fn resolve_model(&self) -> Result<String, ProviderError> {
        if let Some(model) = &self.config.model {
            return Ok(model.clone());
        }

        let model = self
            .discovered_model
            .get_or_try_init(|| self.first_listed_model())
            .await?;
        Ok(model.clone())
    }

    async fn first_listed_model(&self) -> Result<String, ProviderError> {
        debug!("Discovering model id from {}/models", self.config.base_url);

        let response = self
            .authorize(self.client.get(format!("{}/models", self.config.base_url)))
            .send()
            .await?;
        let response = Self::check_status(response, "models").await?;

        let models: ModelListResponse = response.json().await?;
        models
            .data
            .into_iter()
            .map(|m| m.id)
            .next()
            .ok_or_else(|| {
                ProviderError::ModelNotAvailable("endpoint lists no models".to_string())
            })
    }

    async fn check_status(
        response: reqwest::Response,
        endpoint: &str,
    ) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        error!("{} request failed ({}): {}", endpoint, status, error_text);

        match status.as_u16() {
            401 => Err(ProviderError::AuthError),
            429 => Err(ProviderError::RateLimited(60)),
            _ => Err(ProviderError::ProviderError(format!(
                "API error: {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl CompletionSampler for OpenAiProvider {
    async fn sample_next_token(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<Vec<SampledToken>, ProviderError> {
        let model = self.resolve_model().await?;

        let request = CompletionsRequest {
            model: &model,
            prompt,
            max_tokens: 1,
            temperature,
            logprobs: self.config.logprob_depth,
            seed: self.config.seed,
            n: self.config.sample_count,
            best_of: self.config.sample_count,
        };

        debug!(
            "Sampling {} single-token completions at temperature {}",
            self.config.sample_count, temperature
        );

        let response = self
            .authorize(
                self.client
                    .post(format!("{}/completions", self.config.base_url))
                    .header("Content-Type", "application/json"),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Completions request failed: {}", e);
                ProviderError::from(e)
            })?;
        let response = Self::check_status(response, "completions").await?;

        let completions: CompletionsResponse = response.json().await?;
        Ok(dedup_samples(completions.choices))
    }
}

#[async_trait]
impl ChatGenerator for OpenAiProvider {
    async fn chat(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, ProviderError> {
        let model = self.resolve_model().await?;

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::new("system", system_prompt));
        messages.extend_from_slice(history);

        let request = ChatCompletionsRequest {
            model: &model,
            messages,
            temperature,
        };

        debug!("Sending chat request with {} turns", history.len());

        let response = self
            .authorize(
                self.client
                    .post(format!("{}/chat/completions", self.config.base_url))
                    .header("Content-Type", "application/json"),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Chat request failed: {}", e);
                ProviderError::from(e)
            })?;
        let response = Self::check_status(response, "chat/completions").await?;

        let chat: ChatCompletionsResponse = response.json().await?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .map(|m| m.content)
            .ok_or_else(|| ProviderError::ProviderError("No content in response".to_string()))
    }
}

/// Collapse exact (text, log-probability) duplicates, keeping first-seen
/// order. Choices without a log-probability are dropped: a malformed
/// sample never aborts the batch.
fn dedup_samples(choices: Vec<CompletionChoice>) -> Vec<SampledToken> {
    let mut seen: HashSet<(String, u64)> = HashSet::new();
    let mut samples = Vec::new();

    for choice in choices {
        let logprob = match choice
            .logprobs
            .as_ref()
            .and_then(|l| l.token_logprobs.first())
            .copied()
            .flatten()
        {
            Some(lp) => lp,
            None => continue,
        };

        if seen.insert((choice.text.clone(), logprob.to_bits())) {
            samples.push(SampledToken::new(choice.text, logprob));
        }
    }

    samples
}

/// OpenAI completions request format
#[derive(Debug, Serialize)]
struct CompletionsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    logprobs: u32,
    seed: u64,
    n: u32,
    best_of: u32,
}

/// OpenAI completions response format
#[derive(Debug, Deserialize)]
struct CompletionsResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
    logprobs: Option<ChoiceLogprobs>,
}

#[derive(Debug, Deserialize)]
struct ChoiceLogprobs {
    token_logprobs: Vec<Option<f64>>,
}

/// OpenAI chat completions request format
#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

/// OpenAI chat completions response format
#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

/// OpenAI model list response format
#[derive(Debug, Deserialize)]
struct ModelListResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}
