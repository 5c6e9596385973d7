//! Provider traits consumed by the suggestion engine and the response
//! generator
//!
//! Both traits are intentionally narrow: the engine only needs a batch of
//! single-token samples with log-probabilities, and the response generator
//! only needs plain chat completions. Tests inject deterministic
//! implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// One stochastic sample from the model: raw token text plus the
/// log-probability attached to it
#[derive(Debug, Clone, PartialEq)]
pub struct SampledToken {
    pub text: String,
    pub logprob: f64,
}

impl SampledToken {
    pub fn new(text: impl Into<String>, logprob: f64) -> Self {
        Self {
            text: text.into(),
            logprob,
        }
    }
}

/// A single turn in a conversation, in OpenAI wire format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Source of batched single-token completion samples
///
/// Implementations issue exactly one upstream request per call and return
/// the deduplicated set of (token text, log-probability) pairs observed
/// across all samples. Exact duplicates collapse to one entry; the same
/// text with a different log-probability stays distinct. Failures
/// propagate to the caller without retries.
#[async_trait]
pub trait CompletionSampler: Send + Sync {
    /// Sample a batch of single-token continuations of `prompt`
    async fn sample_next_token(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<Vec<SampledToken>, ProviderError>;
}

/// Plain chat-completion generation
#[async_trait]
pub trait ChatGenerator: Send + Sync {
    /// Generate one assistant reply for the given system prompt and history
    async fn chat(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, ProviderError>;
}
