//! Language-model provider layer for suggest-text
//!
//! Exposes the two narrow seams the rest of the workspace consumes:
//!
//! - [`CompletionSampler`]: one batched request for hundreds of stochastic
//!   single-token samples with log-probabilities, deduplicated.
//! - [`ChatGenerator`]: plain chat completions for the conversational
//!   response generator.
//!
//! [`OpenAiProvider`] implements both against any OpenAI-compatible
//! endpoint. Configuration is an explicit [`ModelConfig`] value built once
//! at process start; the provider holds no hidden global state.

pub mod config;
pub mod error;
pub mod openai;
pub mod sampler;

pub use config::{ModelConfig, DEFAULT_LOGPROB_DEPTH, DEFAULT_SAMPLE_COUNT, DEFAULT_SEED};
pub use error::ProviderError;
pub use openai::OpenAiProvider;
pub use sampler::{ChatGenerator, ChatMessage, CompletionSampler, SampledToken};
