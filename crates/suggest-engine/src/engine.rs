//! Pipeline orchestration
//!
//! `SuggestionEngine` wires the stages together: prompt mode selection,
//! one batched sampling call, per-candidate cleaning, normalization with
//! the alphabet prior, and ranking into the two suggestion lists. Every
//! request is independent; the engine holds no mutable state.

use std::sync::Arc;

use suggest_providers::CompletionSampler;
use tracing::debug;

use crate::cleaner;
use crate::distribution;
use crate::error::SuggestResult;
use crate::prompt::{self, PromptMode};
use crate::ranker;
use crate::types::{RankedToken, SuggestPolicy, Suggestions};

/// The real-time text-completion suggestion engine
pub struct SuggestionEngine {
    sampler: Arc<dyn CompletionSampler>,
    policy: SuggestPolicy,
}

impl SuggestionEngine {
    /// Create an engine with the default truncation policy
    pub fn new(sampler: Arc<dyn CompletionSampler>) -> Self {
        Self::with_policy(sampler, SuggestPolicy::default())
    }

    /// Create an engine with an explicit policy
    pub fn with_policy(sampler: Arc<dyn CompletionSampler>, policy: SuggestPolicy) -> Self {
        Self { sampler, policy }
    }

    /// Produce ranked word and char suggestions for the user's input.
    ///
    /// Empty input short-circuits to the uniform alphabet fallback: no
    /// model call, no ranker truncation, all 27 entries returned as
    /// chars.
    pub async fn suggest(&self, text: &str) -> SuggestResult<Suggestions> {
        if text.is_empty() {
            return Ok(Suggestions {
                words: Vec::new(),
                chars: distribution::uniform_alphabet()
                    .into_iter()
                    .map(|t| t.token.replace(' ', ranker::SPACE_MARKER))
                    .collect(),
            });
        }

        let ranked = self.token_distribution(text).await?;
        Ok(ranker::rank(&ranked, &self.policy))
    }

    /// The normalized next-token distribution for a non-empty input:
    /// words and single characters together, ordered by probability
    pub async fn token_distribution(&self, text: &str) -> SuggestResult<Vec<RankedToken>> {
        let model_prompt = prompt::select_mode(text);
        debug!(
            mode = ?model_prompt.mode,
            temperature = model_prompt.temperature,
            "Sampling next-token distribution"
        );

        let samples = self
            .sampler
            .sample_next_token(&model_prompt.text, model_prompt.temperature)
            .await?;

        let mut cleaned: Vec<(String, f64)> = Vec::with_capacity(samples.len());
        for sample in &samples {
            // Cleaning consults the user's input, not the instruction
            // prompt sent to the model
            let Some(token) = cleaner::clean_token(&sample.text, text) else {
                continue;
            };
            // Either prompt mode asks for a standalone word, so
            // surrounding whitespace is tokenizer noise. The cleaner only
            // trims when the input ends in a space, which covers neither
            // punctuation-terminated nor mid-word input.
            let token = token.trim().to_string();
            if token.is_empty() {
                continue;
            }
            if model_prompt.mode == PromptMode::CompleteWord
                && !token.starts_with(&model_prompt.partial_word)
            {
                continue;
            }
            cleaned.push((token, sample.logprob));
        }

        debug!(
            sampled = samples.len(),
            kept = cleaned.len(),
            "Cleaned candidate set"
        );

        Ok(distribution::normalize(
            &cleaned,
            &model_prompt.partial_word,
            true,
            self.policy.alphabet_floor,
        ))
    }
}
