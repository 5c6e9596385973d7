//! Real-time text-completion suggestion engine
//!
//! Given partial user input, queries a language model for a batch of
//! stochastic single-token samples and derives two ranked suggestion
//! lists — completed words and single characters — for an autocomplete
//! UI.
//!
//! # Pipeline
//!
//! 1. **Prompt mode selection** ([`prompt`]): a trailing space or
//!    punctuation character selects next-word prediction; otherwise the
//!    final partial word is completed via a few-shot instruction.
//! 2. **Sampling** ([`suggest_providers::CompletionSampler`]): one
//!    batched request returning deduplicated (token, log-probability)
//!    pairs.
//! 3. **Cleaning** ([`cleaner`]): each raw token is normalized or
//!    rejected.
//! 4. **Normalization** ([`distribution`]): exponentiated masses are
//!    accumulated, merged with the 27-entry alphabet prior and divided by
//!    the total.
//! 5. **Ranking** ([`ranker`]): the distribution is split into the word
//!    and char lists under independent truncation policies.
//!
//! Sampling is inherently stochastic; every stage after it is
//! deterministic, so identical candidate sets produce identical output.

pub mod cleaner;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod prompt;
pub mod ranker;
pub mod types;

pub use engine::SuggestionEngine;
pub use error::{SuggestError, SuggestResult};
pub use prompt::{ModelPrompt, PromptMode, NEXT_WORD_TEMPERATURE, WORD_COMPLETION_TEMPERATURE};
pub use ranker::SPACE_MARKER;
pub use types::{RankedToken, SuggestPolicy, Suggestions};
