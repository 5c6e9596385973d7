//! Error types for the suggestion engine

use suggest_providers::ProviderError;
use thiserror::Error;

/// Errors surfaced by the suggestion engine.
///
/// Only upstream model failures reach the caller: degenerate
/// distributions fall back to all-zero probabilities and malformed
/// candidates are discarded during cleaning.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum SuggestError {
    /// The upstream model call failed; propagated without retry
    #[error("Model request failed: {0}")]
    Model(#[from] ProviderError),
}

/// Result type alias for engine operations
pub type SuggestResult<T> = Result<T, SuggestError>;
