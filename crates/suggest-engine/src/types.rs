//! Core data types for the suggestion engine

use serde::{Deserialize, Serialize};

/// A cleaned token with its normalized probability
#[derive(Debug, Clone, PartialEq)]
pub struct RankedToken {
    pub prob: f64,
    pub token: String,
}

impl RankedToken {
    pub fn new(prob: f64, token: impl Into<String>) -> Self {
        Self {
            prob,
            token: token.into(),
        }
    }
}

/// The final suggestion response: ranked completed words and ranked
/// single characters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub words: Vec<String>,
    pub chars: Vec<String>,
}

/// Truncation policy for the two suggestion lists, plus the alphabet
/// prior floor
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestPolicy {
    /// Maximum number of word suggestions
    pub word_top_k: usize,
    /// Accepted for output compatibility; the word filter truncates by
    /// rank alone and never consults this threshold
    pub word_p_threshold: f64,
    /// Maximum number of char suggestions
    pub char_top_k: usize,
    /// Probability floor for char suggestions once at least five have
    /// been collected
    pub char_p_threshold: f64,
    /// Seed probability for each of the 27 alphabet-prior entries
    pub alphabet_floor: f64,
}

impl Default for SuggestPolicy {
    fn default() -> Self {
        Self {
            word_top_k: 4,
            word_p_threshold: 0.01,
            char_top_k: 10,
            char_p_threshold: 0.001,
            alphabet_floor: 1e-4,
        }
    }
}
