//! Splitting the normalized distribution into word and char suggestion
//! lists

use crate::types::{RankedToken, SuggestPolicy, Suggestions};

/// Display marker for the space character in char suggestions
pub const SPACE_MARKER: &str = "[space]";

/// Chars collected before the probability threshold starts to apply
const CHAR_THRESHOLD_MIN_LEN: usize = 5;

/// Split an ordered distribution into the two suggestion lists
pub fn rank(tokens: &[RankedToken], policy: &SuggestPolicy) -> Suggestions {
    Suggestions {
        words: suggested_words(tokens, policy),
        chars: suggested_chars(tokens, policy),
    }
}

/// Multi-character tokens in normalized order, truncated to
/// `word_top_k`. `word_p_threshold` is accepted on the policy but not
/// applied here; truncation is by rank alone.
fn suggested_words(tokens: &[RankedToken], policy: &SuggestPolicy) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.token.chars().count() > 1)
        .take(policy.word_top_k)
        .map(|t| t.token.clone())
        .collect()
}

/// Single-character tokens in normalized order, with the two-part
/// stopping rule plus a guard against degenerate minimum-probability
/// entries
fn suggested_chars(tokens: &[RankedToken], policy: &SuggestPolicy) -> Vec<String> {
    let min_prob = tokens.iter().map(|t| t.prob).fold(f64::INFINITY, f64::min);

    let mut chars = Vec::new();
    for entry in tokens {
        if entry.token.chars().count() != 1 {
            continue;
        }
        if (entry.prob < policy.char_p_threshold && chars.len() >= CHAR_THRESHOLD_MIN_LEN)
            || chars.len() >= policy.char_top_k
        {
            break;
        }
        if entry.prob <= min_prob {
            break;
        }
        chars.push(entry.token.replace(' ', SPACE_MARKER));
    }
    chars
}
