//! Probability normalization with the alphabet-letter prior
//!
//! Raw log-probabilities become a normalized distribution over cleaned
//! tokens merged with a fixed 27-entry alphabet prior (a-z plus space).
//! The first-letter attribution is a deliberate smoothing heuristic, not a
//! probabilistic derivation: a multi-character candidate's mass also
//! counts toward the letter it starts with, so single-character
//! suggestions benefit from evidence gathered across word candidates.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::types::RankedToken;

/// The 27 alphabet-prior entries: a-z followed by space
pub fn alphabet() -> impl Iterator<Item = char> {
    ('a'..='z').chain(std::iter::once(' '))
}

/// The uniform distribution over the 27 alphabet entries, used as the
/// fallback for empty input
pub fn uniform_alphabet() -> Vec<RankedToken> {
    let count = alphabet().count();
    alphabet()
        .map(|c| RankedToken::new(1.0 / count as f64, c.to_string()))
        .collect()
}

/// Normalize cleaned (token, log-probability) candidates into an ordered
/// probability distribution.
///
/// Duplicate cleaned tokens accumulate their exponentiated mass. With the
/// alphabet merge enabled, each of the 27 entries is seeded at
/// `alphabet_floor` and additionally receives the mass of every candidate
/// whose first character — after removing `partial_word` — is that entry;
/// the alphabet entries then replace any same-key token entries. Entries
/// are divided by the total mass (all zero when the total is zero) and
/// sorted descending by probability, ties broken by ascending token order.
pub fn normalize(
    candidates: &[(String, f64)],
    partial_word: &str,
    include_alphabet: bool,
    alphabet_floor: f64,
) -> Vec<RankedToken> {
    let mut token_probs: BTreeMap<String, f64> = BTreeMap::new();
    let mut char_probs: BTreeMap<char, f64> = if include_alphabet {
        alphabet().map(|c| (c, alphabet_floor)).collect()
    } else {
        BTreeMap::new()
    };

    for (token, logprob) in candidates {
        let prob = logprob.exp();
        *token_probs.entry(token.clone()).or_insert(0.0) += prob;

        if include_alphabet {
            let stripped = token.trim();
            if stripped.is_empty() {
                continue;
            }
            let reduced = if partial_word.is_empty() {
                stripped.to_string()
            } else {
                stripped.replace(partial_word, "")
            };
            if let Some(first) = reduced.chars().next() {
                if let Some(mass) = char_probs.get_mut(&first) {
                    *mass += prob;
                }
            }
        }
    }

    if include_alphabet {
        for (c, prob) in char_probs {
            token_probs.insert(c.to_string(), prob);
        }
    }

    let total: f64 = token_probs.values().sum();
    let mut ranked: Vec<RankedToken> = token_probs
        .into_iter()
        .map(|(token, prob)| {
            let prob = if total == 0.0 { 0.0 } else { prob / total };
            RankedToken { prob, token }
        })
        .collect();

    ranked.sort_by(|a, b| match b.prob.partial_cmp(&a.prob) {
        Some(Ordering::Equal) | None => a.token.cmp(&b.token),
        Some(other) => other,
    });
    ranked
}
