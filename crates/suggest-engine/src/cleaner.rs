//! Token cleaning: raw model output to canonical suggestion tokens
//!
//! Cleaning is a pure, total function: malformed input yields `None`,
//! never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// BPE word-boundary marker emitted by GPT-style tokenizers
const WORD_BOUNDARY_MARK: char = '\u{0120}'; // Ġ
/// BPE newline marker
const NEWLINE_MARK: char = '\u{010A}'; // Ċ

static SYMBOLS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\W_]+$").expect("valid symbols pattern"));
static PSEUDO_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*<.*>").expect("valid pseudo-tag pattern"));

/// Normalize a raw model-emitted token, or reject it with `None`.
///
/// Rules, in order:
/// 1. reject tokens that are entirely non-word characters, or that look
///    like `<...>` control markers;
/// 2. replace BPE space/newline marker glyphs with an ordinary space;
/// 3. drop characters outside the standard printable set;
/// 4. trim surrounding whitespace only when the user's prompt ends in a
///    space (a mid-word continuation keeps a meaningful leading space);
/// 5. reject the empty result, lowercase the rest.
pub fn clean_token(raw: &str, prompt: &str) -> Option<String> {
    let trimmed = raw.trim();
    if SYMBOLS_ONLY.is_match(trimmed) || PSEUDO_TAG.is_match(trimmed) {
        return None;
    }

    let mut token: String = raw
        .replace(WORD_BOUNDARY_MARK, " ")
        .replace(NEWLINE_MARK, " ");
    token.retain(is_printable);

    if prompt.ends_with(' ') {
        token = token.trim().to_string();
    }

    if token.is_empty() {
        None
    } else {
        Some(token.to_lowercase())
    }
}

/// Python's `string.printable` set: ASCII alphanumerics, punctuation and
/// the six whitespace characters
fn is_printable(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_ascii_punctuation()
        || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}
