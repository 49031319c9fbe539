//! Splits a text block into normalized tokens.
//!
//! A token is a whitespace-delimited word, lower-cased, with every character
//! of [`STRIPPED_PUNCTUATION`] removed. Words that are empty after stripping
//! are dropped. Order is preserved so the encoder can replay the block.

/// A normalized word, the unit the coder assigns codes to.
pub type Token = String;

/// Characters removed from every word before counting.
pub const STRIPPED_PUNCTUATION: [char; 5] = ['.', ',', '!', '?', ';'];

/// Normalizes a single whitespace-free word.
///
/// Returns `None` if nothing is left after stripping punctuation.
pub fn normalize(word: &str) -> Option<Token> {
    let token: String = word
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Lazily yields the tokens of `text` in order.
pub fn tokens(text: &str) -> impl Iterator<Item = Token> + '_ {
    text.split_whitespace().filter_map(normalize)
}

/// Collects the tokens of `text` in order.
///
/// An all-whitespace or all-punctuation block yields an empty vector.
pub fn tokenize(text: &str) -> Vec<Token> {
    tokens(text).collect()
}
