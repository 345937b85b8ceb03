// Transcript tokenization.
//
// Turns raw recognized speech into the set of words worth matching:
// lowercased, punctuation stripped, stop words and very short words removed.

use std::collections::BTreeSet;

use super::stop_words::StopWords;

/// Sorted set of unique transcript tokens.
pub type TokenSet = BTreeSet<String>;

/// Tokens of this many characters or fewer are dropped.
pub const MAX_DROPPED_TOKEN_LEN: usize = 2;

/// Tokenize a transcript with the given stop-word set.
pub fn tokenize_with(text: &str, stop_words: &StopWords) -> TokenSet {
    strip_punctuation(&text.to_lowercase())
        .split_whitespace()
        .filter(|word| !stop_words.contains(word))
        .filter(|word| word.chars().count() > MAX_DROPPED_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Remove everything that is neither a word character nor whitespace.
///
/// Word characters are Unicode letters, digits and the underscore, so
/// "don't" becomes "dont" and "rash," becomes "rash".
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}
