// Keyword matching — tokenization, fuzzy similarity and disease scoring.

pub mod keywords;
pub mod score;
pub mod similarity;
pub mod stop_words;
pub mod tokenize;
pub mod weights;

pub use score::{score, tokenize, BestMatch, EmptyReason, KeywordMatcher, MatchOutcome, MatchResult};
pub use tokenize::TokenSet;
