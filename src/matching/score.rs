// Disease scoring — one pass over every keyword list.
//
// For each category:
//   fuzzy = average over phrases of the best partial-ratio against any token
//   exact = percentage of phrases found verbatim in the transcript
//   final = fuzzy * 0.65 + exact * 0.35
//
// Empty or missing inputs never raise: they produce a named sentinel outcome
// so the caller always has something to display.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};

use super::keywords::{load_keyword_lists, KeywordList, KeywordSourceError};
use super::similarity::{PartialRatio, Similarity};
use super::stop_words::StopWords;
use super::tokenize::{tokenize_with, TokenSet};
use super::weights::MatchWeights;

/// Tokens removed once more right before scoring, whatever stop-word set
/// built the token set.
pub const SCORING_STOP_TOKENS: &[&str] = &[
    "a", "an", "the", "is", "it", "i", "me", "my", "we", "you", "he", "she", "they", "small",
    "large",
];

/// Score for one category. All numbers are rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub category: String,
    pub final_score: f64,
    pub fuzzy_score: f64,
    pub exact_score: f64,
}

/// The top-ranked category, or a sentinel name with score 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestMatch {
    pub category: String,
    pub score: f64,
}

/// Why a scoring run produced no ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmptyReason {
    /// The transcript had no usable tokens
    NoKeywords,
    /// The keyword directory does not exist
    KeywordFolderNotFound,
    /// The keyword directory held no usable lists
    NoKeywordFiles,
}

impl EmptyReason {
    /// The sentinel category name reported in place of a best match.
    pub fn sentinel(&self) -> &'static str {
        match self {
            Self::NoKeywords => "NoKeywords",
            Self::KeywordFolderNotFound => "KeywordFolderNotFound",
            Self::NoKeywordFiles => "NoKeywordFiles",
        }
    }
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sentinel())
    }
}

/// Result of a scoring run. `Ranked` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Ranked(Vec<MatchResult>),
    Empty(EmptyReason),
}

impl MatchOutcome {
    pub fn best_match(&self) -> BestMatch {
        match self {
            Self::Ranked(results) => match results.first() {
                Some(top) => BestMatch {
                    category: top.category.clone(),
                    score: top.final_score,
                },
                None => EmptyReason::NoKeywordFiles.into(),
            },
            Self::Empty(reason) => (*reason).into(),
        }
    }

    /// Results sorted by final score, highest first. Empty for sentinels.
    pub fn ranked(&self) -> &[MatchResult] {
        match self {
            Self::Ranked(results) => results,
            Self::Empty(_) => &[],
        }
    }

    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self {
            Self::Ranked(_) => None,
            Self::Empty(reason) => Some(*reason),
        }
    }

    /// JSON shape used by `--json`: `{ best_match, ranked }`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "best_match": self.best_match(),
            "ranked": self.ranked(),
        })
    }
}

impl From<EmptyReason> for BestMatch {
    fn from(reason: EmptyReason) -> Self {
        Self {
            category: reason.sentinel().to_string(),
            score: 0.0,
        }
    }
}

/// Tokenizes transcripts and scores them against keyword lists.
pub struct KeywordMatcher {
    weights: MatchWeights,
    stop_words: StopWords,
    similarity: Box<dyn Similarity>,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            stop_words: StopWords::default(),
            similarity: Box::new(PartialRatio),
        }
    }
}

impl KeywordMatcher {
    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_similarity(mut self, similarity: Box<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn tokenize(&self, text: &str) -> TokenSet {
        tokenize_with(text, &self.stop_words)
    }

    /// Score a transcript against every list in `keyword_dir`.
    pub fn score(&self, tokens: &TokenSet, transcript: &str, keyword_dir: &Path) -> MatchOutcome {
        // Checked before touching the filesystem
        if self.scoring_tokens(tokens).is_empty() {
            return MatchOutcome::Empty(EmptyReason::NoKeywords);
        }

        let lists = match load_keyword_lists(keyword_dir) {
            Ok(lists) => lists,
            Err(e @ KeywordSourceError::MissingSource(_)) => {
                error!(error = %e, "Make sure the keyword folder exists next to the transcript tool");
                return MatchOutcome::Empty(EmptyReason::KeywordFolderNotFound);
            }
            Err(e) => {
                warn!(error = %e, "Treating unlistable keyword folder as empty");
                Vec::new()
            }
        };

        if lists.is_empty() {
            warn!(dir = %keyword_dir.display(), "No .txt files found in the keyword folder");
            return MatchOutcome::Empty(EmptyReason::NoKeywordFiles);
        }

        self.score_lists(tokens, transcript, &lists)
    }

    /// Score a transcript against keyword lists that are already loaded.
    pub fn score_lists(
        &self,
        tokens: &TokenSet,
        transcript: &str,
        lists: &[KeywordList],
    ) -> MatchOutcome {
        let extracted = self.scoring_tokens(tokens);
        if extracted.is_empty() {
            return MatchOutcome::Empty(EmptyReason::NoKeywords);
        }
        if lists.is_empty() {
            return MatchOutcome::Empty(EmptyReason::NoKeywordFiles);
        }

        let transcript = transcript.to_lowercase();
        let mut results: Vec<MatchResult> = lists
            .iter()
            .map(|list| self.score_category(list, &extracted, &transcript))
            .collect();

        // Stable: ties keep category enumeration order
        results.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(top) = results.first() {
            info!(
                categories = results.len(),
                best = %top.category,
                score = top.final_score,
                "Scored keyword lists"
            );
        }

        MatchOutcome::Ranked(results)
    }

    fn score_category(&self, list: &KeywordList, extracted: &[&str], transcript: &str) -> MatchResult {
        let phrases = list.phrases_at_least(self.weights.min_keyword_len);

        let (fuzzy, exact) = if phrases.is_empty() {
            (0.0, 0.0)
        } else {
            let sum_best: f64 = phrases
                .iter()
                .map(|phrase| {
                    extracted
                        .iter()
                        .map(|token| self.similarity.similarity(token, phrase))
                        .fold(0.0, f64::max)
                })
                .sum();
            let exact_hits = phrases
                .iter()
                .filter(|phrase| transcript.contains(**phrase))
                .count();
            let n = phrases.len() as f64;
            (sum_best / n, exact_hits as f64 / n * 100.0)
        };

        MatchResult {
            category: list.category.clone(),
            final_score: round1(self.weights.combine(fuzzy, exact)),
            fuzzy_score: round1(fuzzy),
            exact_score: round1(exact),
        }
    }

    /// Tokens long enough to score and not in `SCORING_STOP_TOKENS`.
    fn scoring_tokens<'a>(&self, tokens: &'a TokenSet) -> Vec<&'a str> {
        let stop: HashSet<&str> = SCORING_STOP_TOKENS.iter().copied().collect();
        tokens
            .iter()
            .map(String::as_str)
            .filter(|t| t.chars().count() >= self.weights.min_token_len && !stop.contains(t))
            .collect()
    }
}

/// Round to one decimal place.
///
/// Rounds the exact binary value, ties to even: 6.25 becomes 6.2 and 0.15
/// (stored just below 0.15) becomes 0.1. Scaling by ten first would
/// manufacture ties that are not there.
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Tokenize with the default stop words.
pub fn tokenize(text: &str) -> TokenSet {
    KeywordMatcher::default().tokenize(text)
}

/// Score with default weights and partial-ratio similarity.
pub fn score(tokens: &TokenSet, transcript: &str, keyword_dir: &Path) -> MatchOutcome {
    KeywordMatcher::default().score(tokens, transcript, keyword_dir)
}
