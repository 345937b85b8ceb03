// Stop-word configuration for transcript tokenization.
//
// The curated list mixes plain English function words with conversational
// filler that patients use when describing a skin problem ("noticed",
// "started", "spot", "skin"). Those words show up in every recording and
// would otherwise fuzzy-match half the keyword lists.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

/// The curated stop-word list used when no other set is configured.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    // Basic English
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "is", "it",
    "its", "it's", "of", "on", "or", "so", "such", "that", "the", "their", "then", "there",
    "these", "they", "this", "to", "was", "with",
    // Pronouns / people
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "them", "theirs", "themselves",
    // Verbs / modals
    "am", "been", "being", "can", "could", "did", "do", "does", "doesn't", "doing", "don't",
    "get", "gets", "getting", "got", "gotten", "go", "goes", "going", "had", "has", "hasn't",
    "have", "haven't", "having", "isn't", "make", "makes", "making", "should", "used",
    "wasn't", "were", "weren't", "will", "would",
    // Conversational filler / context
    "about", "after", "against", "all", "almost", "also", "although", "always", "any",
    "anywhere", "because", "become", "before", "bit", "chapped", "clothes", "come", "concern",
    "cuts", "else", "especially", "even", "every", "feel", "feels", "feeling", "find", "found",
    "from", "further", "here", "how", "however", "just", "kind", "know", "like", "little",
    "look", "looks", "made", "many", "may", "more", "most", "much", "must", "now", "noticed",
    "onto", "other", "over", "own", "pexing", "quite", "read", "really", "see", "seen", "seem",
    "seemed", "show", "since", "skin", "small", "some", "sometimes", "soon", "spot", "spread",
    "started", "still", "than", "thank", "thanks", "that's", "therefore", "those", "through",
    "time", "times", "today", "too", "try", "up", "upon", "us", "very", "want", "wanted",
    "way", "well", "what", "when", "where", "which", "while", "who", "whom", "why", "work",
];

/// A set of words dropped from transcripts before matching.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOP_WORDS.iter().copied())
    }
}

impl StopWords {
    /// Build a stop-word set from arbitrary words. Words are lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// An empty set; every token survives.
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Add words to the set.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
    }

    /// Add the words of a newline-delimited file. Lines starting with `#`
    /// are comments.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stop-word file: {}", path.display()))?;
        let before = self.words.len();
        self.extend(contents.lines().filter(|l| !l.trim_start().starts_with('#')));
        Ok(self.words.len() - before)
    }
}
