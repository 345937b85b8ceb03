use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::matching::stop_words::StopWords;
use crate::matching::weights::MatchWeights;
use crate::matching::KeywordMatcher;
use crate::transcribe::whisper::{self, WhisperCli};

/// Default folder of `<category>.txt` keyword lists.
pub const DEFAULT_KEYWORDS_DIR: &str = "keywords";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override individual fields after loading.
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder holding one keyword list per disease
    pub keywords_dir: PathBuf,
    /// Optional newline-delimited file of extra stop words
    pub stop_words_file: Option<PathBuf>,
    /// Scoring weights (fuzzy/exact blend and length thresholds)
    pub weights: MatchWeights,
    /// whisper executable
    pub whisper_bin: String,
    /// whisper model name (tiny, base, small, medium, large)
    pub whisper_model: String,
    /// Where whisper keeps downloaded models
    pub whisper_model_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only malformed numbers are errors.
    pub fn load() -> Result<Self> {
        let defaults = MatchWeights::default();
        let weights = MatchWeights {
            fuzzy_weight: env_f64("DISEASE_MATCH_FUZZY_WEIGHT")?.unwrap_or(defaults.fuzzy_weight),
            exact_weight: env_f64("DISEASE_MATCH_EXACT_WEIGHT")?.unwrap_or(defaults.exact_weight),
            ..defaults
        };

        Ok(Self {
            keywords_dir: env::var("DISEASE_MATCH_KEYWORDS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_KEYWORDS_DIR)),
            stop_words_file: env::var("DISEASE_MATCH_STOP_WORDS").ok().map(PathBuf::from),
            weights,
            whisper_bin: env::var("WHISPER_BIN")
                .unwrap_or_else(|_| whisper::DEFAULT_WHISPER_BIN.to_string()),
            whisper_model: env::var("WHISPER_MODEL")
                .unwrap_or_else(|_| whisper::DEFAULT_MODEL.to_string()),
            whisper_model_dir: env::var("WHISPER_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| whisper::default_model_dir()),
        })
    }

    /// Check that the scoring weights keep scores within 0-100.
    pub fn require_valid_weights(&self) -> Result<()> {
        self.weights.validate().context(
            "Invalid DISEASE_MATCH_FUZZY_WEIGHT / DISEASE_MATCH_EXACT_WEIGHT in environment",
        )
    }

    /// Check that the keyword folder exists.
    /// Scoring itself tolerates a missing folder; listing categories does not.
    pub fn require_keywords_dir(&self) -> Result<()> {
        if !self.keywords_dir.is_dir() {
            anyhow::bail!(
                "Keyword folder '{}' not found.\n\
                 Create it with one <disease>.txt file per category, or set \
                 DISEASE_MATCH_KEYWORDS_DIR.",
                self.keywords_dir.display()
            );
        }
        Ok(())
    }

    /// The default stop words plus any configured extras.
    pub fn stop_words(&self) -> Result<StopWords> {
        let mut stop_words = StopWords::default();
        if let Some(path) = &self.stop_words_file {
            stop_words.extend_from_file(path)?;
        }
        Ok(stop_words)
    }

    /// A matcher built from this configuration.
    pub fn matcher(&self) -> Result<KeywordMatcher> {
        self.require_valid_weights()?;
        Ok(KeywordMatcher::default()
            .with_weights(self.weights)
            .with_stop_words(self.stop_words()?))
    }

    /// A whisper transcriber built from this configuration.
    pub fn whisper(&self) -> WhisperCli {
        WhisperCli {
            bin: self.whisper_bin.clone(),
            model: self.whisper_model.clone(),
            model_dir: Some(self.whisper_model_dir.clone()),
            show_progress: true,
        }
    }
}

/// Parse an optional floating-point environment variable.
fn env_f64(key: &str) -> Result<Option<f64>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .with_context(|| format!("{key} must be a number, got '{raw}'")),
        Err(_) => Ok(None),
    }
}
