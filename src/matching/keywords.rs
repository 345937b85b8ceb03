// Keyword list loading.
//
// Each category lives in its own `<category>.txt` file, one lowercase phrase
// per line. A folder of these files is the whole "disease database".

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// A named category and its keyword phrases, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordList {
    pub category: String,
    pub phrases: Vec<String>,
}

impl KeywordList {
    pub fn new(category: impl Into<String>, phrases: Vec<String>) -> Self {
        Self {
            category: category.into(),
            phrases,
        }
    }

    /// Parse newline-delimited phrases. Lines are trimmed and lowercased;
    /// blank lines are dropped.
    pub fn parse(category: impl Into<String>, contents: &str) -> Self {
        let phrases = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self::new(category, phrases)
    }

    /// Read a single `<category>.txt` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let category = path
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Keyword file has no usable name: {}", path.display()))?;
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read keyword file: {}", path.display()))?;
        Ok(Self::parse(category, &contents))
    }

    /// Phrases of at least `min_len` characters.
    pub fn phrases_at_least(&self, min_len: usize) -> Vec<&str> {
        self.phrases
            .iter()
            .map(String::as_str)
            .filter(|p| p.chars().count() >= min_len)
            .collect()
    }
}

/// The keyword source could not be opened at all.
#[derive(Debug)]
pub enum KeywordSourceError {
    /// The directory does not exist (or is not a directory).
    MissingSource(PathBuf),
    /// The directory exists but could not be listed.
    Unlistable(PathBuf, std::io::Error),
}

impl fmt::Display for KeywordSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource(dir) => {
                write!(f, "Keyword folder '{}' not found", dir.display())
            }
            Self::Unlistable(dir, e) => {
                write!(f, "Keyword folder '{}' could not be listed: {e}", dir.display())
            }
        }
    }
}

impl std::error::Error for KeywordSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingSource(_) => None,
            Self::Unlistable(_, e) => Some(e),
        }
    }
}

/// Load every `<category>.txt` list in a directory, sorted by file name.
///
/// Files that can't be read are logged and skipped. An empty result is not
/// an error here; the matcher decides what "no lists" means.
pub fn load_keyword_lists(dir: &Path) -> std::result::Result<Vec<KeywordList>, KeywordSourceError> {
    if !dir.is_dir() {
        return Err(KeywordSourceError::MissingSource(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| KeywordSourceError::Unlistable(dir.to_path_buf(), e))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut lists = Vec::with_capacity(paths.len());
    for path in paths {
        match KeywordList::from_file(&path) {
            Ok(list) => {
                debug!(
                    category = %list.category,
                    phrases = list.phrases.len(),
                    "Loaded keyword list"
                );
                lists.push(list);
            }
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(file = %path.display(), error = %reason, "Skipping keyword file");
            }
        }
    }

    Ok(lists)
}
