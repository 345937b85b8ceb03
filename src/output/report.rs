// Transcript report — the transcript plus the words used for matching,
// written next to the recording so a clinician can check what was heard.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::matching::TokenSet;

/// Render the report body.
pub fn render_report(transcript: &str, tokens: &TokenSet) -> String {
    let words = if tokens.is_empty() {
        "No words found.".to_string()
    } else {
        tokens.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    };
    format!("--- Transcript ---\n{transcript}\n\n--- Unique Transcript Words ---\n{words}")
}

/// Write the report to `path`.
pub fn save_report(path: &Path, transcript: &str, tokens: &TokenSet) -> Result<()> {
    std::fs::write(path, render_report(transcript, tokens))
        .with_context(|| format!("Failed to save report: {}", path.display()))?;
    info!(path = %path.display(), "Saved transcript report");
    Ok(())
}

/// Default report location for a recording: `<stem>.txt` in the working
/// directory.
pub fn default_report_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_string());
    PathBuf::from(format!("{stem}.txt"))
}
