// Transcriber trait — the swap-ready abstraction.
//
// The matcher only ever sees text. Where that text comes from (a local
// whisper install, a transcript someone already wrote down) is hidden
// behind this trait.

use std::path::Path;

use anyhow::{Context, Result};

/// Trait for turning an audio/video (or text) file into a transcript.
pub trait Transcriber {
    /// Short name for logs and terminal output.
    fn name(&self) -> &str;

    /// Produce the transcript for the file at `path`.
    fn transcribe(&self, path: &Path) -> Result<String>;
}

/// Reads a transcript that already exists as a text file.
pub struct TextFileTranscriber;

impl Transcriber for TextFileTranscriber {
    fn name(&self) -> &str {
        "text file"
    }

    fn transcribe(&self, path: &Path) -> Result<String> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {}", path.display()))?;
        non_empty_transcript(text)
    }
}

/// Reject transcripts with nothing in them.
pub fn non_empty_transcript(text: String) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        anyhow::bail!("No transcript generated — the recognizer returned empty text");
    }
    Ok(trimmed.to_string())
}
