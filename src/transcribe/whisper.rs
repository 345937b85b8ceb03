// Whisper transcription via the `whisper` command-line tool.
//
// Runs the recognizer as a child process, asks for plain-text output in a
// scratch directory, and reads back `<input stem>.txt`. The model is picked
// by name (tiny, base, small, medium, large) and downloaded by whisper itself.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing::{debug, info};

use super::traits::{non_empty_transcript, Transcriber};

/// Default whisper model name.
pub const DEFAULT_MODEL: &str = "small";

/// Default executable name, resolved through PATH.
pub const DEFAULT_WHISPER_BIN: &str = "whisper";

/// Returns whisper's own model cache: ~/.cache/whisper on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("whisper")
}

/// Transcriber backed by an installed `whisper` executable.
pub struct WhisperCli {
    /// Executable to run (default "whisper")
    pub bin: String,
    /// Model name passed as `--model`
    pub model: String,
    /// Optional `--model_dir` for downloaded weights
    pub model_dir: Option<PathBuf>,
    /// Show a spinner while the child runs
    pub show_progress: bool,
}

impl Default for WhisperCli {
    fn default() -> Self {
        Self {
            bin: DEFAULT_WHISPER_BIN.to_string(),
            model: DEFAULT_MODEL.to_string(),
            model_dir: None,
            show_progress: false,
        }
    }
}

impl WhisperCli {
    /// Build the command line for one input file.
    fn command(&self, input: &Path, output_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.arg(input)
            .args(["--model", self.model.as_str(), "--output_format", "txt", "--output_dir"])
            .arg(output_dir);
        if let Some(dir) = &self.model_dir {
            cmd.arg("--model_dir").arg(dir);
        }
        cmd
    }
}

impl Transcriber for WhisperCli {
    fn name(&self) -> &str {
        "whisper"
    }

    fn transcribe(&self, path: &Path) -> Result<String> {
        if !path.is_file() {
            anyhow::bail!("File not found at {}", path.display());
        }

        let stem = path
            .file_stem()
            .with_context(|| format!("Input has no file name: {}", path.display()))?;

        let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;

        info!(
            model = %self.model,
            file = %path.display(),
            "Transcribing"
        );

        let spinner = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_message(format!("Transcribing with whisper '{}'...", self.model));
            pb.enable_steady_tick(Duration::from_millis(120));
            Some(pb)
        } else {
            None
        };

        let output = self.command(path, scratch.path()).output();

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let output = output.with_context(|| {
            format!(
                "Failed to run '{}'. Is openai-whisper installed and on PATH?",
                self.bin
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: Vec<&str> = stderr.lines().rev().take(5).collect();
            let tail: Vec<&str> = tail.into_iter().rev().collect();
            anyhow::bail!(
                "whisper exited with {} while transcribing {}:\n{}",
                output.status,
                path.display(),
                tail.join("\n")
            );
        }

        // whisper keeps every dot of the stem: "visit.v2.mp4" -> "visit.v2.txt"
        let mut file_name = stem.to_os_string();
        file_name.push(".txt");
        let transcript_path = scratch.path().join(file_name);
        debug!(path = %transcript_path.display(), "Reading whisper output");

        let text = std::fs::read_to_string(&transcript_path).with_context(|| {
            format!(
                "whisper finished but wrote no transcript at {}",
                transcript_path.display()
            )
        })?;

        info!(chars = text.len(), "Transcription complete");
        non_empty_transcript(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let whisper = WhisperCli {
            model: "tiny".to_string(),
            model_dir: Some(PathBuf::from("/models")),
            ..WhisperCli::default()
        };
        let cmd = whisper.command(Path::new("visit.mp4"), Path::new("/tmp/out"));
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(cmd.get_program(), "whisper");
        assert_eq!(
            args,
            vec![
                "visit.mp4",
                "--model",
                "tiny",
                "--output_format",
                "txt",
                "--output_dir",
                "/tmp/out",
                "--model_dir",
                "/models"
            ]
        );
    }

    #[test]
    fn test_missing_input_fails_before_spawning() {
        let whisper = WhisperCli {
            bin: "/definitely/not/whisper".to_string(),
            ..WhisperCli::default()
        };
        let err = whisper.transcribe(Path::new("/no/such/clip.mp4")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_missing_binary_fails() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("clip.mp4");
        std::fs::write(&clip, b"not really video").unwrap();

        let whisper = WhisperCli {
            bin: "/definitely/not/whisper".to_string(),
            ..WhisperCli::default()
        };
        let err = whisper.transcribe(&clip).unwrap_err();
        assert!(format!("{err:#}").contains("Is openai-whisper installed"));
    }

    // Both scripts run from one test so no other spawn can hold the
    // freshly written script open while it is exec'd.
    #[cfg(unix)]
    #[test]
    fn test_fake_whisper_success_and_failure() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("visit.v2.mp4");
        std::fs::write(&clip, b"not really video").unwrap();

        let ok_script = dir.path().join("fake-whisper");
        std::fs::write(
            &ok_script,
            "#!/bin/sh\n\
             input=\"$1\"\n\
             while [ $# -gt 0 ]; do\n\
               if [ \"$1\" = \"--output_dir\" ]; then out=\"$2\"; fi\n\
               shift\n\
             done\n\
             name=$(basename \"$input\")\n\
             echo \"  I have an itchy red rash.  \" > \"$out/${name%.*}.txt\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&ok_script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let bad_script = dir.path().join("broken-whisper");
        std::fs::write(
            &bad_script,
            "#!/bin/sh\necho \"RuntimeError: model not found\" >&2\nexit 3\n",
        )
        .unwrap();
        std::fs::set_permissions(&bad_script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let whisper = WhisperCli {
            bin: ok_script.to_string_lossy().into_owned(),
            ..WhisperCli::default()
        };
        assert_eq!(whisper.transcribe(&clip).unwrap(), "I have an itchy red rash.");

        let whisper = WhisperCli {
            bin: bad_script.to_string_lossy().into_owned(),
            ..WhisperCli::default()
        };
        let err = whisper.transcribe(&clip).unwrap_err().to_string();
        assert!(err.contains("model not found"), "got: {err}");
    }

    #[test]
    fn test_default_model_dir_is_whisper_cache() {
        assert!(default_model_dir().ends_with("whisper"));
    }
}
