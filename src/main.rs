use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use disease_match::config::Config;
use disease_match::matching::keywords::load_keyword_lists;
use disease_match::output::{report, terminal};
use disease_match::transcribe::traits::{TextFileTranscriber, Transcriber};

/// disease-match: transcribe a symptom recording and rank likely skin diseases.
///
/// Scores the transcript against one keyword list per disease using fuzzy
/// and exact phrase matching.
#[derive(Parser)]
#[command(name = "disease-match", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe a recording (or read a transcript) and rank diseases
    Match {
        /// Path to a video/audio file, or a text transcript with --transcript
        input: PathBuf,

        /// Treat INPUT as an existing text transcript instead of a recording
        #[arg(long)]
        transcript: bool,

        /// Whisper model (tiny, base, small, medium, large)
        #[arg(long)]
        model: Option<String>,

        /// Where to save the transcript report (default: <input stem>.txt)
        #[arg(long, alias = "output_file")]
        output_file: Option<PathBuf>,

        /// Folder of <disease>.txt keyword lists
        #[arg(long)]
        keywords_dir: Option<PathBuf>,

        /// Print the result as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show the words a transcript contributes to matching
    Tokens {
        /// Path to a text transcript
        transcript: PathBuf,
    },

    /// List the keyword lists in the keyword folder
    Categories {
        /// Folder of <disease>.txt keyword lists
        #[arg(long)]
        keywords_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("disease_match=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            input,
            transcript,
            model,
            output_file,
            keywords_dir,
            json,
        } => {
            let mut config = Config::load()?;
            if let Some(model) = model {
                config.whisper_model = model;
            }
            if let Some(dir) = keywords_dir {
                config.keywords_dir = dir;
            }
            let matcher = config.matcher()?;

            let transcriber: Box<dyn Transcriber> = if transcript {
                Box::new(TextFileTranscriber)
            } else {
                Box::new(config.whisper())
            };
            info!(source = transcriber.name(), input = %input.display(), "Reading transcript");
            let text = transcriber.transcribe(&input)?;

            let tokens = matcher.tokenize(&text);
            let outcome = matcher.score(&tokens, &text, &config.keywords_dir);

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
            } else {
                terminal::display_transcript_preview(&text);
                terminal::display_tokens(&tokens);
                terminal::display_outcome(&outcome);
            }

            // A transcript input is never overwritten by its own report
            let report_path = match (output_file, transcript) {
                (Some(path), _) => Some(path),
                (None, false) => Some(report::default_report_path(&input)),
                (None, true) => None,
            };
            if let Some(path) = report_path {
                match report::save_report(&path, &text, &tokens) {
                    Ok(()) if !json => {
                        println!("Transcript and keywords saved to: {}", path.display());
                    }
                    Ok(()) => {}
                    Err(e) => {
                        let reason = format!("{e:#}");
                        warn!(error = %reason, "Report not saved");
                        eprintln!("{} {reason}", "Warning:".yellow());
                    }
                }
            }
        }

        Commands::Tokens { transcript } => {
            let config = Config::load()?;
            let matcher = config.matcher()?;
            let text = TextFileTranscriber.transcribe(&transcript)?;
            terminal::display_tokens(&matcher.tokenize(&text));
        }

        Commands::Categories { keywords_dir } => {
            let mut config = Config::load()?;
            if let Some(dir) = keywords_dir {
                config.keywords_dir = dir;
            }
            config.require_keywords_dir()?;
            let lists = load_keyword_lists(&config.keywords_dir)?;
            terminal::display_categories(&lists, config.weights.min_keyword_len);
        }
    }

    Ok(())
}
