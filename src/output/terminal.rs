// Colored terminal output for tokens, the best match and the score table.
//
// This module handles all terminal-specific formatting. main.rs calls these
// after a scoring run; nothing here touches the matcher.

use colored::Colorize;

use crate::matching::keywords::KeywordList;
use crate::matching::{MatchOutcome, MatchResult, TokenSet};

/// Display the transcript words that go into matching.
pub fn display_tokens(tokens: &TokenSet) {
    println!(
        "\n{}",
        format!(
            "=== Found {} Unique Transcript Words (for matching) ===",
            tokens.len()
        )
        .bold()
    );
    if tokens.is_empty() {
        println!("  {}", "No words found.".dimmed());
        return;
    }
    let joined = tokens.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
    println!("  {}", joined.dimmed());
}

/// Display a short preview of the transcript.
pub fn display_transcript_preview(transcript: &str) {
    println!("\n{}", "=== Transcript ===".bold());
    println!("  {}", super::truncate_chars(transcript, 300));
}

/// Display the best match and the full ranking.
pub fn display_outcome(outcome: &MatchOutcome) {
    let best = outcome.best_match();

    println!("\n{}", "=== Most Likely Disease ===".bold());
    match outcome.empty_reason() {
        Some(reason) => println!(
            "  {} (Match Score: {}%)",
            reason.sentinel().yellow(),
            best.score
        ),
        None => println!(
            "  {} (Match Score: {}%)",
            best.category.bold(),
            colorize_score(best.score)
        ),
    }

    display_scores(outcome.ranked());
}

/// Display every category's score with a bar.
pub fn display_scores(results: &[MatchResult]) {
    if results.is_empty() {
        return;
    }

    println!("\n{}", "=== All Disease Scores ===".bold());
    println!();
    println!(
        "  {:>4}  {:<28} {:>6}  {:<22} {:>6}  {:>6}",
        "Rank".dimmed(),
        "Disease".dimmed(),
        "Score".dimmed(),
        "".dimmed(),
        "Fuzzy".dimmed(),
        "Exact".dimmed(),
    );
    println!("  {}", "-".repeat(80).dimmed());

    let bar_width: usize = 20;

    for (i, result) in results.iter().enumerate() {
        let filled = ((result.final_score / 100.0) * bar_width as f64).round() as usize;
        let filled = filled.min(bar_width);
        let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(bar_width - filled));

        println!(
            "  {:>4}. {:<28} {:>6}  {} {:>6.1}  {:>6.1}",
            i + 1,
            result.category,
            colorize_score(result.final_score),
            colorize_bar(&bar, result.final_score),
            result.fuzzy_score,
            result.exact_score,
        );
    }
    println!();
}

/// Display the keyword lists available for matching.
pub fn display_categories(lists: &[KeywordList], min_keyword_len: usize) {
    if lists.is_empty() {
        println!("No keyword lists found. Add one <disease>.txt file per category.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Keyword Lists ({} categories) ===", lists.len()).bold()
    );
    println!();
    for list in lists {
        let usable = list.phrases_at_least(min_keyword_len);
        let preview = super::truncate_chars(&usable.join(", "), 70);
        println!(
            "  {:<28} {:>4} phrases  {}",
            list.category.bold(),
            usable.len(),
            preview.dimmed()
        );
    }
    println!();
}

/// Color a score: strong matches green, weak ones dimmed.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.1}");
    if score >= 60.0 {
        text.green().bold()
    } else if score >= 30.0 {
        text.yellow()
    } else {
        text.dimmed()
    }
}

fn colorize_bar(bar: &str, score: f64) -> colored::ColoredString {
    if score >= 60.0 {
        bar.bright_green()
    } else if score >= 30.0 {
        bar.bright_yellow()
    } else {
        bar.bright_blue()
    }
}
