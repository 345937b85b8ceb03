// Composition tests — verifying that the pieces chain together correctly.
//
// These tests exercise the data flow between modules:
//   transcript file -> TokenSet -> scoring against keywords/ -> report
// using the keyword lists shipped in the repository. No whisper install is
// needed; transcripts are read through TextFileTranscriber.

use std::path::{Path, PathBuf};

use disease_match::matching::keywords::load_keyword_lists;
use disease_match::matching::KeywordMatcher;
use disease_match::output::report::{render_report, save_report};
use disease_match::transcribe::traits::{TextFileTranscriber, Transcriber};

fn bundled_keywords() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("keywords")
}

fn best_for(text: &str) -> (String, f64) {
    let matcher = KeywordMatcher::default();
    let tokens = matcher.tokenize(text);
    let best = matcher.score(&tokens, text, &bundled_keywords()).best_match();
    (best.category, best.score)
}

// ============================================================
// Chain: bundled keyword lists
// ============================================================

#[test]
fn bundled_lists_load_in_name_order() {
    let lists = load_keyword_lists(&bundled_keywords()).unwrap();
    let names: Vec<&str> = lists.iter().map(|l| l.category.as_str()).collect();
    assert_eq!(names, vec!["acne", "eczema", "hives", "psoriasis"]);
    assert!(lists.iter().all(|l| !l.phrases.is_empty()));
}

// ============================================================
// Chain: transcript -> tokens -> ranking
// ============================================================

#[test]
fn psoriasis_description_ranks_psoriasis_first() {
    let (category, score) = best_for(
        "I have these silvery scales and thick red patches on my elbows and knees, \
         and my scalp is flaking.",
    );
    assert_eq!(category, "psoriasis");
    assert!(score > 50.0, "got {score}");
}

#[test]
fn acne_description_ranks_acne_first() {
    let (category, _) = best_for(
        "My face keeps breaking out with pimples and blackheads, and the oily \
         forehead bumps leave scarring.",
    );
    assert_eq!(category, "acne");
}

#[test]
fn hives_description_ranks_hives_first() {
    let text = "Itchy welts appeared suddenly after lunch, a raised bumps kind of \
                allergic reaction that comes and goes.";
    let matcher = KeywordMatcher::default();
    let tokens = matcher.tokenize(text);
    let outcome = matcher.score(&tokens, text, &bundled_keywords());

    let top = &outcome.ranked()[0];
    assert_eq!(top.category, "hives");
    // 6 of the 9 hives phrases appear verbatim
    assert_eq!(top.exact_score, 66.7);
    assert_eq!(outcome.ranked().len(), 4);
}

#[test]
fn eczema_description_ranks_eczema_first() {
    let (category, _) = best_for(
        "Dry skin that is cracked and itchy, with itching at night behind the \
         knees and in the elbow creases.",
    );
    assert_eq!(category, "eczema");
}

// ============================================================
// Chain: transcript file -> report file
// ============================================================

#[test]
fn transcript_file_round_trip_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let transcript_path = dir.path().join("visit.txt");
    std::fs::write(
        &transcript_path,
        "  Pimples and blackheads all over my chin.\n",
    )
    .unwrap();

    let text = TextFileTranscriber.transcribe(&transcript_path).unwrap();
    let matcher = KeywordMatcher::default();
    let tokens = matcher.tokenize(&text);
    let outcome = matcher.score(&tokens, &text, &bundled_keywords());
    assert_eq!(outcome.best_match().category, "acne");

    let report_path = dir.path().join("visit-report.txt");
    save_report(&report_path, &text, &tokens).unwrap();
    let saved = std::fs::read_to_string(&report_path).unwrap();

    assert_eq!(saved, render_report(&text, &tokens));
    assert!(saved.starts_with("--- Transcript ---\nPimples and blackheads all over my chin.\n\n"));
    assert!(saved.ends_with("--- Unique Transcript Words ---\nblackheads, chin, pimples"));
}

#[test]
fn json_output_carries_best_and_ranked() {
    let text = "Pimples and blackheads all over my chin.";
    let matcher = KeywordMatcher::default();
    let tokens = matcher.tokenize(text);
    let json = matcher.score(&tokens, text, &bundled_keywords()).to_json();

    assert_eq!(json["best_match"]["category"], "acne");
    let ranked = json["ranked"].as_array().unwrap();
    assert_eq!(ranked.len(), 4);
    assert_eq!(ranked[0]["category"], "acne");
    assert!(ranked[0]["final_score"].as_f64().unwrap() > 0.0);
}
