// Fuzzy string similarity — the swap-ready abstraction.
//
// Scoring only needs "how well does this transcript word match this keyword
// phrase", expressed as 0-100. The default implementation is a partial ratio:
// the shorter string is slid across the longer one and each aligned window
// is scored by normalized indel similarity (2 * LCS / total length).

/// Trait for scoring the similarity of two strings on a 0-100 scale.
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Partial-ratio similarity. Finds "stuck" inside "stuck blade feeling"
/// with a perfect score while tolerating small misspellings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl Similarity for PartialRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        partial_ratio(a, b)
    }
}

/// Normalized indel similarity of two character slices, 0-100.
pub fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * longest_common_subsequence(a, b) as f64 / total as f64
}

/// Best `ratio` of the shorter string against any aligned window of the
/// longer string, including windows that hang off either end.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 100.0 } else { 0.0 };
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let best = best_window_ratio(shorter, longer);

    // Equal lengths have no natural needle; try both ways round.
    if shorter.len() == longer.len() && best < 100.0 {
        best.max(best_window_ratio(longer, shorter))
    } else {
        best
    }
}

fn best_window_ratio(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let m = haystack.len();
    let mut best: f64 = 0.0;

    // Windows entering from the left edge
    for end in 1..n.min(m) {
        best = best.max(ratio(needle, &haystack[..end]));
    }

    // Full-width windows
    for start in 0..=(m - n) {
        best = best.max(ratio(needle, &haystack[start..start + n]));
        if best >= 100.0 {
            return 100.0;
        }
    }

    // Windows leaving at the right edge
    for start in (m - n + 1)..m {
        best = best.max(ratio(needle, &haystack[start..]));
    }

    best
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_lcs() {
        assert_eq!(longest_common_subsequence(&chars("abcde"), &chars("ace")), 3);
        assert_eq!(longest_common_subsequence(&chars("abc"), &chars("xyz")), 0);
        assert_eq!(longest_common_subsequence(&chars(""), &chars("xyz")), 0);
    }

    #[test]
    fn test_ratio_reference_values() {
        assert!((ratio(&chars("rash"), &chars("rash")) - 100.0).abs() < 1e-9);
        // lcs("itchy", "itches") = 4 ("itch"), 2 * 4 / 11
        let r = ratio(&chars("itchy"), &chars("itches"));
        assert!((r - 800.0 / 11.0).abs() < 1e-9, "got {r}");
        assert!(ratio(&chars("abc"), &chars("xyz")).abs() < 1e-9);
    }

    #[test]
    fn test_partial_ratio_substring_is_perfect() {
        assert_eq!(partial_ratio("stuck", "stuck blade feeling"), 100.0);
        assert_eq!(partial_ratio("stuck blade feeling", "blade"), 100.0);
        assert_eq!(partial_ratio("scaly", "dry scaly patches"), 100.0);
    }

    #[test]
    fn test_partial_ratio_misspelling_scores_high() {
        let s = partial_ratio("eczema", "exzema flare");
        assert!(s > 80.0 && s < 100.0, "got {s}");
    }

    #[test]
    fn test_partial_ratio_disjoint_is_zero() {
        assert_eq!(partial_ratio("xyz", "abcdef"), 0.0);
    }

    #[test]
    fn test_partial_ratio_edge_windows() {
        // "ingx" only overlaps the tail of "feeling" — the right-edge
        // window "ing" gives 2 * 3 / 7
        let s = partial_ratio("ingx", "feeling");
        assert!(s >= 600.0 / 7.0 - 1e-9, "got {s}");
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert_eq!(partial_ratio("", ""), 100.0);
        assert_eq!(partial_ratio("", "rash"), 0.0);
        assert_eq!(partial_ratio("rash", ""), 0.0);
    }

    #[test]
    fn test_partial_ratio_symmetric() {
        let pairs = [
            ("psoriasis", "plaque psoriasis"),
            ("itchy", "itching"),
            ("blister", "blisters around"),
            ("abcd", "dcba"),
        ];
        for (a, b) in pairs {
            assert!(
                (partial_ratio(a, b) - partial_ratio(b, a)).abs() < 1e-9,
                "{a} / {b}"
            );
        }
    }

    #[test]
    fn test_trait_object_dispatch() {
        let sim: Box<dyn Similarity> = Box::new(PartialRatio);
        assert_eq!(sim.similarity("rash", "red rash"), 100.0);
        // Whole-string ratio is lower: 2 * 4 / 12
        let whole = ratio(&chars("rash"), &chars("red rash"));
        assert!((whole - 200.0 / 3.0).abs() < 1e-9);
    }
}
