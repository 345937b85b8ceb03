// Tunable constants for the disease match score.
//
// final = fuzzy * fuzzy_weight + exact * exact_weight
//
// Fuzzy coverage carries more weight because people describing symptoms
// rarely say the clinical term; an exact phrase hit is still a strong signal.

use anyhow::Result;

/// Configurable weights and length thresholds for scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    /// Weight of the average best fuzzy match (default 0.65)
    pub fuzzy_weight: f64,
    /// Weight of exact phrase coverage (default 0.35)
    pub exact_weight: f64,
    /// Keyword phrases shorter than this are ignored (default 3)
    pub min_keyword_len: usize,
    /// Transcript tokens shorter than this are ignored when scoring (default 3)
    pub min_token_len: usize,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            fuzzy_weight: 0.65,
            exact_weight: 0.35,
            min_keyword_len: 3,
            min_token_len: 3,
        }
    }
}

impl MatchWeights {
    /// Default thresholds with custom blend weights.
    pub fn blend(fuzzy_weight: f64, exact_weight: f64) -> Self {
        Self {
            fuzzy_weight,
            exact_weight,
            ..Self::default()
        }
    }

    /// Weights must be non-negative and sum to 1 so the final score stays
    /// within 0-100.
    pub fn validate(&self) -> Result<()> {
        if !(self.fuzzy_weight >= 0.0 && self.exact_weight >= 0.0) {
            anyhow::bail!(
                "Match weights must be non-negative (fuzzy={}, exact={})",
                self.fuzzy_weight,
                self.exact_weight
            );
        }
        let sum = self.fuzzy_weight + self.exact_weight;
        if (sum - 1.0).abs() > 1e-6 {
            anyhow::bail!(
                "Match weights must sum to 1.0, got {sum} (fuzzy={}, exact={})",
                self.fuzzy_weight,
                self.exact_weight
            );
        }
        Ok(())
    }

    /// Blend the two sub-scores.
    pub fn combine(&self, fuzzy: f64, exact: f64) -> f64 {
        self.fuzzy_weight * fuzzy + self.exact_weight * exact
    }
}
