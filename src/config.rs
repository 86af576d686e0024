//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] holds the tunable parts of ranking: rule weights, the
//! fuzzy-match threshold and the default result limit. Every field has a
//! serde default so partial `config.json` files load cleanly.

use crate::error::SearchError;
use crate::query::scorer::ScoringWeights;
use serde::{Deserialize, Serialize};

/// Default number of results when a request does not set a limit
pub const DEFAULT_LIMIT: usize = 50;

/// Minimum shingle overlap ratio for a fuzzy match
pub const DEFAULT_FUZZY_THRESHOLD: f32 = 0.6;

/// Ranking configuration for a search engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results returned when a request has no explicit limit.
    pub default_limit: usize,
    /// Fraction of a term's shingles a vocabulary token must share to count
    /// as a fuzzy match, in `(0, 1]`.
    pub fuzzy_threshold: f32,
    /// Scores assigned by each ranking rule.
    pub weights: ScoringWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            weights: ScoringWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `default_limit` must be greater than 0
    /// - `fuzzy_threshold` must be in `(0, 1]`
    /// - weights must be non-negative and strictly ordered
    ///   `exact > prefix > name_contains > description_contains`
    /// - `fuzzy_min` must be <= `fuzzy_max`, and `fuzzy_max` below `exact`
    ///
    /// The fuzzy band may overlap `description_contains` (10..=40 against 30
    /// by default). A result takes the weight of the first rule it satisfies
    /// in precedence order, so a description hit never competes with a fuzzy
    /// score for the same entry.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.default_limit == 0 {
            return Err(SearchError::Config(
                "default_limit must be greater than 0".into(),
            ));
        }
        if !(self.fuzzy_threshold > 0.0 && self.fuzzy_threshold <= 1.0) {
            return Err(SearchError::Config(format!(
                "fuzzy_threshold must be in (0, 1], got {}",
                self.fuzzy_threshold
            )));
        }

        let w = &self.weights;
        let all = [
            w.exact,
            w.prefix,
            w.name_contains,
            w.description_contains,
            w.fuzzy_min,
            w.fuzzy_max,
        ];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(SearchError::Config(
                "weights must be finite and non-negative".into(),
            ));
        }
        if !(w.exact > w.prefix && w.prefix > w.name_contains && w.name_contains > w.description_contains) {
            return Err(SearchError::Config(
                "weights must satisfy exact > prefix > name_contains > description_contains"
                    .into(),
            ));
        }
        if w.fuzzy_min > w.fuzzy_max {
            return Err(SearchError::Config(format!(
                "fuzzy_min ({}) must be <= fuzzy_max ({})",
                w.fuzzy_min, w.fuzzy_max
            )));
        }
        if w.fuzzy_max >= w.exact {
            return Err(SearchError::Config(format!(
                "fuzzy_max ({}) must be below exact ({})",
                w.fuzzy_max, w.exact
            )));
        }
        Ok(())
    }
}
