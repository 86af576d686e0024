//! Scoring module for search results
//!
//! Each candidate gets the score of the strongest rule it satisfies:
//! - exact full-name match
//! - name starts with the query
//! - a query term appears inside the name
//! - a query term appears only inside the description
//! - fuzzy (shingle or prefix expansion) match, scaled by overlap ratio

use crate::index::types::IndexEntry;
use serde::{Deserialize, Serialize};

/// Configurable weights for scoring rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Normalized name equals the normalized query
    pub exact: f32,
    /// Normalized name starts with the normalized query
    pub prefix: f32,
    /// A query term occurs inside the name
    pub name_contains: f32,
    /// A query term occurs only inside the description
    pub description_contains: f32,
    /// Score of a fuzzy match with the lowest possible overlap
    pub fuzzy_min: f32,
    /// Score of a fuzzy match with full overlap
    pub fuzzy_max: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact: 100.0,
            prefix: 80.0,
            name_contains: 60.0,
            description_contains: 30.0,
            fuzzy_min: 10.0,
            fuzzy_max: 40.0,
        }
    }
}

/// Which rule produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    Fuzzy,
    Description,
    NameContains,
    Prefix,
    Exact,
}

/// Normalized query as seen by the scorer
#[derive(Debug, Clone, Default)]
pub struct ScoreContext<'q> {
    /// Query in `normalize_key` form
    pub key: &'q str,
    /// Retrieval terms
    pub terms: &'q [String],
    /// Best fuzzy overlap ratio that brought this candidate in, if any
    pub fuzzy_ratio: Option<f32>,
}

/// Scorer calculates relevance scores for search results
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Create a scorer with default weights
    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Strongest rule an entry satisfies for this query
    pub fn classify(&self, entry: &IndexEntry, ctx: &ScoreContext<'_>) -> MatchKind {
        let name = entry.name_key.as_str();

        if !ctx.key.is_empty() && name == ctx.key {
            MatchKind::Exact
        } else if !ctx.key.is_empty() && name.starts_with(ctx.key) {
            MatchKind::Prefix
        } else if ctx.terms.iter().any(|t| name.contains(t.as_str())) {
            MatchKind::NameContains
        } else if ctx
            .terms
            .iter()
            .any(|t| entry.description_key.contains(t.as_str()))
        {
            MatchKind::Description
        } else {
            MatchKind::Fuzzy
        }
    }

    /// Calculate the score for an entry
    pub fn calculate_score(&self, entry: &IndexEntry, ctx: &ScoreContext<'_>) -> f32 {
        let score = match self.classify(entry, ctx) {
            MatchKind::Exact => self.weights.exact,
            MatchKind::Prefix => self.weights.prefix,
            MatchKind::NameContains => self.weights.name_contains,
            MatchKind::Description => self.weights.description_contains,
            MatchKind::Fuzzy => self.fuzzy_score(ctx.fuzzy_ratio.unwrap_or(0.0)),
        };
        score.max(0.0)
    }

    /// Linear interpolation between `fuzzy_min` and `fuzzy_max`
    fn fuzzy_score(&self, ratio: f32) -> f32 {
        let ratio = ratio.clamp(0.0, 1.0);
        self.weights.fuzzy_min + (self.weights.fuzzy_max - self.weights.fuzzy_min) * ratio
    }

    /// Get the weights (for external calculations)
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::EntryType;

    fn ctx<'q>(key: &'q str, terms: &'q [String]) -> ScoreContext<'q> {
        ScoreContext {
            key,
            terms,
            fuzzy_ratio: None,
        }
    }

    #[test]
    fn test_default_weights_precedence() {
        let w = ScoringWeights::default();
        assert!(w.exact > w.prefix);
        assert!(w.prefix > w.name_contains);
        assert!(w.name_contains > w.description_contains);
        assert!(w.description_contains <= w.fuzzy_max);
        assert!(w.fuzzy_min < w.fuzzy_max);
    }

    #[test]
    fn test_exact_beats_prefix() {
        let scorer = Scorer::with_defaults();
        let terms = vec!["pikachu".to_string()];
        let pikachu = IndexEntry::new(EntryType::Creature, "Pikachu", Some("electric mouse"));
        let pika_ball = IndexEntry::new(EntryType::Item, "Pika Ball", None);

        assert_eq!(scorer.classify(&pikachu, &ctx("pikachu", &terms)), MatchKind::Exact);
        assert_eq!(scorer.calculate_score(&pikachu, &ctx("pikachu", &terms)), 100.0);

        let terms = vec!["pika".to_string()];
        assert_eq!(scorer.classify(&pika_ball, &ctx("pika", &terms)), MatchKind::Prefix);
        assert_eq!(scorer.classify(&pikachu, &ctx("pika", &terms)), MatchKind::Prefix);
    }

    #[test]
    fn test_name_contains_and_description() {
        let scorer = Scorer::with_defaults();
        let terms = vec!["stone".to_string()];
        let fire_stone = IndexEntry::new(EntryType::Item, "Fire Stone", None);
        let rock = IndexEntry::new(EntryType::Move, "Rock Throw", Some("Hurls a stone"));

        assert_eq!(scorer.classify(&fire_stone, &ctx("stone", &terms)), MatchKind::NameContains);
        assert_eq!(scorer.classify(&rock, &ctx("stone", &terms)), MatchKind::Description);
        assert_eq!(scorer.calculate_score(&rock, &ctx("stone", &terms)), 30.0);
    }

    #[test]
    fn test_punctuation_insensitive_exact() {
        let scorer = Scorer::with_defaults();
        let terms = vec!["mime".to_string(), "mr".to_string()];
        let entry = IndexEntry::new(EntryType::Creature, "Mr. Mime", None);
        assert_eq!(scorer.classify(&entry, &ctx("mr mime", &terms)), MatchKind::Exact);
    }

    #[test]
    fn test_fuzzy_scaling() {
        let scorer = Scorer::with_defaults();
        let terms = vec!["charzard".to_string()];
        let entry = IndexEntry::new(EntryType::Creature, "Charizard", None);

        let mut low = ctx("charzard", &terms);
        low.fuzzy_ratio = Some(0.6);
        let mut high = ctx("charzard", &terms);
        high.fuzzy_ratio = Some(1.0);

        let low_score = scorer.calculate_score(&entry, &low);
        let high_score = scorer.calculate_score(&entry, &high);
        assert!((low_score - 28.0).abs() < 1e-4);
        assert_eq!(high_score, 40.0);
        assert!(low_score < high_score);
    }

    #[test]
    fn test_score_never_negative() {
        let scorer = Scorer::new(ScoringWeights {
            fuzzy_min: -50.0,
            fuzzy_max: -10.0,
            ..Default::default()
        });
        let terms = vec!["zzz".to_string()];
        let entry = IndexEntry::new(EntryType::Move, "Tackle", None);
        assert_eq!(scorer.calculate_score(&entry, &ctx("zzz", &terms)), 0.0);
    }
}
