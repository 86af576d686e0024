use crate::config::SearchConfig;
use crate::index::reader::Index;
use crate::index::types::{DocId, IndexEntry, SearchResult, TokenId, TypeFilter};
use crate::query::scorer::{ScoreContext, Scorer};
use crate::utils::{extract_shingles, normalize_key, tokenize_query};
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use std::time::Instant;

/// A search over one index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    pub query: String,
    /// Restrict to these types; empty means all
    pub types: TypeFilter,
    /// Maximum results; `None` uses the configured default, `Some(0)` returns nothing
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            types: TypeFilter::all(),
            limit: None,
        }
    }

    pub fn with_types(mut self, types: TypeFilter) -> Self {
        self.types = types;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Candidates contributed by one query term
#[derive(Debug, Default)]
struct TermMatch {
    docs: RoaringBitmap,
    /// Best overlap ratio per doc, for docs reached through expansion
    fuzzy: FxHashMap<DocId, f32>,
}

/// A scored candidate before conversion to [`SearchResult`]
struct Scored<'a> {
    entry: &'a IndexEntry,
    score: f32,
}

/// Query executor
pub struct QueryExecutor<'a> {
    index: &'a Index,
    scorer: Scorer,
    fuzzy_threshold: f32,
    default_limit: usize,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a Index) -> Self {
        Self::with_config(index, &SearchConfig::default())
    }

    /// Create executor with custom scoring configuration
    pub fn with_config(index: &'a Index, config: &SearchConfig) -> Self {
        Self {
            index,
            scorer: Scorer::new(config.weights.clone()),
            fuzzy_threshold: config.fuzzy_threshold,
            default_limit: config.default_limit,
        }
    }

    /// Execute a request and return ranked results
    pub fn execute(&self, request: &SearchRequest) -> Vec<SearchResult> {
        let start = Instant::now();
        let limit = request.limit.unwrap_or(self.default_limit);
        if limit == 0 || request.query.trim().is_empty() {
            return Vec::new();
        }

        let terms = tokenize_query(&request.query);
        if terms.is_empty() {
            return Vec::new();
        }
        let key = normalize_key(&request.query);

        // Narrowing
        let matches: Vec<TermMatch> = terms.iter().map(|t| self.match_term(t)).collect();
        let mut candidates = combine(&matches);
        if !request.types.is_empty() {
            let mut allowed = RoaringBitmap::new();
            for entry_type in request.types.types() {
                allowed |= self.index.type_docs(entry_type);
            }
            candidates &= &allowed;
        }

        // Scoring
        let mut scored: Vec<Scored<'_>> = candidates
            .iter()
            .filter_map(|doc_id| {
                let entry = self.index.entry(doc_id)?;
                let fuzzy_ratio = matches
                    .iter()
                    .filter_map(|m| m.fuzzy.get(&doc_id).copied())
                    .reduce(f32::max);
                let ctx = ScoreContext {
                    key: &key,
                    terms: &terms,
                    fuzzy_ratio,
                };
                Some(Scored {
                    entry,
                    score: self.scorer.calculate_score(entry, &ctx),
                })
            })
            .collect();

        sort_results(&mut scored);
        scored.truncate(limit);

        tracing::trace!(
            query = %request.query,
            candidates = candidates.len(),
            returned = scored.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "search executed"
        );

        scored
            .into_iter()
            .map(|s| SearchResult {
                entry_type: s.entry.entry_type,
                name: s.entry.name.clone(),
                description: s.entry.description.clone(),
                score: s.score,
            })
            .collect()
    }

    /// Candidates for one term: exact postings, else expansion
    fn match_term(&self, term: &str) -> TermMatch {
        if let Some(token_id) = self.index.token_id(term) {
            return TermMatch {
                docs: self.index.postings(token_id).cloned().unwrap_or_default(),
                fuzzy: FxHashMap::default(),
            };
        }

        let mut result = TermMatch::default();
        for (token_id, ratio) in self.expand(term) {
            let Some(docs) = self.index.postings(token_id) else {
                continue;
            };
            result.docs |= docs;
            for doc_id in docs {
                let best = result.fuzzy.entry(doc_id).or_insert(ratio);
                *best = best.max(ratio);
            }
        }
        result
    }

    /// Vocabulary tokens close to `term`, with their overlap ratio.
    ///
    /// Terms long enough to shingle use shingle overlap; shorter ones expand
    /// to every token they prefix.
    fn expand(&self, term: &str) -> Vec<(TokenId, f32)> {
        let shingles = extract_shingles(term);

        if shingles.is_empty() {
            let term_len = term.chars().count() as f32;
            return self
                .index
                .prefix_tokens(term)
                .filter_map(|token_id| {
                    let token = self.index.token(token_id)?;
                    Some((token_id, term_len / token.chars().count() as f32))
                })
                .collect();
        }

        let mut shared: FxHashMap<TokenId, u32> = FxHashMap::default();
        for shingle in &shingles {
            if let Some(tokens) = self.index.shingle_tokens(*shingle) {
                for token_id in tokens {
                    *shared.entry(token_id).or_default() += 1;
                }
            }
        }

        let total = shingles.len() as f32;
        shared
            .into_iter()
            .map(|(token_id, count)| (token_id, count as f32 / total))
            .filter(|&(_, ratio)| ratio >= self.fuzzy_threshold)
            .collect()
    }
}

/// Intersect per-term candidates; multi-term queries with no common
/// candidate fall back to the union.
fn combine(matches: &[TermMatch]) -> RoaringBitmap {
    let Some((first, rest)) = matches.split_first() else {
        return RoaringBitmap::new();
    };

    let mut intersection = first.docs.clone();
    for m in rest {
        intersection &= &m.docs;
    }

    if intersection.is_empty() && matches.len() > 1 {
        let mut union = RoaringBitmap::new();
        for m in matches {
            union |= &m.docs;
        }
        return union;
    }
    intersection
}

/// Score descending, then name ascending; type and id settle the rest.
fn sort_results(results: &mut [Scored<'_>]) {
    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.entry.name_key.cmp(&b.entry.name_key))
            .then_with(|| a.entry.name.cmp(&b.entry.name))
            .then_with(|| a.entry.entry_type.cmp(&b.entry.entry_type))
            .then_with(|| a.entry.id.cmp(&b.entry.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::EntryType;

    fn index(entries: Vec<IndexEntry>) -> Index {
        Index::build(entries, 1)
    }

    fn names(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query() {
        let index = index(vec![IndexEntry::new(EntryType::Item, "Potion", None)]);
        let executor = QueryExecutor::new(&index);
        assert!(executor.execute(&SearchRequest::new("")).is_empty());
        assert!(executor.execute(&SearchRequest::new("   \t")).is_empty());
        assert!(executor.execute(&SearchRequest::new("?!")).is_empty());
    }

    #[test]
    fn test_exact_beats_prefix() {
        let index = index(vec![
            IndexEntry::new(EntryType::Creature, "Pikachu", Some("electric mouse")),
            IndexEntry::new(EntryType::Item, "Pika Ball", None),
        ]);
        let executor = QueryExecutor::new(&index);

        let results = executor.execute(&SearchRequest::new("pikachu"));
        assert_eq!(results[0].name, "Pikachu");
        assert_eq!(results[0].score, 100.0);

        // "pika" is an indexed token, so only its exact postings match
        let results = executor.execute(&SearchRequest::new("pika"));
        assert_eq!(names(&results), vec!["Pika Ball"]);

        // "pik" is not, so both names are reached through shingles
        let results = executor.execute(&SearchRequest::new("pik"));
        assert_eq!(names(&results), vec!["Pika Ball", "Pikachu"]);
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn test_prefix_beats_description() {
        let index = index(vec![
            IndexEntry::new(EntryType::Item, "Fire Stone", None),
            IndexEntry::new(EntryType::Creature, "Charizard", Some("a fire type")),
        ]);
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&SearchRequest::new("fir"));
        assert_eq!(names(&results), vec!["Fire Stone", "Charizard"]);
        assert_eq!(results[0].score, 80.0);
        assert_eq!(results[1].score, 30.0);
    }

    #[test]
    fn test_typo_tolerance() {
        let index = index(vec![
            IndexEntry::new(EntryType::Creature, "Pikachu", None),
            IndexEntry::new(EntryType::Creature, "Raichu", None),
        ]);
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&SearchRequest::new("pikachuu"));
        assert_eq!(names(&results), vec!["Pikachu"]);
        // 5 of 6 shingles shared: 10 + 30 * 5/6
        assert!((results[0].score - 35.0).abs() < 1e-3);
    }

    #[test]
    fn test_below_threshold_is_dropped() {
        let index = index(vec![IndexEntry::new(EntryType::Creature, "Pikachu", None)]);
        let executor = QueryExecutor::new(&index);
        assert!(executor.execute(&SearchRequest::new("pikahcu")).is_empty());
    }

    #[test]
    fn test_single_character_query_uses_prefix() {
        let index = index(vec![
            IndexEntry::new(EntryType::Ability, "Adaptability", None),
            IndexEntry::new(EntryType::Move, "Aerial Ace", None),
            IndexEntry::new(EntryType::Item, "Antidote", None),
            IndexEntry::new(EntryType::Creature, "Bulbasaur", None),
        ]);
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&SearchRequest::new("a").with_limit(2));
        assert_eq!(results.len(), 2);
        assert_eq!(names(&results), vec!["Adaptability", "Aerial Ace"]);
    }

    #[test]
    fn test_multi_term_intersection() {
        let index = index(vec![
            IndexEntry::new(EntryType::Item, "Fire Stone", None),
            IndexEntry::new(EntryType::Item, "Water Stone", None),
            IndexEntry::new(EntryType::Move, "Fire Blast", None),
        ]);
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&SearchRequest::new("fire stone"));
        assert_eq!(names(&results), vec!["Fire Stone"]);
        assert_eq!(results[0].score, 100.0);
    }

    #[test]
    fn test_multi_term_union_fallback() {
        let index = index(vec![
            IndexEntry::new(EntryType::Item, "Fire Stone", None),
            IndexEntry::new(EntryType::Creature, "Squirtle", Some("Tiny turtle")),
        ]);
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&SearchRequest::new("stone turtle"));
        assert_eq!(results.len(), 2);
        assert_eq!(names(&results), vec!["Fire Stone", "Squirtle"]);
    }

    #[test]
    fn test_type_filter() {
        let index = index(vec![
            IndexEntry::new(EntryType::Ability, "Levitate", None),
            IndexEntry::new(EntryType::Move, "Levitate", None),
        ]);
        let executor = QueryExecutor::new(&index);
        let request =
            SearchRequest::new("levitate").with_types(TypeFilter::only(&[EntryType::Move]));
        let results = executor.execute(&request);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry_type, EntryType::Move);
    }

    #[test]
    fn test_ties_break_by_name() {
        let index = index(vec![
            IndexEntry::new(EntryType::Item, "Zinc", Some("raises stats")),
            IndexEntry::new(EntryType::Item, "Calcium", Some("raises stats")),
            IndexEntry::new(EntryType::Item, "iron", Some("raises stats")),
        ]);
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&SearchRequest::new("stats"));
        assert_eq!(names(&results), vec!["Calcium", "iron", "Zinc"]);
    }

    #[test]
    fn test_zero_limit() {
        let index = index(vec![IndexEntry::new(EntryType::Item, "Potion", None)]);
        let executor = QueryExecutor::new(&index);
        assert!(executor.execute(&SearchRequest::new("potion").with_limit(0)).is_empty());
    }

    #[test]
    fn test_default_limit() {
        let entries = (0..80)
            .map(|i| IndexEntry::new(EntryType::Move, &format!("Move {i:02}"), None))
            .collect();
        let index = index(entries);
        let executor = QueryExecutor::new(&index);
        let results = executor.execute(&SearchRequest::new("move"));
        assert_eq!(results.len(), SearchConfig::default().default_limit);
    }
}
