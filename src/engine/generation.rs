use crate::config::SearchConfig;
use crate::error::Diagnostic;
use crate::index::reader::Index;
use crate::index::stats::IndexStats;
use crate::index::types::{EntryType, SearchResult};
use crate::query::{QueryExecutor, SearchRequest};
use std::time::Duration;

/// What happened while building one generation
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Raw records received per category, indexed by `EntryType::index`
    pub records: [usize; 4],
    /// Categories whose fetch failed
    pub failed: Vec<EntryType>,
    /// Skipped records, replaced duplicates and load failures, in order
    pub diagnostics: Vec<Diagnostic>,
    pub elapsed: Duration,
}

impl BuildReport {
    pub fn records_for(&self, category: EntryType) -> usize {
        self.records[category.index()]
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// One complete, immutable snapshot of the index.
///
/// Searches against a generation are synchronous and read-only; holding an
/// `Arc<Generation>` keeps results consistent even after a newer one has
/// replaced it in the engine.
#[derive(Debug)]
pub struct Generation {
    index: Index,
    report: BuildReport,
    config: SearchConfig,
}

impl Generation {
    pub fn new(index: Index, report: BuildReport, config: SearchConfig) -> Self {
        Self {
            index,
            report,
            config,
        }
    }

    /// Monotonically increasing build number
    pub fn number(&self) -> u64 {
        self.index.generation()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::collect(&self.index, self.report.diagnostics.len())
    }

    /// Run a search against this generation
    pub fn search(&self, request: &SearchRequest) -> Vec<SearchResult> {
        QueryExecutor::with_config(&self.index, &self.config).execute(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::IndexEntry;

    #[test]
    fn test_search_is_repeatable() {
        let index = Index::build(
            vec![
                IndexEntry::new(EntryType::Item, "Fire Stone", None),
                IndexEntry::new(EntryType::Creature, "Charizard", Some("a fire type")),
            ],
            4,
        );
        let generation = Generation::new(index, BuildReport::default(), SearchConfig::default());
        let request = SearchRequest::new("fire");

        assert_eq!(generation.number(), 4);
        assert_eq!(generation.search(&request), generation.search(&request));
        assert_eq!(generation.stats().entries, 2);
        assert!(generation.report().is_clean());
    }
}
