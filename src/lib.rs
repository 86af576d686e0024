//! # pokedex-search - Typo-tolerant Pokédex Search
//!
//! An in-memory search index over four categories of Pokédex data
//! (creatures, items, abilities and moves) with ranked, typo-tolerant
//! lookup suitable for typeahead.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`loader`] - Record sources (JSON data directory, in-memory)
//! - [`normalize`] - Raw records to uniform index entries
//! - [`index`] - Inverted index (token postings + shingle map)
//! - [`query`] - Candidate lookup, scoring and ranking
//! - [`engine`] - Generation lifecycle: build, share, swap
//! - [`config`] - Ranking weights and limits
//! - [`output`] - Terminal and JSON result formatting
//! - [`utils`] - Tokenizer, shingles, app data paths
//!
//! ## Quick Start
//!
//! ```
//! use pokedex_search::{EntryType, MemorySource, SearchEngine, SearchRequest};
//! use serde_json::json;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let source = MemorySource::new()
//!     .with(EntryType::Creature, vec![json!({"name": "Pikachu", "description": "Electric mouse"})])
//!     .with(EntryType::Item, vec![json!({"name": "Thunder Stone", "effect": "Evolves Pikachu"})]);
//!
//! let engine = SearchEngine::new(source);
//! let results = engine.search(&SearchRequest::new("pikachu")).await;
//!
//! assert_eq!(results[0].name, "Pikachu");
//! assert_eq!(results[1].name, "Thunder Stone");
//! # });
//! ```
//!
//! ## Ranking
//!
//! Each candidate gets the score of the best rule it satisfies:
//!
//! 1. **Exact** - normalized name equals the query
//! 2. **Prefix** - name starts with the query
//! 3. **Name contains** - a query term appears in the name
//! 4. **Description contains** - a query term appears in the description
//! 5. **Fuzzy** - reached through shingle overlap, scaled by overlap ratio
//!
//! Ties break on normalized name, then name, type and id, so results are
//! deterministic for a given generation.

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod query;
pub mod utils;

pub use config::SearchConfig;
pub use engine::{BuildReport, Generation, SearchEngine};
pub use error::{Diagnostic, Result, SearchError};
pub use index::{EntryType, Index, IndexEntry, IndexStats, SearchResult, TypeFilter};
pub use loader::{DataFiles, JsonDirSource, MemorySource, RecordSource};
pub use query::SearchRequest;
