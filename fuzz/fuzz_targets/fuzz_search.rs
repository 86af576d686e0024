#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pokedex_search::normalize::normalize;
use pokedex_search::query::{QueryExecutor, SearchRequest};
use pokedex_search::{EntryType, Index, TypeFilter};
use serde_json::json;

#[derive(Debug, Arbitrary)]
struct Input {
    records: Vec<(u8, String, Option<String>)>,
    query: String,
    types: u8,
    limit: Option<u8>,
}

fuzz_target!(|input: Input| {
    let mut batches: Vec<(EntryType, Vec<serde_json::Value>)> =
        EntryType::ALL.iter().map(|t| (*t, Vec::new())).collect();
    for (kind, name, description) in input.records {
        let slot = kind as usize % batches.len();
        batches[slot]
            .1
            .push(json!({"name": name, "description": description, "effect": description}));
    }

    let normalized = normalize(batches);
    let index = Index::build(normalized.entries, 1);

    let types: TypeFilter = EntryType::ALL
        .into_iter()
        .filter(|t| input.types & (1 << t.index()) != 0)
        .collect();
    let mut request = SearchRequest::new(input.query).with_types(types);
    if let Some(limit) = input.limit {
        request = request.with_limit(limit as usize);
    }

    let results = QueryExecutor::new(&index).execute(&request);
    if let Some(limit) = request.limit {
        assert!(results.len() <= limit);
    }
    for result in &results {
        assert!(types.admits(result.entry_type));
        assert!(result.score >= 0.0);
    }
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
});
