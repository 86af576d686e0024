//! Raw records to [`IndexEntry`] conversion.
//!
//! Decoding runs on the rayon pool; deduplication and diagnostics are then
//! applied sequentially in input order so results are reproducible.

pub mod records;

pub use records::RawRecord;

use crate::error::{Diagnostic, SearchError};
use crate::index::types::{EntryType, IndexEntry};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde_json::Value;

/// Output of normalization
#[derive(Debug, Default)]
pub struct Normalized {
    pub entries: Vec<IndexEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Normalized {
    fn extend(&mut self, other: Normalized) {
        self.entries.extend(other.entries);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Turn one raw record into an entry
pub fn normalize_record(
    category: EntryType,
    position: usize,
    value: &Value,
) -> Result<IndexEntry, SearchError> {
    let malformed = |reason: String| SearchError::MalformedRecord {
        category,
        position,
        reason,
    };

    let record = RawRecord::decode(category, value).map_err(|e| malformed(e.to_string()))?;
    let name = record
        .name()
        .ok_or_else(|| malformed("missing name".to_string()))?;
    Ok(IndexEntry::new(category, name, record.description()))
}

/// Normalize every record of one category.
///
/// Malformed records are skipped with a diagnostic. When two records share
/// an id, the later one replaces the earlier one in place.
pub fn normalize_category(category: EntryType, records: &[Value]) -> Normalized {
    let decoded: Vec<Result<IndexEntry, SearchError>> = records
        .par_iter()
        .enumerate()
        .map(|(position, value)| normalize_record(category, position, value))
        .collect();

    let mut out = Normalized::default();
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();

    for (position, result) in decoded.into_iter().enumerate() {
        match result {
            Ok(entry) => match seen.get(&entry.id) {
                Some(&slot) => {
                    tracing::warn!(%category, id = %entry.id, position, "duplicate entry replaced");
                    out.diagnostics.push(Diagnostic::DuplicateReplaced {
                        category,
                        id: entry.id.clone(),
                        position,
                    });
                    out.entries[slot] = entry;
                }
                None => {
                    seen.insert(entry.id.clone(), out.entries.len());
                    out.entries.push(entry);
                }
            },
            Err(e) => {
                tracing::warn!("{}", e);
                out.diagnostics.push(Diagnostic::RecordSkipped(e));
            }
        }
    }

    out
}

/// Normalize several categories, concatenating entries and diagnostics.
pub fn normalize<I>(batches: I) -> Normalized
where
    I: IntoIterator<Item = (EntryType, Vec<Value>)>,
{
    let mut out = Normalized::default();
    for (category, records) in batches {
        out.extend(normalize_category(category, &records));
    }
    out
}
