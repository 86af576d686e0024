use crate::index::types::{DocId, EntryType, IndexEntry, Shingle, TokenId};
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use std::ops::Range;

/// One fully built, immutable index.
///
/// Entries are stored sorted by id, so a [`DocId`] is a position in the
/// store. Tokens are stored sorted, so a [`TokenId`] is a position in the
/// vocabulary and prefix lookups are a binary search.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub(crate) generation: u64,
    pub(crate) entries: Vec<IndexEntry>,
    pub(crate) vocabulary: Vec<String>,
    /// Docs containing each token, indexed by TokenId
    pub(crate) postings: Vec<RoaringBitmap>,
    /// Tokens containing each shingle
    pub(crate) shingles: FxHashMap<Shingle, RoaringBitmap>,
    /// Docs of each entry type, indexed by `EntryType::index`
    pub(crate) by_type: [RoaringBitmap; 4],
}

impl Index {
    /// An index with no entries.
    pub fn empty(generation: u64) -> Self {
        Self::build(Vec::new(), generation)
    }

    /// Generation this index was built for
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, sorted by id
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn entry(&self, doc_id: DocId) -> Option<&IndexEntry> {
        self.entries.get(doc_id as usize)
    }

    /// Look up an entry by its string id
    pub fn entry_by_id(&self, id: &str) -> Option<&IndexEntry> {
        self.entries
            .binary_search_by(|e| e.id.as_str().cmp(id))
            .ok()
            .map(|pos| &self.entries[pos])
    }

    /// Sorted token vocabulary
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn token_id(&self, token: &str) -> Option<TokenId> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(token))
            .ok()
            .map(|pos| pos as TokenId)
    }

    pub fn token(&self, token_id: TokenId) -> Option<&str> {
        self.vocabulary.get(token_id as usize).map(String::as_str)
    }

    /// Docs containing a token id
    pub fn postings(&self, token_id: TokenId) -> Option<&RoaringBitmap> {
        self.postings.get(token_id as usize)
    }

    /// Docs containing an exact token, as an owned bitmap (empty if unknown)
    pub fn get_token_docs(&self, token: &str) -> RoaringBitmap {
        self.token_id(token)
            .and_then(|id| self.postings(id))
            .cloned()
            .unwrap_or_default()
    }

    /// Entry ids posted under a token, in id order
    pub fn posting_ids(&self, token: &str) -> Vec<&str> {
        self.get_token_docs(token)
            .iter()
            .filter_map(|doc| self.entry(doc))
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Tokens containing a shingle
    pub fn shingle_tokens(&self, shingle: Shingle) -> Option<&RoaringBitmap> {
        self.shingles.get(&shingle)
    }

    /// Range of token ids whose token starts with `prefix`
    pub fn prefix_tokens(&self, prefix: &str) -> Range<TokenId> {
        let start = self
            .vocabulary
            .partition_point(|t| t.as_str() < prefix);
        let len = self.vocabulary[start..]
            .iter()
            .take_while(|t| t.starts_with(prefix))
            .count();
        start as TokenId..(start + len) as TokenId
    }

    /// Docs of one entry type
    pub fn type_docs(&self, entry_type: EntryType) -> &RoaringBitmap {
        &self.by_type[entry_type.index()]
    }

    pub fn shingle_count(&self) -> usize {
        self.shingles.len()
    }

    /// Total number of (token, doc) pairs
    pub fn posting_count(&self) -> u64 {
        self.postings.iter().map(RoaringBitmap::len).sum()
    }
}
