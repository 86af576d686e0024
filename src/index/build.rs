use crate::index::reader::Index;
use crate::index::types::{DocId, IndexEntry, TokenId};
use crate::utils::extract_shingles;
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

impl Index {
    /// Build a complete index from normalized entries.
    ///
    /// Pure and deterministic: the same entry set yields an equal index in
    /// any input order. Entries sharing an id collapse to the last one.
    pub fn build(entries: Vec<IndexEntry>, generation: u64) -> Self {
        // Phase 1: order the store by id
        let mut store: BTreeMap<String, IndexEntry> = BTreeMap::new();
        for entry in entries {
            store.insert(entry.id.clone(), entry);
        }
        let entries: Vec<IndexEntry> = store.into_values().collect();

        // Phase 2: token postings and type bitmaps
        let mut by_type: [RoaringBitmap; 4] = Default::default();
        let mut token_docs: BTreeMap<&str, RoaringBitmap> = BTreeMap::new();
        for (doc_id, entry) in entries.iter().enumerate() {
            let doc_id = doc_id as DocId;
            by_type[entry.entry_type.index()].insert(doc_id);
            for token in &entry.tokens {
                token_docs.entry(token.as_str()).or_default().insert(doc_id);
            }
        }

        let mut vocabulary = Vec::with_capacity(token_docs.len());
        let mut postings = Vec::with_capacity(token_docs.len());
        for (token, docs) in token_docs {
            vocabulary.push(token.to_string());
            postings.push(docs);
        }

        // Phase 3: shingle -> tokens
        let mut shingles: FxHashMap<_, RoaringBitmap> = FxHashMap::default();
        for (token_id, token) in vocabulary.iter().enumerate() {
            for shingle in extract_shingles(token) {
                shingles
                    .entry(shingle)
                    .or_default()
                    .insert(token_id as TokenId);
            }
        }

        Self {
            generation,
            entries,
            vocabulary,
            postings,
            shingles,
            by_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::EntryType;
    use crate::utils::chars_to_shingle;

    fn entries() -> Vec<IndexEntry> {
        vec![
            IndexEntry::new(EntryType::Creature, "Charizard", Some("a fire type")),
            IndexEntry::new(EntryType::Item, "Fire Stone", Some("Evolution stone")),
            IndexEntry::new(EntryType::Move, "Ember", Some("May burn the target")),
            IndexEntry::new(EntryType::Ability, "Blaze", Some("Powers up fire moves")),
        ]
    }

    #[test]
    fn test_build_postings() {
        let index = Index::build(entries(), 1);
        assert_eq!(index.len(), 4);
        assert_eq!(
            index.posting_ids("fire"),
            vec!["ability:blaze", "creature:charizard", "item:fire stone"]
        );
        assert_eq!(index.posting_ids("stone"), vec!["item:fire stone"]);
    }

    #[test]
    fn test_build_shingles() {
        let index = Index::build(entries(), 1);
        let fir = index
            .shingle_tokens(chars_to_shingle('f', 'i', 'r'))
            .expect("shingle present");
        let tokens: Vec<&str> = fir.iter().filter_map(|id| index.token(id)).collect();
        assert_eq!(tokens, vec!["fire"]);
    }

    #[test]
    fn test_build_is_order_independent() {
        let forward = Index::build(entries(), 7);
        let mut reversed = entries();
        reversed.reverse();
        let backward = Index::build(reversed, 7);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_build_references_are_valid() {
        let index = Index::build(entries(), 1);
        let doc_count = index.len() as u32;
        for token_id in 0..index.vocabulary().len() as TokenId {
            let docs = index.postings(token_id).unwrap();
            assert!(!docs.is_empty());
            assert!(docs.iter().all(|doc| doc < doc_count));
        }
        let vocab_len = index.vocabulary().len() as u32;
        for tokens in index.shingles.values() {
            assert!(tokens.iter().all(|t| t < vocab_len));
        }
    }

    #[test]
    fn test_build_duplicate_ids_keep_last() {
        let index = Index::build(
            vec![
                IndexEntry::new(EntryType::Item, "Potion", Some("old")),
                IndexEntry::new(EntryType::Item, "potion", Some("new")),
            ],
            1,
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].description.as_deref(), Some("new"));
        assert!(index.get_token_docs("old").is_empty());
    }
}
