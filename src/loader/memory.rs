use crate::error::SearchError;
use crate::index::types::EntryType;
use crate::loader::RecordSource;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

/// In-memory record source.
///
/// Records can be replaced between builds, which makes it the source of
/// choice for embedding and for exercising refreshes.
#[derive(Debug)]
pub struct MemorySource {
    slots: RwLock<[Result<Vec<Value>, String>; 4]>,
    fetches: AtomicUsize,
}

impl MemorySource {
    /// A source with every category empty
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(std::array::from_fn(|_| Ok(Vec::new()))),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Builder-style [`MemorySource::set`]
    pub fn with(self, category: EntryType, records: Vec<Value>) -> Self {
        self.set(category, records);
        self
    }

    /// Replace the records of a category
    pub fn set(&self, category: EntryType, records: Vec<Value>) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots[category.index()] = Ok(records);
    }

    /// Make the next fetches of a category fail with `message`
    pub fn fail(&self, category: EntryType, message: impl Into<String>) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots[category.index()] = Err(message.into());
    }

    /// Number of `fetch` calls served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for MemorySource {
    async fn fetch(&self, category: EntryType) -> Result<Vec<Value>, SearchError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let slot = {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            slots[category.index()].clone()
        };
        slot.map_err(|message| SearchError::Load { category, message })
    }
}
