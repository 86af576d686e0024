//! Record sources feeding the build pipeline.
//!
//! A [`RecordSource`] supplies the raw JSON records of one category at a
//! time. Each category may fail on its own; the engine turns a failure into
//! a diagnostic and builds the remaining categories.

mod json;
mod memory;

pub use json::{DataFiles, JsonDirSource};
pub use memory::MemorySource;

use crate::error::SearchError;
use crate::index::types::EntryType;
use serde_json::Value;
use std::future::Future;

/// A pluggable supplier of raw records.
///
/// All implementations must be `Send + Sync` so builds can be shared
/// between concurrent callers.
pub trait RecordSource: Send + Sync {
    /// Fetch every raw record of one category, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Load`] if the category cannot be read.
    fn fetch(
        &self,
        category: EntryType,
    ) -> impl Future<Output = Result<Vec<Value>, SearchError>> + Send;
}
