//! Error and diagnostic types.
//!
//! Nothing here is fatal to the host: load and record errors are scoped to
//! one category or one record and end up as [`Diagnostic`]s in the build
//! report, while search-time errors only come from the non-suspending
//! [`crate::SearchEngine::try_search`] path.

use crate::index::types::EntryType;

/// Errors produced by record sources, the normalizer and the engine.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A record source could not supply one category.
    #[error("failed to load {category} records: {message}")]
    Load {
        category: EntryType,
        message: String,
    },

    /// A single raw record could not be turned into an entry.
    #[error("malformed {category} record at position {position}: {reason}")]
    MalformedRecord {
        category: EntryType,
        position: usize,
        reason: String,
    },

    /// No generation has been built yet.
    #[error("search index is not ready")]
    NotReady,

    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, SearchError>;

/// A non-fatal event recorded while building a generation.
#[derive(Debug, thiserror::Error)]
pub enum Diagnostic {
    /// The source failed for a whole category; it contributes no entries.
    #[error("{category} unavailable: {error}")]
    CategoryUnavailable {
        category: EntryType,
        #[source]
        error: SearchError,
    },

    /// One record was skipped.
    #[error("skipped record: {0}")]
    RecordSkipped(#[source] SearchError),

    /// A later record replaced an earlier one with the same id.
    #[error("duplicate {category} entry {id:?} at position {position} replaced an earlier record")]
    DuplicateReplaced {
        category: EntryType,
        id: String,
        position: usize,
    },
}

impl Diagnostic {
    /// Category the diagnostic belongs to.
    pub fn category(&self) -> Option<EntryType> {
        match self {
            Diagnostic::CategoryUnavailable { category, .. }
            | Diagnostic::DuplicateReplaced { category, .. } => Some(*category),
            Diagnostic::RecordSkipped(SearchError::MalformedRecord { category, .. })
            | Diagnostic::RecordSkipped(SearchError::Load { category, .. }) => Some(*category),
            Diagnostic::RecordSkipped(_) => None,
        }
    }
}
