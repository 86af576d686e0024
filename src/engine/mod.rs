//! Index lifecycle: building, sharing and swapping generations.
//!
//! A [`SearchEngine`] owns one record source and the pointer to the current
//! [`Generation`]. Builds run the source -> normalize -> index pipeline and
//! only swap the pointer once the new index is complete, so readers see
//! either the old generation or the new one, never a mix.
//!
//! Concurrent [`SearchEngine::initialize`] calls share one in-flight build
//! through a [`Shared`] future. The engine is an explicit value: create as
//! many independent instances as needed.

mod generation;

pub use generation::{BuildReport, Generation};

use crate::config::SearchConfig;
use crate::error::{Diagnostic, Result, SearchError};
use crate::index::reader::Index;
use crate::index::types::{EntryType, SearchResult};
use crate::loader::RecordSource;
use crate::normalize::normalize;
use crate::query::SearchRequest;
use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Instant;

type SharedBuild = Shared<BoxFuture<'static, Arc<Generation>>>;

/// A build that has started but not yet been installed
struct PendingBuild {
    number: u64,
    future: SharedBuild,
}

struct EngineInner<S> {
    source: S,
    config: SearchConfig,
    /// Only held long enough to clone or replace the pointer
    current: RwLock<Option<Arc<Generation>>>,
    pending: Mutex<Option<PendingBuild>>,
    last_number: AtomicU64,
}

/// Search engine over one record source
pub struct SearchEngine<S> {
    inner: Arc<EngineInner<S>>,
}

impl<S> Clone for SearchEngine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: RecordSource + 'static> SearchEngine<S> {
    /// Create an engine with default configuration. Nothing is built until
    /// the first [`initialize`](Self::initialize) or search.
    pub fn new(source: S) -> Self {
        Self::from_parts(source, SearchConfig::default())
    }

    /// Create an engine with custom configuration
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid.
    pub fn with_config(source: S, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(source, config))
    }

    fn from_parts(source: S, config: SearchConfig) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                source,
                config,
                current: RwLock::new(None),
                pending: Mutex::new(None),
                last_number: AtomicU64::new(0),
            }),
        }
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    pub fn config(&self) -> &SearchConfig {
        &self.inner.config
    }

    /// The current generation, if one has been built
    pub fn current(&self) -> Option<Arc<Generation>> {
        self.inner.current()
    }

    pub fn is_ready(&self) -> bool {
        self.current().is_some()
    }

    /// Build the first generation, or return the current one.
    ///
    /// Calls made while the first build is in flight wait for that same
    /// build. Later calls are no-ops until [`refresh`](Self::refresh).
    pub async fn initialize(&self) -> Arc<Generation> {
        if let Some(current) = self.current() {
            return current;
        }

        let build = {
            let mut pending = self.inner.lock_pending();
            if let Some(current) = self.current() {
                return current;
            }
            match pending.as_ref() {
                Some(build) => build.future.clone(),
                None => self.start_build(&mut pending),
            }
        };
        build.await
    }

    /// Force a new build from the source's current state and swap it in
    /// once complete.
    pub async fn refresh(&self) -> Arc<Generation> {
        let build = {
            let mut pending = self.inner.lock_pending();
            self.start_build(&mut pending)
        };
        build.await
    }

    /// Search the current generation, waiting for the first build if needed.
    pub async fn search(&self, request: &SearchRequest) -> Vec<SearchResult> {
        self.initialize().await.search(request)
    }

    /// Search without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotReady`] if no generation has been built yet.
    pub fn try_search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        self.current()
            .map(|generation| generation.search(request))
            .ok_or(SearchError::NotReady)
    }

    fn start_build(&self, pending: &mut MutexGuard<'_, Option<PendingBuild>>) -> SharedBuild {
        let number = self.inner.last_number.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        let future = async move {
            let generation = inner.build(number).await;
            inner.install(generation)
        }
        .boxed()
        .shared();

        **pending = Some(PendingBuild {
            number,
            future: future.clone(),
        });
        future
    }
}

impl<S: RecordSource> EngineInner<S> {
    fn current(&self) -> Option<Arc<Generation>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<PendingBuild>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the full pipeline into a new, not yet visible generation
    async fn build(&self, number: u64) -> Generation {
        let start = Instant::now();
        tracing::info!(generation = number, "building search index");

        let fetched = join_all(EntryType::ALL.map(|category| self.source.fetch(category))).await;

        let mut report = BuildReport::default();
        let mut batches = Vec::with_capacity(fetched.len());
        for (category, result) in EntryType::ALL.into_iter().zip(fetched) {
            match result {
                Ok(records) => {
                    report.records[category.index()] = records.len();
                    batches.push((category, records));
                }
                Err(error) => {
                    tracing::warn!(%category, "{}", error);
                    report.failed.push(category);
                    report
                        .diagnostics
                        .push(Diagnostic::CategoryUnavailable { category, error });
                }
            }
        }

        let normalized = normalize(batches);
        report.diagnostics.extend(normalized.diagnostics);
        let index = Index::build(normalized.entries, number);
        report.elapsed = start.elapsed();

        tracing::info!(
            generation = number,
            entries = index.len(),
            diagnostics = report.diagnostics.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "search index built"
        );

        Generation::new(index, report, self.config.clone())
    }

    /// Make a finished generation current unless a newer one already is.
    /// Returns whichever generation is current afterwards.
    fn install(&self, generation: Generation) -> Arc<Generation> {
        let number = generation.number();
        let installed = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let newer = current
                .as_ref()
                .filter(|existing| existing.number() > number)
                .cloned();
            match newer {
                Some(existing) => {
                    tracing::debug!(
                        generation = number,
                        current = existing.number(),
                        "discarding stale build"
                    );
                    existing
                }
                None => {
                    let generation = Arc::new(generation);
                    *current = Some(Arc::clone(&generation));
                    generation
                }
            }
        };

        let mut pending = self.lock_pending();
        if pending.as_ref().is_some_and(|build| build.number == number) {
            *pending = None;
        }
        installed
    }
}
