//! Dashboard state controller
//!
//! Owns the loaded email set, its inverted index, the frustration summary
//! and the current filter/query, and drives the fetch-or-cache lifecycle:
//!
//! - `mount` restores the cached snapshot, or fetches when there is none
//! - `refresh` re-fetches and overwrites the cache
//! - `logout` clears the cache and returns to `Idle`
//!
//! A failed refresh keeps whatever was loaded before. A fetch that was
//! started before `logout` is discarded when it completes.

pub mod state;

pub use state::{DashboardView, Phase, VisibleEmail};

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::cache::{self, Snapshot, SnapshotStore};
use crate::document::{Document, FetchedEmails};
use crate::error::Result;
use crate::search::{FilterCategory, InvertedIndex};
use crate::source::EmailSource;
use crate::stats::DashboardStats;

/// Email set and the index built from it, always replaced together
#[derive(Debug)]
struct LoadedSet {
    documents: Vec<Document>,
    index: InvertedIndex,
    frustration_summary: String,
    refreshed_at: Option<DateTime<Utc>>,
}

impl LoadedSet {
    fn new(
        documents: Vec<Document>,
        frustration_summary: String,
        refreshed_at: Option<DateTime<Utc>>,
    ) -> Self {
        let index = InvertedIndex::build(&documents);
        debug!(
            "Index rebuilt: {} emails, {} tokens",
            index.document_count(),
            index.token_count()
        );
        Self {
            documents,
            index,
            frustration_summary,
            refreshed_at,
        }
    }
}

/// A fetch started by [`DashboardController::begin_refresh`]
pub struct PendingRefresh {
    generation: u64,
    source: Arc<dyn EmailSource>,
}

impl PendingRefresh {
    pub async fn fetch(&self) -> Result<FetchedEmails> {
        self.source.fetch().await
    }
}

/// Dashboard state controller
pub struct DashboardController {
    source: Arc<dyn EmailSource>,
    cache: Arc<dyn SnapshotStore>,
    phase: Phase,
    loaded: Option<LoadedSet>,
    filter: FilterCategory,
    query: String,
    /// Bumped by `logout`; refreshes begun earlier are stale
    generation: u64,
}

impl DashboardController {
    pub fn new(source: Arc<dyn EmailSource>, cache: Arc<dyn SnapshotStore>) -> Self {
        Self {
            source,
            cache,
            phase: Phase::Idle,
            loaded: None,
            filter: FilterCategory::All,
            query: String::new(),
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn filter(&self) -> FilterCategory {
        self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Loaded emails, empty before the first load
    pub fn documents(&self) -> &[Document] {
        self.loaded
            .as_ref()
            .map(|l| l.documents.as_slice())
            .unwrap_or(&[])
    }

    pub fn frustration_summary(&self) -> &str {
        self.loaded
            .as_ref()
            .map(|l| l.frustration_summary.as_str())
            .unwrap_or("")
    }

    pub fn index(&self) -> Option<&InvertedIndex> {
        self.loaded.as_ref().map(|l| &l.index)
    }

    /// Restore from the snapshot cache. Returns `true` on a hit.
    ///
    /// An unreadable snapshot is logged and treated as a miss.
    pub fn load_cached(&mut self) -> bool {
        match cache::load_snapshot(self.cache.as_ref()) {
            Ok(Some(snapshot)) => {
                info!("Restored {} emails from cache", snapshot.emails.len());
                self.loaded = Some(LoadedSet::new(
                    snapshot.emails,
                    snapshot.frustration_summary,
                    None,
                ));
                self.transition(Phase::Ready);
                true
            }
            Ok(None) => {
                debug!("No cached snapshot");
                false
            }
            Err(e) => {
                warn!("Ignoring unreadable cached snapshot: {}", e);
                false
            }
        }
    }

    /// Initial load: cache if present, otherwise one fetch.
    ///
    /// Does nothing unless the controller is `Idle`.
    pub async fn mount(&mut self) {
        if self.phase != Phase::Idle {
            debug!("mount ignored in phase {}", self.phase.as_str());
            return;
        }
        if self.load_cached() {
            return;
        }
        self.refresh().await;
    }

    /// Fetch from the source and replace the loaded set
    pub async fn refresh(&mut self) {
        let pending = self.begin_refresh();
        let result = pending.fetch().await;
        self.complete_refresh(&pending, result);
    }

    /// Enter `Loading` and hand out the fetch to run.
    ///
    /// Split from [`complete_refresh`](Self::complete_refresh) so callers
    /// sharing the controller can release it while the fetch is in flight.
    pub fn begin_refresh(&mut self) -> PendingRefresh {
        info!("Refreshing emails from {} source", self.source.name());
        self.transition(Phase::Loading);
        PendingRefresh {
            generation: self.generation,
            source: Arc::clone(&self.source),
        }
    }

    /// Apply the outcome of a fetch started with `begin_refresh`.
    ///
    /// Returns `false` and changes nothing when a `logout` happened since
    /// the fetch began.
    pub fn complete_refresh(
        &mut self,
        pending: &PendingRefresh,
        result: Result<FetchedEmails>,
    ) -> bool {
        if pending.generation != self.generation {
            debug!(
                "Discarding refresh from generation {} (now {})",
                pending.generation, self.generation
            );
            return false;
        }

        match result {
            Ok(fetched) => {
                info!("Fetched {} emails", fetched.emails.len());

                let loaded = LoadedSet::new(
                    fetched.emails,
                    fetched.frustration_summary,
                    Some(Utc::now()),
                );

                let snapshot = Snapshot {
                    emails: loaded.documents.clone(),
                    frustration_summary: loaded.frustration_summary.clone(),
                };
                if let Err(e) = cache::save_snapshot(self.cache.as_ref(), &snapshot) {
                    warn!("Failed to write snapshot cache: {}", e);
                }

                self.loaded = Some(loaded);
                self.transition(Phase::Ready);
            }
            Err(e) => {
                error!("Refresh failed: {}", e);
                self.transition(Phase::Failed(e.to_string()));
            }
        }
        true
    }

    pub fn set_filter(&mut self, filter: FilterCategory) {
        debug!("Filter set to {}", filter);
        self.filter = filter;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Positions matching the current query and filter, ascending
    pub fn visible_positions(&self) -> Vec<usize> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Vec::new();
        };

        loaded
            .index
            .search(&self.query)
            .into_iter()
            .filter(|&position| {
                loaded
                    .documents
                    .get(position)
                    .is_some_and(|d| self.filter.matches(d))
            })
            .collect()
    }

    /// Statistics over the whole loaded set
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute(self.documents())
    }

    pub fn view(&self) -> DashboardView {
        let documents = self.documents();
        let emails = self
            .visible_positions()
            .into_iter()
            .map(|position| VisibleEmail {
                position,
                document: documents[position].clone(),
            })
            .collect();

        DashboardView {
            phase: self.phase.as_str(),
            loading: self.phase.is_loading(),
            error: self.phase.error().map(str::to_string),
            filter: self.filter,
            query: self.query.clone(),
            frustration_summary: self.frustration_summary().to_string(),
            stats: self.stats(),
            emails,
            last_refreshed_at: self.loaded.as_ref().and_then(|l| l.refreshed_at),
        }
    }

    /// Clear the cache and drop everything loaded
    pub fn logout(&mut self) -> Result<()> {
        info!("Logging out, clearing cached emails");
        cache::clear_snapshot(self.cache.as_ref())?;
        self.generation += 1;
        self.loaded = None;
        self.filter = FilterCategory::All;
        self.query.clear();
        self.transition(Phase::Idle);
        Ok(())
    }

    fn transition(&mut self, next: Phase) {
        debug!("Dashboard phase {} -> {}", self.phase.as_str(), next.as_str());
        self.phase = next;
    }
}
