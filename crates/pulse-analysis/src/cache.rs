//! Memoization of completed reports.
//!
//! Bounded and time-expiring rather than the grow-forever map the feature
//! needs at minimum: repeated identical requests within a process lifetime
//! are served from memory, and concurrent same-key runs may race with
//! last-writer-wins semantics.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::types::{AggregateReport, AnalysisRequest, ItemFilters, PipelineStage};

/// Composite cache key: `{sourceId}_{maxCount}_{filterFlagsJoined}`.
///
/// Matching is exact string equality; filter order matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub source_id: String,
    pub max_items: usize,
    pub filters: ItemFilters,
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}_{}", self.source_id, self.max_items, self.filters)
    }
}

impl From<&AnalysisRequest> for CacheKey {
    fn from(request: &AnalysisRequest) -> Self {
        Self {
            source_id: request.source_id.clone(),
            max_items: request.max_items,
            filters: request.filters.clone(),
        }
    }
}

/// Process-wide cache of completed [`AggregateReport`]s.
#[derive(Clone)]
pub struct ReportCache {
    inner: moka::sync::Cache<String, Arc<AggregateReport>>,
}

impl ReportCache {
    /// A cache holding at most `capacity` reports, each for at most `ttl`.
    #[must_use]
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: moka::sync::Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Look up a completed report.
    ///
    /// Hits come back as a copy marked `cached = true` with a fresh
    /// `cached_at` stamp; the stored report is never mutated.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<AggregateReport> {
        let stored = self.inner.get(&key.to_string())?;
        let mut report = (*stored).clone();
        report.cached = true;
        report.cached_at = Some(Utc::now());
        Some(report)
    }

    /// Store a completed report.
    ///
    /// Partial reports are refused: a cache hit must always be structurally
    /// complete, so anything short of `completed` is dropped with a warning.
    pub fn insert(&self, key: &CacheKey, report: &AggregateReport) {
        if report.status != PipelineStage::Completed {
            tracing::warn!(
                key = %key,
                status = %report.status,
                "refusing to cache a partial report"
            );
            return;
        }
        self.inner.insert(key.to_string(), Arc::new(report.clone()));
    }
}
