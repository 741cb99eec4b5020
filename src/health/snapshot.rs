//! # Metrics Snapshot Provider
//!
//! The seam between the evaluation core and whatever collects pipeline
//! metrics. Providers are asked for a fresh snapshot on every evaluation
//! and must report failure explicitly; the core never substitutes zeros.

use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::MetricsSnapshot;
use crate::error::SnapshotError;

/// Source of the current metrics snapshot
#[async_trait]
pub trait MetricsSnapshotProvider: Send + Sync + fmt::Debug {
    /// Produce the current snapshot or an explicit failure
    async fn snapshot(&self) -> Result<MetricsSnapshot, SnapshotError>;
}

/// Provider that replays a fixed outcome
///
/// Counts how many times it was asked, which lets callers confirm that
/// snapshots are fetched once per evaluation.
///
/// ```rust
/// use chrono::Utc;
/// use renewal_health::health::{MetricsSnapshot, MetricsSnapshotProvider, StaticSnapshotProvider};
///
/// # tokio_test::block_on(async {
/// let provider = StaticSnapshotProvider::new(MetricsSnapshot::empty(Utc::now()));
/// let snapshot = provider.snapshot().await.unwrap();
/// assert_eq!(snapshot.failed_renewals_last_hour, 0);
/// assert_eq!(provider.calls(), 1);
/// # });
/// ```
#[derive(Debug)]
pub struct StaticSnapshotProvider {
    outcome: Result<MetricsSnapshot, SnapshotError>,
    calls: AtomicUsize,
}

impl StaticSnapshotProvider {
    /// Always return `snapshot`
    pub fn new(snapshot: MetricsSnapshot) -> Self {
        Self {
            outcome: Ok(snapshot),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with `error`
    pub fn failing(error: SnapshotError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of snapshot requests served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricsSnapshotProvider for StaticSnapshotProvider {
    async fn snapshot(&self) -> Result<MetricsSnapshot, SnapshotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
