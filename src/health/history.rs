//! # Health History
//!
//! Bounded FIFO of past evaluations shared by every request.
//!
//! A single `parking_lot::Mutex` guards the buffer. Entries are fully built
//! before the lock is taken, so readers only ever see complete entries, and
//! append order under the lock defines the recency order readers observe.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

use super::types::{HealthReport, HistoryEntry};

#[derive(Debug)]
pub struct HealthHistory {
    capacity: usize,
    entries: Mutex<VecDeque<Arc<HistoryEntry>>>,
}

impl HealthHistory {
    /// Create a history retaining at most `capacity` entries (minimum one)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Append a completed report, evicting the oldest entry when full
    pub fn record(&self, report: &HealthReport) {
        self.record_and_snapshot(report, 0);
    }

    /// Append a completed report and read back up to `limit` entries
    ///
    /// Both steps happen under one lock, so with `limit >= 1` the first
    /// returned entry is always the report just recorded.
    pub fn record_and_snapshot(&self, report: &HealthReport, limit: usize) -> Vec<HistoryEntry> {
        let entry = Arc::new(HistoryEntry::from(report));

        let (recent, retained, evicted) = {
            let mut entries = self.entries.lock();
            let evicted = if entries.len() == self.capacity {
                entries.pop_front().is_some()
            } else {
                false
            };
            entries.push_back(entry);
            let recent: Vec<Arc<HistoryEntry>> =
                entries.iter().rev().take(limit).cloned().collect();
            (recent, entries.len(), evicted)
        };

        debug!(
            status = %report.status,
            retained = retained,
            evicted = evicted,
            "Recorded health evaluation"
        );

        recent.iter().map(|entry| (**entry).clone()).collect()
    }

    /// Up to `limit` most recent entries, most recent first
    pub fn snapshot(&self, limit: usize) -> Vec<HistoryEntry> {
        let entries: Vec<Arc<HistoryEntry>> = {
            let guard = self.entries.lock();
            guard.iter().rev().take(limit).cloned().collect()
        };
        entries.iter().map(|entry| (**entry).clone()).collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
