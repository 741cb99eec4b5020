//! # Pipeline Activity Tracker
//!
//! In-process [`MetricsSnapshotProvider`] fed directly by the renewal and
//! reminder pipeline, either through the `record_*` methods or by applying
//! [`ActivityEvent`]s received over the admin ingestion route. Events are
//! kept with their timestamps and counted in trailing windows when a
//! snapshot is taken.
//!
//! Until the pipeline has reported at least once the tracker has nothing to
//! say, and snapshots fail with [`SnapshotError::Unavailable`].

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::snapshot::MetricsSnapshotProvider;
use super::types::MetricsSnapshot;
use crate::error::SnapshotError;

/// Window for renewal failures and contract errors
fn hourly_window() -> Duration {
    Duration::hours(1)
}

/// Window for processed reminders
fn daily_window() -> Duration {
    Duration::hours(24)
}

/// One report from the renewal pipeline
///
/// Event timestamps default to the time the event is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityEvent {
    RenewalFailure {
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    ContractError {
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    ReminderProcessed {
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    AgentActivity {
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    PendingReminders {
        count: u64,
    },
}

#[derive(Debug, Default)]
struct ActivityState {
    renewal_failures: Vec<DateTime<Utc>>,
    contract_errors: Vec<DateTime<Utc>>,
    reminders_processed: Vec<DateTime<Utc>>,
    last_agent_activity: Option<DateTime<Utc>>,
    pending_reminders: u64,
    reported: bool,
}

impl ActivityState {
    /// Drop events that have left their window as of `now`
    fn prune(&mut self, now: DateTime<Utc>) {
        let hourly_cutoff = now - hourly_window();
        let daily_cutoff = now - daily_window();
        self.renewal_failures.retain(|at| *at > hourly_cutoff);
        self.contract_errors.retain(|at| *at > hourly_cutoff);
        self.reminders_processed.retain(|at| *at > daily_cutoff);
    }
}

/// Windowed counters the pipeline reports into
#[derive(Debug, Default)]
pub struct PipelineActivityTracker {
    state: Mutex<ActivityState>,
}

impl PipelineActivityTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pipeline has reported anything yet
    pub fn has_reported(&self) -> bool {
        self.state.lock().reported
    }

    /// Apply one pipeline report
    pub fn apply(&self, event: &ActivityEvent) {
        debug!(?event, "Applying pipeline activity event");
        match *event {
            ActivityEvent::RenewalFailure { at } => {
                self.record_renewal_failure_at(at.unwrap_or_else(Utc::now));
            }
            ActivityEvent::ContractError { at } => {
                self.record_contract_error_at(at.unwrap_or_else(Utc::now));
            }
            ActivityEvent::ReminderProcessed { at } => {
                self.record_reminder_processed_at(at.unwrap_or_else(Utc::now));
            }
            ActivityEvent::AgentActivity { at } => {
                self.record_agent_activity_at(at.unwrap_or_else(Utc::now));
            }
            ActivityEvent::PendingReminders { count } => self.set_pending_reminders(count),
        }
    }

    pub fn record_renewal_failure(&self) {
        self.record_renewal_failure_at(Utc::now());
    }

    pub fn record_renewal_failure_at(&self, at: DateTime<Utc>) {
        self.record_with(|state| state.renewal_failures.push(at));
    }

    pub fn record_contract_error(&self) {
        self.record_contract_error_at(Utc::now());
    }

    pub fn record_contract_error_at(&self, at: DateTime<Utc>) {
        self.record_with(|state| state.contract_errors.push(at));
    }

    pub fn record_reminder_processed(&self) {
        self.record_reminder_processed_at(Utc::now());
    }

    pub fn record_reminder_processed_at(&self, at: DateTime<Utc>) {
        self.record_with(|state| state.reminders_processed.push(at));
    }

    /// Note agent activity; earlier timestamps never move the marker backwards
    pub fn record_agent_activity(&self) {
        self.record_agent_activity_at(Utc::now());
    }

    pub fn record_agent_activity_at(&self, at: DateTime<Utc>) {
        self.record_with(|state| {
            state.last_agent_activity =
                Some(state.last_agent_activity.map_or(at, |last| last.max(at)));
        });
    }

    /// Replace the current reminder backlog size
    pub fn set_pending_reminders(&self, pending: u64) {
        self.record_with(|state| state.pending_reminders = pending);
    }

    /// Count events in their trailing windows as of `now`
    ///
    /// Fails with [`SnapshotError::Unavailable`] until the pipeline has
    /// reported at least once. Events stamped after `now` are retained but
    /// not counted.
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> Result<MetricsSnapshot, SnapshotError> {
        let mut state = self.state.lock();
        if !state.reported {
            return Err(SnapshotError::Unavailable(
                "no pipeline activity has been reported".to_string(),
            ));
        }
        state.prune(now);

        let snapshot = MetricsSnapshot {
            failed_renewals_last_hour: count_until(&state.renewal_failures, now),
            contract_errors_last_hour: count_until(&state.contract_errors, now),
            last_agent_activity: state.last_agent_activity,
            pending_reminders: state.pending_reminders,
            reminders_processed_last_day: count_until(&state.reminders_processed, now),
            collected_at: now,
        };
        drop(state);

        trace!(?snapshot, "Collected pipeline activity snapshot");
        Ok(snapshot)
    }

    // Writes prune against the wall clock only; a skewed event timestamp
    // must not move the cutoff for other events.
    fn record_with(&self, update: impl FnOnce(&mut ActivityState)) {
        let mut state = self.state.lock();
        update(&mut state);
        state.reported = true;
        state.prune(Utc::now());
    }
}

fn count_until(events: &[DateTime<Utc>], now: DateTime<Utc>) -> u64 {
    events.iter().filter(|at| **at <= now).count() as u64
}

#[async_trait]
impl MetricsSnapshotProvider for PipelineActivityTracker {
    async fn snapshot(&self) -> Result<MetricsSnapshot, SnapshotError> {
        self.snapshot_at(Utc::now())
    }
}
