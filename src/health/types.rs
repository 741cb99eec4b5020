//! # Health Report Types
//!
//! Data carried through one evaluation cycle: the observed metrics, the
//! alerts they trigger, and the resulting report. All report types
//! serialize in camelCase to match the admin health response body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ThresholdConfig;
use crate::constants::HealthStatus;

/// Point-in-time operational metrics from the renewal pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Renewals that failed within the trailing hour
    pub failed_renewals_last_hour: u64,
    /// Contract-processing errors within the trailing hour
    pub contract_errors_last_hour: u64,
    /// Most recent activity reported by any renewal agent
    pub last_agent_activity: Option<DateTime<Utc>>,
    /// Reminders queued but not yet processed
    pub pending_reminders: u64,
    /// Reminders processed within the trailing 24 hours
    pub reminders_processed_last_day: u64,
    /// When the snapshot was taken
    pub collected_at: DateTime<Utc>,
}

impl MetricsSnapshot {
    /// An all-zero snapshot taken at `collected_at`
    pub fn empty(collected_at: DateTime<Utc>) -> Self {
        Self {
            failed_renewals_last_hour: 0,
            contract_errors_last_hour: 0,
            last_agent_activity: None,
            pending_reminders: 0,
            reminders_processed_last_day: 0,
            collected_at,
        }
    }

    /// Hours between the last agent activity and the snapshot time
    ///
    /// `None` when no agent activity has ever been observed. Activity
    /// stamped after `collected_at` counts as zero inactivity.
    pub fn agent_inactivity_hours(&self) -> Option<f64> {
        self.last_agent_activity.map(|last| {
            let elapsed = self.collected_at.signed_duration_since(last);
            (elapsed.num_milliseconds().max(0) as f64) / 3_600_000.0
        })
    }
}

/// Alert severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One threshold breach observed during one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub value: f64,
    pub threshold: f64,
    pub triggered_at: DateTime<Utc>,
}

impl Alert {
    /// Compare everything except `triggered_at`
    pub fn same_breach(&self, other: &Alert) -> bool {
        self.id == other.id
            && self.message == other.message
            && self.severity == other.severity
            && self.value == other.value
            && self.threshold == other.threshold
    }
}

/// Result of one evaluation cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub metrics: MetricsSnapshot,
    pub alerts: Vec<Alert>,
    pub thresholds: ThresholdConfig,
    /// Prior evaluations, most recent first; only present when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
}

/// Retained projection of a past report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub metrics: MetricsSnapshot,
    pub alerts: Vec<Alert>,
}

impl From<&HealthReport> for HistoryEntry {
    fn from(report: &HealthReport) -> Self {
        Self {
            status: report.status,
            timestamp: report.timestamp,
            metrics: report.metrics.clone(),
            alerts: report.alerts.clone(),
        }
    }
}
