//! # Threshold Evaluator
//!
//! Compares a [`MetricsSnapshot`] against the configured [`ThresholdConfig`]
//! using an explicit, ordered rule table. Each rule pairs one observed
//! metric with one configured limit, names the alert it raises, and fixes
//! its severity.
//!
//! Evaluation is pure: identical snapshot and threshold inputs produce
//! identical alerts apart from `triggered_at`, and alerts always follow
//! rule-table order.

use chrono::{DateTime, Utc};
use tracing::warn;

use super::types::{Alert, AlertSeverity, MetricsSnapshot};
use crate::config::ThresholdConfig;
use crate::constants::alert_ids;

/// Observed metric a rule reads from the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    FailedRenewalsLastHour,
    ContractErrorsLastHour,
    AgentInactivityHours,
    PendingReminders,
}

impl MetricKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::FailedRenewalsLastHour => "failedRenewalsLastHour",
            MetricKey::ContractErrorsLastHour => "contractErrorsLastHour",
            MetricKey::AgentInactivityHours => "agentInactivityHours",
            MetricKey::PendingReminders => "pendingReminders",
        }
    }

    /// Observed value, or `None` when the snapshot carries no observation
    pub fn observe(&self, snapshot: &MetricsSnapshot) -> Option<Measure> {
        match self {
            MetricKey::FailedRenewalsLastHour => {
                Some(Measure::Count(snapshot.failed_renewals_last_hour))
            }
            MetricKey::ContractErrorsLastHour => {
                Some(Measure::Count(snapshot.contract_errors_last_hour))
            }
            MetricKey::AgentInactivityHours => snapshot.agent_inactivity_hours().map(Measure::Hours),
            MetricKey::PendingReminders => Some(Measure::Count(snapshot.pending_reminders)),
        }
    }

    fn describe(&self, value: f64, threshold: f64) -> String {
        match self {
            MetricKey::FailedRenewalsLastHour => format!(
                "High number of failed renewals: {value} in the last hour (threshold: {threshold})"
            ),
            MetricKey::ContractErrorsLastHour => format!(
                "High number of contract errors: {value} in the last hour (threshold: {threshold})"
            ),
            MetricKey::AgentInactivityHours => format!(
                "Agent inactive for {value:.2} hours (threshold: {threshold} hours)"
            ),
            MetricKey::PendingReminders => format!(
                "Reminder backlog too large: {value} pending (threshold: {threshold})"
            ),
        }
    }
}

/// Configured limit a rule compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdKey {
    FailedRenewalsPerHour,
    ContractErrorsPerHour,
    AgentInactivityHours,
    MaxPendingReminders,
}

impl ThresholdKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdKey::FailedRenewalsPerHour => "failedRenewalsPerHour",
            ThresholdKey::ContractErrorsPerHour => "contractErrorsPerHour",
            ThresholdKey::AgentInactivityHours => "agentInactivityHours",
            ThresholdKey::MaxPendingReminders => "maxPendingReminders",
        }
    }

    /// Configured limit, or `None` when the threshold is not configured
    pub fn limit(&self, thresholds: &ThresholdConfig) -> Option<Measure> {
        match self {
            ThresholdKey::FailedRenewalsPerHour => {
                thresholds.failed_renewals_per_hour.map(Measure::Count)
            }
            ThresholdKey::ContractErrorsPerHour => {
                thresholds.contract_errors_per_hour.map(Measure::Count)
            }
            ThresholdKey::AgentInactivityHours => {
                thresholds.agent_inactivity_hours.map(Measure::Hours)
            }
            ThresholdKey::MaxPendingReminders => thresholds.max_pending_reminders.map(Measure::Count),
        }
    }
}

/// A metric observation or limit in its native unit
///
/// Counts compare as integers; only the alert fields are widened to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Count(u64),
    Hours(f64),
}

impl Measure {
    pub fn as_f64(self) -> f64 {
        match self {
            Measure::Count(count) => count as f64,
            Measure::Hours(hours) => hours,
        }
    }

    /// Strict comparison; `None` when the units differ
    pub fn exceeds(self, limit: Measure) -> Option<bool> {
        match (self, limit) {
            (Measure::Count(value), Measure::Count(limit)) => Some(value > limit),
            (Measure::Hours(value), Measure::Hours(limit)) => Some(value > limit),
            _ => None,
        }
    }
}

/// One row of the evaluation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdRule {
    pub metric: MetricKey,
    pub threshold: ThresholdKey,
    pub alert_id: &'static str,
    pub severity: AlertSeverity,
}

/// Declared evaluation table; alert order follows row order
pub const THRESHOLD_RULES: &[ThresholdRule] = &[
    ThresholdRule {
        metric: MetricKey::FailedRenewalsLastHour,
        threshold: ThresholdKey::FailedRenewalsPerHour,
        alert_id: alert_ids::FAILED_RENEWALS,
        severity: AlertSeverity::Critical,
    },
    ThresholdRule {
        metric: MetricKey::ContractErrorsLastHour,
        threshold: ThresholdKey::ContractErrorsPerHour,
        alert_id: alert_ids::CONTRACT_ERRORS,
        severity: AlertSeverity::Critical,
    },
    ThresholdRule {
        metric: MetricKey::AgentInactivityHours,
        threshold: ThresholdKey::AgentInactivityHours,
        alert_id: alert_ids::AGENT_INACTIVE,
        severity: AlertSeverity::Warning,
    },
    ThresholdRule {
        metric: MetricKey::PendingReminders,
        threshold: ThresholdKey::MaxPendingReminders,
        alert_id: alert_ids::PENDING_REMINDERS,
        severity: AlertSeverity::Warning,
    },
];

impl ThresholdRule {
    /// Evaluate this rule, returning an alert when the metric strictly exceeds its limit
    pub fn evaluate(
        &self,
        snapshot: &MetricsSnapshot,
        thresholds: &ThresholdConfig,
        triggered_at: DateTime<Utc>,
    ) -> Option<Alert> {
        let limit = self.threshold.limit(thresholds)?;
        let observed = self.metric.observe(snapshot)?;

        if !observed.exceeds(limit)? {
            return None;
        }
        let (value, threshold) = (observed.as_f64(), limit.as_f64());

        Some(Alert {
            id: self.alert_id.to_string(),
            message: self.metric.describe(value, threshold),
            severity: self.severity,
            value,
            threshold,
            triggered_at,
        })
    }
}

/// Evaluate every rule in table order and collect the breaches
pub fn evaluate_thresholds(
    snapshot: &MetricsSnapshot,
    thresholds: &ThresholdConfig,
    rules: &[ThresholdRule],
    triggered_at: DateTime<Utc>,
) -> Vec<Alert> {
    rules
        .iter()
        .filter_map(|rule| {
            let alert = rule.evaluate(snapshot, thresholds, triggered_at)?;
            warn!(
                alert_id = %alert.id,
                metric = rule.metric.as_str(),
                threshold_key = rule.threshold.as_str(),
                severity = %alert.severity,
                value = alert.value,
                threshold = alert.threshold,
                "Health threshold breached"
            );
            Some(alert)
        })
        .collect()
}
