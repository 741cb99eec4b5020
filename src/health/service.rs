//! # Health Aggregation Service
//!
//! Orchestrates one admin health evaluation:
//!
//! ```text
//!   snapshot provider ──► threshold evaluator ──► status deriver
//!                                                      │
//!                     history (record, then read) ◄────┘
//! ```
//!
//! A call either returns a complete [`HealthReport`] or propagates the
//! snapshot failure unchanged. There are no retries and no partial reports.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use super::evaluator::{evaluate_thresholds, THRESHOLD_RULES};
use super::history::HealthHistory;
use super::snapshot::MetricsSnapshotProvider;
use super::status::derive_status;
use super::types::{HealthReport, MetricsSnapshot};
use crate::auth::AdminContext;
use crate::config::{HealthServiceConfig, ThresholdConfig};
use crate::error::{HealthError, Result, SnapshotError};

#[derive(Debug)]
pub struct HealthAggregationService {
    provider: Arc<dyn MetricsSnapshotProvider>,
    thresholds: ThresholdConfig,
    history: Arc<HealthHistory>,
    snapshot_timeout: Duration,
}

impl HealthAggregationService {
    pub fn new(
        provider: Arc<dyn MetricsSnapshotProvider>,
        thresholds: ThresholdConfig,
        history: Arc<HealthHistory>,
        snapshot_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            thresholds,
            history,
            snapshot_timeout,
        }
    }

    /// Build from loaded configuration with a fresh history buffer
    pub fn from_config(
        provider: Arc<dyn MetricsSnapshotProvider>,
        config: &HealthServiceConfig,
    ) -> Self {
        Self::new(
            provider,
            config.thresholds.clone(),
            Arc::new(HealthHistory::new(config.history.capacity)),
            config.evaluation.snapshot_timeout(),
        )
    }

    pub fn history(&self) -> &Arc<HealthHistory> {
        &self.history
    }

    /// Run one evaluation for an authenticated admin caller
    ///
    /// The report is always recorded into history. When `include_history`
    /// is set, up to the history capacity of entries (most recent first,
    /// including this evaluation) are attached; otherwise the field is `None`.
    pub async fn get_admin_health(
        &self,
        _ctx: &AdminContext,
        include_history: bool,
    ) -> Result<HealthReport> {
        let metrics = self.fetch_snapshot().await?;

        let timestamp = Utc::now();
        let alerts = evaluate_thresholds(&metrics, &self.thresholds, THRESHOLD_RULES, timestamp);
        let status = derive_status(&alerts);

        let mut report = HealthReport {
            status,
            timestamp,
            metrics,
            alerts,
            thresholds: self.thresholds.clone(),
            history: None,
        };

        if include_history {
            let recent = self
                .history
                .record_and_snapshot(&report, self.history.capacity());
            report.history = Some(recent);
        } else {
            self.history.record(&report);
        }

        info!(
            status = %report.status,
            alert_count = report.alerts.len(),
            include_history = include_history,
            "Admin health evaluated"
        );

        Ok(report)
    }

    async fn fetch_snapshot(&self) -> Result<MetricsSnapshot> {
        debug!(
            timeout_ms = self.snapshot_timeout.as_millis() as u64,
            "Requesting metrics snapshot"
        );

        let outcome = tokio::time::timeout(self.snapshot_timeout, self.provider.snapshot()).await;

        match outcome {
            Ok(Ok(snapshot)) => Ok(snapshot),
            Ok(Err(e)) => {
                error!(error = %e, "Metrics snapshot provider failed");
                Err(HealthError::Snapshot(e))
            }
            Err(_) => {
                let timeout_ms = self.snapshot_timeout.as_millis() as u64;
                error!(timeout_ms = timeout_ms, "Metrics snapshot timed out");
                Err(HealthError::Snapshot(SnapshotError::Timeout { timeout_ms }))
            }
        }
    }
}
