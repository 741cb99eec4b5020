//! # System Constants
//!
//! Fixed identifiers, messages, and enums that define the admin health
//! contract shared by the evaluator, the aggregation service, and the
//! web transport.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable alert identifiers, one per evaluated metric kind
pub mod alert_ids {
    pub const FAILED_RENEWALS: &str = "failed_renewals";
    pub const CONTRACT_ERRORS: &str = "contract_errors";
    pub const AGENT_INACTIVE: &str = "agent_inactive";
    pub const PENDING_REMINDERS: &str = "pending_reminders";
}

/// Fixed response messages surfaced to callers
pub mod messages {
    /// Returned for any missing or mismatched admin credential
    pub const UNAUTHORIZED: &str = "Unauthorized: Invalid admin API key";

    /// Returned for any failure inside the evaluation pipeline
    pub const FETCH_HEALTH_FAILED: &str = "Failed to fetch health status";
}

/// Web transport constants
pub mod web {
    pub const DEFAULT_API_KEY_HEADER: &str = "x-admin-api-key";
    pub const ADMIN_HEALTH_PATH: &str = "/admin/health";
    pub const LIVENESS_PATH: &str = "/health/live";
    pub const ACTIVITY_PATH: &str = "/admin/activity";

    /// Only this literal disables history in the response
    pub const HISTORY_DISABLED_LITERAL: &str = "false";
}

/// Environment variable names read by logging and configuration
pub mod env {
    pub const ENVIRONMENT: &str = "RENEWAL_HEALTH_ENV";
    pub const CONFIG_PATH: &str = "RENEWAL_HEALTH_CONFIG_PATH";
    pub const LOG_FORMAT: &str = "RENEWAL_HEALTH_LOG_FORMAT";
    pub const CONFIG_PREFIX: &str = "RENEWAL_HEALTH";
}

/// Overall health status of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
