//! # Health Service Configuration
//!
//! Typed configuration for the admin health subsystem. Values are layered
//! from an optional TOML file and `RENEWAL_HEALTH__*` environment variables
//! by [`ConfigManager`], then validated before use.
//!
//! ```toml
//! [auth]
//! admin_api_key = "change-me"
//!
//! [thresholds]
//! failed_renewals_per_hour = 10
//! contract_errors_per_hour = 5
//! agent_inactivity_hours = 24.0
//!
//! [history]
//! capacity = 100
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::constants::web::DEFAULT_API_KEY_HEADER;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthServiceConfig {
    /// Admin credential settings
    pub auth: AuthConfig,

    /// Alert thresholds, one per evaluated metric kind
    pub thresholds: ThresholdConfig,

    /// History retention settings
    pub history: HistoryConfig,

    /// Evaluation pipeline settings
    pub evaluation: EvaluationConfig,

    /// HTTP transport settings
    pub web: WebConfig,
}

impl HealthServiceConfig {
    /// Validate the configuration, failing on the first invalid value
    pub fn validate(&self) -> ConfigResult<()> {
        self.auth.validate()?;
        self.thresholds.validate()?;
        self.history.validate()?;
        self.evaluation.validate()?;
        self.web.validate()
    }
}

/// Admin credential configuration
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret expected in the admin API key header
    pub admin_api_key: String,

    /// Header carrying the admin API key
    pub api_key_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_api_key: String::new(),
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_api_key", &"[REDACTED]")
            .field("api_key_header", &self.api_key_header)
            .finish()
    }
}

impl AuthConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.admin_api_key.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "admin_api_key",
                "auth",
            ));
        }
        if self.api_key_header.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "api_key_header",
                "auth",
            ));
        }
        if axum::http::HeaderName::from_bytes(self.api_key_header.as_bytes()).is_err() {
            return Err(ConfigurationError::invalid_value(
                "api_key_header",
                self.api_key_header.clone(),
                "must be a valid HTTP header name",
            ));
        }
        Ok(())
    }
}

/// Configured alert limits
///
/// Every field is optional: a metric without a configured limit is never
/// evaluated. Reports serialize this struct in camelCase with unset limits
/// omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct ThresholdConfig {
    /// Maximum failed renewals tolerated in the trailing hour
    #[serde(alias = "failedRenewalsPerHour", skip_serializing_if = "Option::is_none")]
    pub failed_renewals_per_hour: Option<u64>,

    /// Maximum contract-processing errors tolerated in the trailing hour
    #[serde(alias = "contractErrorsPerHour", skip_serializing_if = "Option::is_none")]
    pub contract_errors_per_hour: Option<u64>,

    /// Maximum hours since the last agent activity
    #[serde(alias = "agentInactivityHours", skip_serializing_if = "Option::is_none")]
    pub agent_inactivity_hours: Option<f64>,

    /// Maximum reminders waiting to be processed
    #[serde(alias = "maxPendingReminders", skip_serializing_if = "Option::is_none")]
    pub max_pending_reminders: Option<u64>,
}

impl ThresholdConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(hours) = self.agent_inactivity_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(ConfigurationError::invalid_value(
                    "agent_inactivity_hours",
                    hours.to_string(),
                    "must be a finite, non-negative number of hours",
                ));
            }
        }
        Ok(())
    }
}

/// History retention configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of retained evaluations (N)
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

impl HistoryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.capacity == 0 {
            return Err(ConfigurationError::invalid_value(
                "history.capacity",
                "0",
                "must retain at least one entry",
            ));
        }
        Ok(())
    }
}

/// Evaluation pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Upper bound on a single metrics snapshot fetch
    pub snapshot_timeout_ms: u64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            snapshot_timeout_ms: 5000,
        }
    }
}

impl EvaluationConfig {
    pub fn snapshot_timeout(&self) -> Duration {
        Duration::from_millis(self.snapshot_timeout_ms)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.snapshot_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "evaluation.snapshot_timeout_ms",
                "0",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Web server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    /// Address to bind the web server to
    pub bind_address: String,

    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_ms: 30000,
        }
    }
}

impl WebConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigurationError::invalid_value(
                "web.bind_address",
                self.bind_address.clone(),
                "must be an IP:port socket address",
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "web.request_timeout_ms",
                "0",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
