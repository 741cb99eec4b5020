#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # Renewal Health
//!
//! Administrative health reporting for the subscription renewal and reminder
//! pipeline.
//!
//! ## Overview
//!
//! Each admin health request fetches a fresh metrics snapshot, evaluates it
//! against the configured thresholds, derives an overall status, and records
//! the result in a bounded history buffer:
//!
//! ```text
//! caller ──► auth gate ──► HealthAggregationService
//!                              ├─► MetricsSnapshotProvider
//!                              ├─► evaluate_thresholds (THRESHOLD_RULES)
//!                              ├─► derive_status
//!                              └─► HealthHistory
//! ```
//!
//! ## Module Organization
//!
//! - [`auth`] - constant-time admin API key gate
//! - [`health`] - snapshot provider seam, evaluator, status, history, service
//! - [`web`] - axum routes, middleware, and HTTP status mapping
//! - [`config`] - layered configuration loading and validation
//! - [`error`] - structured error handling
//! - [`logging`] - tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use renewal_health::auth::AdminAuthenticator;
//! use renewal_health::config::ConfigManager;
//! use renewal_health::health::{HealthAggregationService, PipelineActivityTracker};
//! use renewal_health::web::{create_app, AppState};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let config = manager.config();
//!
//! let tracker = Arc::new(PipelineActivityTracker::new());
//! let service = Arc::new(HealthAggregationService::from_config(tracker.clone(), config));
//! let authenticator = Arc::new(AdminAuthenticator::from_config(&config.auth)?);
//!
//! // The pipeline reports into `tracker`, in-process or via POST /admin/activity
//! tracker.record_agent_activity();
//!
//! let app = create_app(
//!     AppState::new(service, authenticator).with_activity_tracker(tracker),
//!     config.web.request_timeout(),
//! );
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod health;
pub mod logging;
pub mod web;

pub use auth::{AdminAuthenticator, AdminContext};
pub use config::{ConfigManager, HealthServiceConfig, ThresholdConfig};
pub use constants::HealthStatus;
pub use error::{HealthError, Result, SnapshotError};
pub use health::{
    Alert, AlertSeverity, HealthAggregationService, HealthHistory, HealthReport, HistoryEntry,
    MetricsSnapshot, MetricsSnapshotProvider,
};
