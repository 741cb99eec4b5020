//! # Health Module
//!
//! Evaluation core of the admin health endpoint.
//!
//! ```text
//!   MetricsSnapshotProvider ──► evaluate_thresholds ──► derive_status
//!          (snapshot)              (THRESHOLD_RULES)        │
//!                                                           ▼
//!                       HealthAggregationService ──► HealthHistory
//! ```
//!
//! - [`snapshot`]: provider trait and a fixed-outcome provider
//! - [`activity`]: in-process provider fed by the renewal pipeline
//! - [`evaluator`]: declared rule table and threshold comparison
//! - [`status`]: alert set to overall status
//! - [`history`]: bounded FIFO of past evaluations
//! - [`service`]: the `get_admin_health` operation

pub mod activity;
pub mod evaluator;
pub mod history;
pub mod service;
pub mod snapshot;
pub mod status;
pub mod types;

pub use activity::{ActivityEvent, PipelineActivityTracker};
pub use evaluator::{
    evaluate_thresholds, Measure, MetricKey, ThresholdKey, ThresholdRule, THRESHOLD_RULES,
};
pub use history::HealthHistory;
pub use service::HealthAggregationService;
pub use snapshot::{MetricsSnapshotProvider, StaticSnapshotProvider};
pub use status::derive_status;
pub use types::{Alert, AlertSeverity, HealthReport, HistoryEntry, MetricsSnapshot};
