//! Error types for the admin health subsystem.
//!
//! Failures only originate at two boundaries: the authentication gate and
//! the metrics snapshot provider. The evaluator and status deriver are pure.

use thiserror::Error;

use crate::constants::messages;

/// Top-level error returned by the aggregation service and the auth gate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HealthError {
    #[error("{}", messages::UNAUTHORIZED)]
    Unauthorized,
    #[error("Metrics snapshot failed: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Failure raised while fetching a metrics snapshot
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("Metrics collection failed: {0}")]
    Collection(String),
    #[error("Metrics snapshot timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("Metrics source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, HealthError>;
