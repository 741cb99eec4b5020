//! Overall status derivation.

use super::types::Alert;
use crate::constants::HealthStatus;

/// Unhealthy if and only if at least one alert fired
///
/// Severity, snapshot values and history have no influence here.
pub fn derive_status(alerts: &[Alert]) -> HealthStatus {
    if alerts.is_empty() {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    }
}
