use chrono::Duration;
use proptest::prelude::*;

use renewal_health::config::ThresholdConfig;
use renewal_health::health::MetricsSnapshot;

use super::builders::fixed_time;

/// Strategy for generating snapshots around typical threshold values
pub fn snapshot_strategy() -> impl Strategy<Value = MetricsSnapshot> {
    (
        0u64..30,
        0u64..15,
        prop::option::of(0i64..(72 * 60)),
        0u64..1_000,
        0u64..5_000,
    )
        .prop_map(
            |(failed, errors, idle_minutes, pending, processed)| MetricsSnapshot {
                failed_renewals_last_hour: failed,
                contract_errors_last_hour: errors,
                last_agent_activity: idle_minutes.map(|m| fixed_time() - Duration::minutes(m)),
                pending_reminders: pending,
                reminders_processed_last_day: processed,
                collected_at: fixed_time(),
            },
        )
}

/// Strategy for generating partially configured thresholds
pub fn threshold_strategy() -> impl Strategy<Value = ThresholdConfig> {
    (
        prop::option::of(0u64..30),
        prop::option::of(0u64..15),
        prop::option::of(0u32..72),
        prop::option::of(0u64..1_000),
    )
        .prop_map(|(failed, errors, hours, pending)| ThresholdConfig {
            failed_renewals_per_hour: failed,
            contract_errors_per_hour: errors,
            agent_inactivity_hours: hours.map(f64::from),
            max_pending_reminders: pending,
        })
}
