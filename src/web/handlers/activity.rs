//! Pipeline activity ingestion: `POST /admin/activity`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::health::{ActivityEvent, PipelineActivityTracker};

/// Apply one pipeline report to the in-process tracker
///
/// Body is a tagged event, e.g. `{"kind": "renewal_failure"}` or
/// `{"kind": "pending_reminders", "count": 12}`. Responds 202.
pub async fn record_activity(
    State(tracker): State<Arc<PipelineActivityTracker>>,
    Json(event): Json<ActivityEvent>,
) -> StatusCode {
    tracker.apply(&event);
    StatusCode::ACCEPTED
}
