//! # Web API Application State
//!
//! Shared state handed to every handler and middleware: the aggregation
//! service, the admin authentication gate and, when the server tracks the
//! pipeline in-process, the activity tracker fed by the ingestion route.

use std::sync::Arc;

use crate::auth::AdminAuthenticator;
use crate::health::{HealthAggregationService, PipelineActivityTracker};

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<HealthAggregationService>,
    pub authenticator: Arc<AdminAuthenticator>,
    pub activity: Option<Arc<PipelineActivityTracker>>,
}

impl AppState {
    pub fn new(
        service: Arc<HealthAggregationService>,
        authenticator: Arc<AdminAuthenticator>,
    ) -> Self {
        Self {
            service,
            authenticator,
            activity: None,
        }
    }

    /// Expose `POST /admin/activity` feeding `tracker`
    #[must_use]
    pub fn with_activity_tracker(mut self, tracker: Arc<PipelineActivityTracker>) -> Self {
        self.activity = Some(tracker);
        self
    }
}
