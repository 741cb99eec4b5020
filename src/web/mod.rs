//! # Admin Health Web API
//!
//! Axum transport for the admin health endpoint. Authentication and the
//! `history` query flag are resolved here; the core receives an
//! [`AdminContext`](crate::auth::AdminContext) and a boolean.
//!
//! | Route               | Auth      | Response                                   |
//! |---------------------|-----------|--------------------------------------------|
//! | `GET /admin/health` | admin key | 200 healthy, 503 unhealthy, 401, 500       |
//! | `POST /admin/activity` | admin key | 202; mounted only with an activity tracker |
//! | `GET /health/live`  | none      | 200 `{"status": "alive"}`                  |

pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tracing::info;

use crate::constants::web::{ACTIVITY_PATH, ADMIN_HEALTH_PATH, LIVENESS_PATH};

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use extractors::HistoryFlag;
pub use state::AppState;

/// Create the web application with all routes and middleware
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    let public_routes = Router::new().route(LIVENESS_PATH, get(handlers::health::liveness));

    let admin_routes = Router::new()
        .route(ADMIN_HEALTH_PATH, get(handlers::health::admin_health))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin_key,
        ));

    let activity_ingestion = state.activity.is_some();
    let mut router = Router::new().merge(public_routes).merge(admin_routes);

    if let Some(tracker) = state.activity.clone() {
        let ingest_routes = Router::new()
            .route(ACTIVITY_PATH, post(handlers::activity::record_activity))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::auth::require_admin_key,
            ))
            .with_state(tracker);
        router = router.merge(ingest_routes);
    }

    let app = middleware::apply_middleware_stack(router, request_timeout).with_state(state);

    info!(
        request_timeout_ms = request_timeout.as_millis() as u64,
        activity_ingestion = activity_ingestion,
        "Admin health web application created"
    );
    app
}
