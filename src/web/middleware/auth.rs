//! # Admin Authentication Middleware
//!
//! Reads the configured API key header, runs it through the
//! [`AdminAuthenticator`](crate::auth::AdminAuthenticator), and on success
//! stores the resulting [`AdminContext`](crate::auth::AdminContext) in the
//! request extensions for handlers to extract.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::web::errors::ApiError;
use crate::web::state::AppState;

/// Reject the request with 401 unless it carries the admin API key
pub async fn require_admin_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authenticator = &state.authenticator;

    let presented = request
        .headers()
        .get(authenticator.header_name())
        .map(|value| value.as_bytes());

    let ctx = authenticator.authenticate(presented)?;
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}
