//! # Web API Errors
//!
//! Maps core failures onto fixed HTTP responses. Bodies carry only the
//! generic message; internal detail stays in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::constants::messages;
use crate::error::HealthError;

/// Error body shape: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Missing or mismatched admin credential (401)
    Unauthorized,
    /// Any failure inside the evaluation pipeline (500)
    EvaluationFailed,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::EvaluationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => messages::UNAUTHORIZED,
            ApiError::EvaluationFailed => messages::FETCH_HEALTH_FAILED,
        }
    }
}

impl From<HealthError> for ApiError {
    fn from(err: HealthError) -> Self {
        match err {
            HealthError::Unauthorized => ApiError::Unauthorized,
            other => {
                error!(error = %other, "Admin health evaluation failed");
                ApiError::EvaluationFailed
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
