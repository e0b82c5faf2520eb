//! Mapping of domain errors onto HTTP responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, FieldError};

/// Body of every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// One of `validation_error`, `not_found`, `conflict`, `internal_error`
    pub code: String,
    pub message: String,
    pub details: Vec<FieldError>,
}

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", self.0);
        } else {
            tracing::warn!(status = status.as_u16(), "Request rejected: {}", self.0);
        }

        let (code, message, details) = match self.0 {
            DomainError::Validation(fields) => (
                "validation_error",
                "Request validation failed".to_string(),
                fields,
            ),
            DomainError::NotFound(msg) => ("not_found", msg, Vec::new()),
            DomainError::Conflict(msg) => ("conflict", msg, Vec::new()),
            // Storage details stay in the logs of release builds
            e @ DomainError::Database(_) => {
                let message = if cfg!(debug_assertions) {
                    e.to_string()
                } else {
                    "An internal server error occurred".to_string()
                };
                ("internal_error", message, Vec::new())
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
