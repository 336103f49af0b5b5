//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::params::ErrorDetail;

/// Errors a handler can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more inputs failed coercion or constraints.
    #[error("request validation failed with {} error(s)", .0.len())]
    Validation(Vec<ErrorDetail>),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("internal error: {0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(details) => {
                tracing::debug!(errors = details.len(), "Rejecting request input");
                (status, Json(json!({ "detail": details }))).into_response()
            }
            ApiError::NotFound(detail) => (status, Json(json!({ "detail": detail }))).into_response(),
            ApiError::Internal(reason) => {
                tracing::error!(reason, "Internal error");
                (status, Json(json!({ "detail": "Internal Server Error" }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Loc, Source, Violation};

    #[test]
    fn test_status_mapping() {
        let detail = ErrorDetail::new(Loc::of(Source::Query, "q"), Violation::Missing, json!(null));
        assert_eq!(
            ApiError::Validation(vec![detail]).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::NotFound("Not Found").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("boom").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
