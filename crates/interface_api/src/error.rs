//! API error handling
//!
//! Maps the domain error taxonomy onto HTTP: validation 422, authorization
//! 403, illegal transition 409, missing entity 404, infrastructure 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_claims::ClaimError;
use domain_directory::DirectoryError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(error: ClaimError) -> Self {
        match error {
            ClaimError::Validation(msg) => ApiError::Validation(msg),
            ClaimError::Unauthorized(msg) => ApiError::Forbidden(msg),
            ClaimError::InvalidState { .. } => ApiError::Conflict(error.to_string()),
            ClaimError::NotFound(msg) => ApiError::NotFound(msg),
            ClaimError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(error: DirectoryError) -> Self {
        match error {
            DirectoryError::Validation(msg) => ApiError::Validation(msg),
            DirectoryError::Unauthorized(msg) => ApiError::Forbidden(msg),
            DirectoryError::NotFound(msg) => ApiError::NotFound(msg),
            DirectoryError::Conflict(msg) => ApiError::Conflict(msg),
            DirectoryError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_invalid_state_maps_to_conflict() {
        let api_error: ApiError = ClaimError::InvalidState {
            action: "verify".to_string(),
            status: "Fully Approved".to_string(),
        }
        .into();
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_taxonomy_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (
                ClaimError::Validation("x".into()).into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ClaimError::Unauthorized("x".into()).into(),
                StatusCode::FORBIDDEN,
            ),
            (ClaimError::NotFound("x".into()).into(), StatusCode::NOT_FOUND),
            (
                DirectoryError::Conflict("x".into()).into(),
                StatusCode::CONFLICT,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
