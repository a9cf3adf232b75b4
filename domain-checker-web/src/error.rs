//! HTTP error responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use domain_checker_core::CheckerError;
use serde_json::json;
use thiserror::Error;

/// Request-level failure rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("url parameter is required")]
    MissingUrl,

    #[error("Invalid URL format")]
    InvalidUrl,

    /// `DomainChecker::check` only fails on input errors; any other variant
    /// is answered with a bare 500 and its detail is logged.
    #[error("Internal server error")]
    Internal(String),
}

impl From<CheckerError> for ApiError {
    fn from(e: CheckerError) -> Self {
        match e {
            CheckerError::InvalidInput => Self::MissingUrl,
            CheckerError::MalformedUrl(_) => Self::InvalidUrl,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingUrl | Self::InvalidUrl => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
