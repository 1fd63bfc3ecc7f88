//! # REST API Errors
//!
//! Error types for the REST API module.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path identifier is not a valid ObjectId
    #[error("{0}")]
    InvalidId(&'static str),

    /// Missing required query parameter
    #[error("Missing {0} query parameter")]
    MissingParam(&'static str),

    /// Required body fields absent or empty
    #[error("Missing required fields")]
    MissingFields,

    /// Body is not a JSON object
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No document matched
    #[error("{0}")]
    NotFound(&'static str),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store operation failed
    #[error("{message}")]
    Store {
        message: &'static str,
        source: StoreError,
        expose_details: bool,
    },
}

impl RestError {
    /// Store failure reported with a generic message only
    pub fn store(message: &'static str, source: StoreError) -> Self {
        Self::Store {
            message,
            source,
            expose_details: false,
        }
    }

    /// Store failure that also reports the store's message as `details`
    pub fn store_with_details(message: &'static str, source: StoreError) -> Self {
        Self::Store {
            message,
            source,
            expose_details: true,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::InvalidId(_) => StatusCode::BAD_REQUEST,
            RestError::MissingParam(_) => StatusCode::BAD_REQUEST,
            RestError::MissingFields => StatusCode::BAD_REQUEST,
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            RestError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            RestError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            RestError::Store {
                source,
                expose_details: true,
                ..
            } => Some(source.to_string()),
            _ => None,
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code().as_u16(),
            details: err.details(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if let RestError::Store {
            message, source, ..
        } = &self
        {
            error!(error = %source, "{}", message);
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
