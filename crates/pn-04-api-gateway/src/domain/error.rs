//! API error type and HTTP status mapping.
//!
//! Every failure is rendered as `{"success": false, "error": "<message>"}`.

use super::document::DocumentError;
use crate::ports::{LookupError, SummarizeError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pn_01_event_index::IndexError;
use pn_02_idea_minting::MintError;
use serde_json::json;
use std::fmt;

/// API error with HTTP status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Malformed or missing input
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, details)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("not found: {}", resource.into()),
        )
    }

    /// Business conflict (idea already registered)
    pub fn conflict(details: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, details)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, details)
    }

    /// The ledger rejected or lost the request
    pub fn bad_gateway(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, details)
    }

    pub fn unavailable(details: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, details)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "success": false, "error": self.message }));
        (self.status, body).into_response()
    }
}

// Conversions from subsystem errors

impl From<IndexError> for ApiError {
    fn from(e: IndexError) -> Self {
        ApiError::internal(e.to_string())
    }
}

impl From<MintError> for ApiError {
    fn from(e: MintError) -> Self {
        match e {
            MintError::InvalidIdea(_) => ApiError::bad_request(e.to_string()),
            MintError::Duplicate { .. } => ApiError::conflict(e.to_string()),
            MintError::Index(inner) => inner.into(),
            MintError::Proof(_) => ApiError::internal(e.to_string()),
            MintError::Submission(_) | MintError::EventMissing { .. } => {
                ApiError::bad_gateway(e.to_string())
            }
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        ApiError::bad_gateway(e.to_string())
    }
}

impl From<DocumentError> for ApiError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::Unsupported(_) => {
                ApiError::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, e.to_string())
            }
            DocumentError::NotText | DocumentError::Empty => ApiError::bad_request(e.to_string()),
        }
    }
}

impl From<SummarizeError> for ApiError {
    fn from(e: SummarizeError) -> Self {
        ApiError::bad_gateway(e.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (not HTTP, internal use)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(String),
}
