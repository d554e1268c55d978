//! Gateway domain: configuration, errors and uploaded documents.

pub mod config;
pub mod document;
pub mod error;

pub use config::{ConfigError, CorsConfig, GatewayConfig, HttpConfig, LimitsConfig};
pub use document::{DocumentError, UploadedDocument, DOCUMENT_FIELD};
pub use error::{ApiError, ApiResult, GatewayError};
