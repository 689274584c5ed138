//! Typed error handling for dashboard actions
//!
//! Expected failures (bad form input, a refused statement, a rejected sign-in)
//! never travel through these types to the caller: the action pipeline turns
//! them into plain [`FormState`](crate::core::form::FormState) data. The enums
//! here cover what sits *behind* the action boundary and what the hosting
//! server has to surface.
//!
//! # Error Categories
//!
//! - [`StorageError`]: a persistence gateway could not run a statement
//! - [`ConfigError`]: configuration could not be read or parsed
//! - [`DashboardError`]: top-level error rendered by the HTTP layer

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type surfaced by the server
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Anything the action pipeline refused to translate
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl DashboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Storage(StorageError::Unavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Storage and internal details stay in the logs; the body only carries
    /// a generic message for those categories.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            DashboardError::Config(e) => e.to_string(),
            DashboardError::Storage(_) | DashboardError::Internal(_) => {
                "Something went wrong on our side".to_string()
            }
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, code = self.error_code(), "request failed");
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StorageError>() {
            Ok(storage) => DashboardError::Storage(storage),
            Err(other) => DashboardError::Internal(format!("{:#}", other)),
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by persistence gateways
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Statement execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("Failed to read config file '{path}': {message}")]
    IoError { path: String, message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Tests
// =============================================================================
