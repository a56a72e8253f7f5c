//! Typed error handling for the dashboard
//!
//! # Error Categories
//!
//! - [`ApiError`]: a call to the remote invoices API failed
//! - [`ValidationError`]: caller input was rejected before any API call
//! - [`ConfigError`]: configuration could not be loaded or is invalid
//!
//! Form validation failures are not errors: the actions return them as a
//! [`FormState`](crate::actions::FormState) so the form can be redisplayed.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.fetch_invoice_by_id("inv-1").await {
//!     Ok(invoice) => println!("{:?}", invoice),
//!     Err(DashboardError::Api(e)) => {
//!         // e.to_string() == "Failed to fetch invoice."
//!         eprintln!("{}", e);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::service::ApiOperation;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The main error type for the dashboard
#[derive(Debug)]
pub enum DashboardError {
    /// Remote API errors
    Api(ApiError),

    /// Input validation errors
    Validation(ValidationError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Api(e) => write!(f, "{}", e),
            DashboardError::Validation(e) => write!(f, "{}", e),
            DashboardError::Config(e) => write!(f, "{}", e),
            DashboardError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Api(e) => Some(e),
            DashboardError::Validation(e) => Some(e),
            DashboardError::Config(e) => Some(e),
            DashboardError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Api(e) => e.status_code(),
            DashboardError::Validation(ValidationError::Rejected { status, .. }) => *status,
            DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Api(e) => e.error_code(),
            DashboardError::Validation(_) => "VALIDATION_ERROR",
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Api(e) => Some(serde_json::json!({
                "operation": e.operation().as_str()
            })),
            DashboardError::Validation(ValidationError::FieldError { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// API Errors
// =============================================================================

/// A call to the remote invoices API failed
///
/// The `Display` output is always the operation's generic user-facing
/// message. The underlying cause stays reachable through
/// [`std::error::Error::source`] and is logged where the error is raised.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read
    #[error("{}", .operation.failure_message())]
    Transport {
        operation: ApiOperation,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("{}", .operation.failure_message())]
    Status { operation: ApiOperation, status: u16 },

    /// The response body did not have the expected shape
    #[error("{}", .operation.failure_message())]
    Decode {
        operation: ApiOperation,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn operation(&self) -> ApiOperation {
        match self {
            ApiError::Transport { operation, .. }
            | ApiError::Status { operation, .. }
            | ApiError::Decode { operation, .. } => *operation,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Transport { source, .. } if source.is_timeout() => {
                StatusCode::GATEWAY_TIMEOUT
            }
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "API_UNREACHABLE",
            ApiError::Status { .. } => "API_REQUEST_FAILED",
            ApiError::Decode { .. } => "API_INVALID_RESPONSE",
        }
    }
}

impl From<ApiError> for DashboardError {
    fn from(err: ApiError) -> Self {
        DashboardError::Api(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to caller input
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// The request could not be extracted (bad query string, wrong content type)
    Rejected { status: StatusCode, message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::Rejected { message, .. } => write!(f, "Invalid request: {}", message),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for DashboardError {
    fn from(err: ValidationError) -> Self {
        DashboardError::Validation(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Missing required field in configuration
    MissingField { field: String },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::MissingField { field } => {
                write!(f, "Missing required config field '{}'", field)
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => write!(f, "IO error: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for DashboardError {
    fn from(err: ConfigError) -> Self {
        DashboardError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for DashboardError {
    fn from(err: serde_yaml::Error) -> Self {
        DashboardError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<tera::Error> for DashboardError {
    fn from(err: tera::Error) -> Self {
        DashboardError::Internal(format!("template rendering failed: {}", err))
    }
}

/// A specialized Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
