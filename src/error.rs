//! Error types for the Khipu client library.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for all Khipu client operations.
#[derive(Error, Debug)]
pub enum KhipuError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Form encoding error
    #[error("Form encoding error: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The request could not be signed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Khipu API returned an error
    #[error("Khipu API error: {0}")]
    Api(ApiError),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request rejected before being sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A payment looked up by notification token belongs to another receiver
    #[error("Receiver id mismatch: expected {expected}, got {actual}")]
    ReceiverMismatch {
        /// The receiver id the client is configured with
        expected: String,
        /// The receiver id reported by the payment
        actual: u64,
    },

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required credentials
    #[error("Missing credentials: receiver id and secret are required")]
    MissingCredentials,
}

impl KhipuError {
    /// The remote API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            KhipuError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// A single field error from a Khipu validation error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    /// The offending request field
    pub field: String,
    /// Why the field was rejected
    pub message: String,
}

/// Error body returned by the Khipu API.
///
/// Khipu uses one shape for service, authorization and validation errors;
/// only validation errors carry the `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    /// HTTP status reported in the body (e.g., 400, 403)
    pub status: u16,
    /// Human-readable error message
    pub message: String,
    /// Per-field validation errors
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)?;
        for e in &self.errors {
            write!(f, "; {}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl ApiError {
    /// Create a new API error from a status and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Parse an API error from a response body.
    ///
    /// Returns `None` when the body is not a Khipu error document.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Check if this is a validation error (bad or missing fields).
    pub fn is_validation_error(&self) -> bool {
        self.status == status_codes::VALIDATION || !self.errors.is_empty()
    }

    /// Check if this is an authorization error (bad receiver id or signature).
    pub fn is_authorization_error(&self) -> bool {
        self.status == status_codes::UNAUTHORIZED || self.status == status_codes::FORBIDDEN
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == status_codes::NOT_FOUND
    }

    /// Check if this is a server side error.
    pub fn is_service_error(&self) -> bool {
        self.status >= status_codes::SERVICE
    }

    /// Look up the validation message for a field.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// All field errors.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.errors
    }
}

/// Status codes Khipu reports in error bodies.
pub mod status_codes {
    /// Validation error
    pub const VALIDATION: u16 = 400;
    /// Missing or malformed authorization
    pub const UNAUTHORIZED: u16 = 401;
    /// Authorization rejected
    pub const FORBIDDEN: u16 = 403;
    /// Unknown resource
    pub const NOT_FOUND: u16 = 404;
    /// Service error (and above)
    pub const SERVICE: u16 = 500;
}
