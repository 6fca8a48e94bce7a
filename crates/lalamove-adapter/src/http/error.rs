/*
[INPUT]:  Error sources (input validation, signing, HTTP, API, serialization)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ApiErrorDetail;

/// Main error type for the Lalamove adapter
#[derive(Error, Debug)]
pub enum LalamoveError {
    /// Caller input rejected before anything was signed or sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The HMAC primitive failed; nothing may be sent
    #[error("Request signing failed: {0}")]
    Signing(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {}", summarize(.errors))]
    Api {
        status: u16,
        errors: Vec<ApiErrorDetail>,
    },

    /// Credentials or signature rejected by the server
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A client-side lookup found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after}s")]
    RateLimit { retry_after: u64 },
}

impl LalamoveError {
    /// Check if the error is worth retrying; no retries happen inside the crate
    pub fn is_retryable(&self) -> bool {
        match self {
            LalamoveError::Http(err) => err.is_timeout() || err.is_connect(),
            LalamoveError::RateLimit { .. } => true,
            LalamoveError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get retry delay in seconds (if the server supplied one)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            LalamoveError::RateLimit { retry_after } => Some(*retry_after),
            _ => None,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            LalamoveError::Authentication { .. } | LalamoveError::Signing(_)
        )
    }

    /// Create an API error from status code and a plain message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        LalamoveError::Api {
            status: status.as_u16(),
            errors: vec![ApiErrorDetail {
                id: status
                    .canonical_reason()
                    .unwrap_or("UNKNOWN")
                    .to_string(),
                message: message.into(),
                detail: None,
            }],
        }
    }
}

fn summarize(errors: &[ApiErrorDetail]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| {
            if e.message.is_empty() {
                e.id.clone()
            } else {
                format!("{}: {}", e.id, e.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for Lalamove operations
pub type Result<T> = std::result::Result<T, LalamoveError>;
