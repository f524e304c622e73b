//! Error types for the PubMed navigator.
//!
//! Uses `thiserror` for structured error handling with automatic `From`
//! implementations.

/// Errors from the HTTP client layer (E-utilities and the tagging service).
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by NCBI (429 response)
    #[error("Rate limited by NCBI: {message}")]
    RateLimited {
        /// Response body or message
        message: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the service
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited { message: message.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }
}

/// Errors from the pipeline layer (session steps).
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Error from an HTTP collaborator
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Entity tagging failed; fatal for the extraction run
    #[error("Entity tagging failed: {0}")]
    Tagger(String),

    /// Spreadsheet serialization error
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A step was invoked before its inputs were available
    #[error("Invalid session state: {0}")]
    InvalidState(String),
}

impl PipelineError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a tagger error.
    #[must_use]
    pub fn tagger(message: impl Into<String>) -> Self {
        Self::Tagger(message.into())
    }

    /// Create an invalid-state error.
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Convert to a user-friendly message for the UI surface.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::RateLimited { .. }) => {
                "Rate limited by NCBI. Please wait a moment before retrying.".to_string()
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::Tagger(message) => {
                format!("Failed to tag abstracts: {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::server(502, "bad gateway");
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[test]
    fn test_validation_user_message() {
        let err = PipelineError::validation("search_term", "cannot be empty");
        assert!(err.to_user_message().contains("search_term"));
        assert!(err.to_user_message().contains("cannot be empty"));
    }

    #[test]
    fn test_tagger_user_message() {
        let err = PipelineError::tagger("connection refused");
        assert!(err.to_user_message().contains("tag"));
        assert!(err.to_user_message().contains("connection refused"));
    }

    #[test]
    fn test_rate_limited_user_message() {
        let err = PipelineError::Client(ClientError::rate_limited("slow down"));
        assert!(err.to_user_message().contains("Rate limited"));
    }
}
