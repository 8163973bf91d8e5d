//! Error types for index operations
//!
//! Local argument problems (`InvalidArgument`, `AmbiguousRequest`) are raised
//! before any request leaves the process. Everything else originates in the
//! transport and carries the server's status and body unmodified.

use thiserror::Error;

/// Main error type for index operations
#[derive(Error, Debug)]
pub enum IndexError {
    /// A vector or query-vector element could not be interpreted
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// More than one mutually exclusive selector was supplied
    #[error("Ambiguous request: {0}")]
    AmbiguousRequest(String),

    /// Missing or unresolvable client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server rejected the API key
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The API key is valid but lacks access to this index
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The index or route does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server-side failure (5xx)
    #[error("Service error {status}: {body}")]
    Service { status: u16, body: String },

    /// Any other non-success status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Connection-level failure before a response was received
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The request did not complete within its timeout
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Worker pool could not be built or a submitted call failed to join
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl IndexError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        IndexError::InvalidArgument(msg.into())
    }

    /// Create an ambiguous request error
    pub fn ambiguous(msg: impl Into<String>) -> Self {
        IndexError::AmbiguousRequest(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        IndexError::Config(msg.into())
    }

    /// Translate a non-success HTTP status into the typed hierarchy
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 => IndexError::Unauthorized(body),
            403 => IndexError::Forbidden(body),
            404 => IndexError::NotFound(body),
            500..=599 => IndexError::Service { status, body },
            _ => IndexError::Api { status, body },
        }
    }

    /// Check if this error was raised locally, before any network call
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            IndexError::InvalidArgument(_)
                | IndexError::AmbiguousRequest(_)
                | IndexError::Config(_)
        )
    }

    /// Check if repeating the same call could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            IndexError::Service { .. } | IndexError::Protocol(_) | IndexError::Timeout(_)
        )
    }

    /// HTTP status carried by the error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            IndexError::Unauthorized(_) => Some(401),
            IndexError::Forbidden(_) => Some(403),
            IndexError::NotFound(_) => Some(404),
            IndexError::Service { status, .. } | IndexError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IndexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IndexError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            IndexError::Protocol(format!(
                "Failed to connect; did you specify the correct index name and environment? ({})",
                err
            ))
        } else if err.is_decode() {
            IndexError::Parse(err.to_string())
        } else if err.is_builder() {
            IndexError::Config(err.to_string())
        } else {
            IndexError::Protocol(err.to_string())
        }
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::Parse(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for IndexError {
    fn from(err: toml::de::Error) -> Self {
        IndexError::Config(format!("TOML error: {}", err))
    }
}

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, IndexError>;
