//! Error types for the REST client

use thiserror::Error;

/// Errors returned by terminal table operations
#[derive(Error, Debug)]
pub enum SupabaseError {
    /// The HTTP call could not complete (DNS, refused connection, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request body could not be serialized; nothing was sent
    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The server answered with a status >= 400
    #[error("supabase: {operation} failed ({status}): {body}")]
    Server {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The response body did not match the requested shape
    #[error("Failed to decode response: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, SupabaseError>;

impl SupabaseError {
    /// HTTP status for server errors, or the transport's status when it carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Encoding(_) | Self::Decoding(_) | Self::Config(_) => None,
        }
    }

    /// Short machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport_error",
            Self::Encoding(_) => "encoding_error",
            Self::Server { .. } => "server_error",
            Self::Decoding(_) => "decoding_error",
            Self::Config(_) => "config_error",
        }
    }

    /// Raw response body of a server error
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Server { body, .. } => Some(body),
            _ => None,
        }
    }
}
