//! Error types for the pack calculator client.

use packcalc_types::ValidationError;
use thiserror::Error;

/// Errors that can occur when using the pack calculator client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Credential exchange failed (bad secret, network down, non-2xx).
    #[error("Failed to authenticate with the API: {message}")]
    Auth {
        /// HTTP status of the exchange, if a response arrived.
        status: Option<u16>,
        /// Error message from the server or transport.
        message: String,
    },

    /// Server returned a non-2xx status after the retry policy was exhausted.
    #[error("API request failed ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the server.
        message: String,
    },

    /// HTTP request failed before a response arrived.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a 2xx response that could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client could not be built from its configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Auth { status, .. } => *status,
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the error was raised locally before any network call.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
