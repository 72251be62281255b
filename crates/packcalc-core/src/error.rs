//! Unified error type for the pack calculator stores.

use packcalc_client::ClientError;
use packcalc_types::ValidationError;
use serde::Serialize;
use thiserror::Error;

use crate::modules::storage::StorageError;

/// Main error type for all store operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Input rejected locally; nothing was sent and no cached state changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Credential exchange, transport, or non-2xx response from the service.
    #[error(transparent)]
    Client(ClientError),

    /// Persisted slot could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// HTTP status carried by the underlying client error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status(),
            _ => None,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Validation(v) => Self::Validation(v),
            other => Self::Client(other),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for store operations.
pub type AppResult<T> = Result<T, AppError>;
