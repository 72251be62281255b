//! Local validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by local input checks. None of these involve a network call,
/// and none of them touch cached state.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ValidationError {
    /// Order quantity is zero or negative
    #[error("Order quantity must be greater than 0")]
    OrderQuantityNotPositive {
        /// Rejected quantity
        quantity: i64,
    },

    /// Order quantity exceeds the accepted maximum
    #[error("Order quantity must not exceed {max}")]
    OrderQuantityTooLarge {
        /// Rejected quantity
        quantity: i64,
        /// Largest accepted quantity
        max: i64,
    },

    /// Calculation or configuration without any pack size
    #[error("At least one pack size is required")]
    EmptyPackSizes,

    /// Pack size outside the accepted bounds
    #[error("Pack size must be between 1 and 10,000,000")]
    PackSizeOutOfRange {
        /// Rejected pack size
        size: u32,
    },

    /// Pack size already present in the working set
    #[error("Pack size already exists")]
    DuplicatePackSize {
        /// Rejected pack size
        size: u32,
    },

    /// Configuration name is empty or whitespace
    #[error("Configuration name cannot be empty")]
    EmptyConfigurationName,

    /// Configuration name longer than the server accepts
    #[error("Configuration name must be at most {max} characters")]
    ConfigurationNameTooLong {
        /// Maximum accepted length in characters
        max: usize,
    },

    /// Any other field-level rejection
    #[error("Validation error for {field}: {message}")]
    InvalidField {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl ValidationError {
    /// Check if the error concerns a pack size value (as opposed to the order
    /// or the configuration metadata).
    pub const fn is_pack_size_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyPackSizes | Self::PackSizeOutOfRange { .. } | Self::DuplicatePackSize { .. }
        )
    }
}
