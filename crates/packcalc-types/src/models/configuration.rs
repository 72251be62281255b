//! Saved pack configuration models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::pack_size::validate_pack_size;
use crate::error::ValidationError;

/// Server-assigned configuration identifier.
pub type ConfigurationId = i64;

/// Longest configuration name the server accepts, in characters.
pub const MAX_CONFIGURATION_NAME_LEN: usize = 255;

/// A named, server-persisted snapshot of a working set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackConfiguration {
    /// Server-assigned, immutable identifier
    pub id: ConfigurationId,
    /// Display name
    pub name: String,
    /// Pack sizes in the order the server stored them
    pub pack_sizes: Vec<u32>,
    /// Whether this is the server-marked default
    pub is_default: bool,
    /// Soft-delete flag; inactive records are not listed by the server
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /pack-configurations`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct CreatePackConfigurationRequest {
    /// Display name
    #[validate(length(min = 1_u64, max = 255_u64))]
    pub name: String,
    /// Pack sizes to save
    #[validate(length(min = 1_u64))]
    pub pack_sizes: Vec<u32>,
}

impl CreatePackConfigurationRequest {
    /// Create a new request.
    pub fn new(name: impl Into<String>, pack_sizes: Vec<u32>) -> Self {
        Self { name: name.into(), pack_sizes }
    }

    /// Run the local checks the server would otherwise reject.
    pub fn check(&self) -> Result<(), ValidationError> {
        check_fields(self, &self.name, &self.pack_sizes)
    }
}

/// Body of `PUT /pack-configurations/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct UpdatePackConfigurationRequest {
    /// Display name
    #[validate(length(min = 1_u64, max = 255_u64))]
    pub name: String,
    /// Pack sizes to save
    #[validate(length(min = 1_u64))]
    pub pack_sizes: Vec<u32>,
    /// Optionally mark or unmark as default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl UpdatePackConfigurationRequest {
    /// Create a new request that leaves the default flag untouched.
    pub fn new(name: impl Into<String>, pack_sizes: Vec<u32>) -> Self {
        Self { name: name.into(), pack_sizes, is_default: None }
    }

    /// Run the local checks the server would otherwise reject.
    pub fn check(&self) -> Result<(), ValidationError> {
        check_fields(self, &self.name, &self.pack_sizes)
    }
}

fn check_fields(
    request: &impl Validate,
    name: &str,
    pack_sizes: &[u32],
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyConfigurationName);
    }
    if let Err(errors) = request.validate() {
        let fields = errors.field_errors();
        if fields.contains_key("name") {
            return Err(ValidationError::ConfigurationNameTooLong {
                max: MAX_CONFIGURATION_NAME_LEN,
            });
        }
        if fields.contains_key("pack_sizes") {
            return Err(ValidationError::EmptyPackSizes);
        }
        return Err(ValidationError::InvalidField {
            field: "request".to_string(),
            message: errors.to_string(),
        });
    }
    for &size in pack_sizes {
        validate_pack_size(size)?;
    }
    Ok(())
}

const fn default_true() -> bool {
    true
}
