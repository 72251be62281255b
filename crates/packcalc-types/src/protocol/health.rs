//! Health probe body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Service status (e.g., "healthy")
    pub status: String,
    /// Server time of the probe
    pub timestamp: DateTime<Utc>,
    /// Service version
    #[serde(default)]
    pub version: String,
}

impl HealthResponse {
    /// Whether the service reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}
