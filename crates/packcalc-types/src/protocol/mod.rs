//! Wire bodies of the calculation service.
//!
//! - `auth` (`POST /auth/token`)
//! - `calculate` (`POST /calculate`)
//! - `configuration` (`/pack-configurations` list body)
//! - `health` (`GET /health`)
//!
//! Saved configurations themselves travel as [`crate::models::PackConfiguration`].

pub mod auth;
pub mod calculate;
pub mod configuration;
pub mod health;

pub use auth::{AuthRequest, AuthResponse};
pub use calculate::{CalculateRequest, CalculateResponse};
pub use configuration::PackConfigurationList;
pub use health::HealthResponse;

use serde::{Deserialize, Serialize};

/// Error body returned by the service on any non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ErrorResponse {
    /// Short error summary
    pub error: String,
    /// Optional detail (validation messages and the like)
    #[serde(default)]
    pub details: String,
}

impl ErrorResponse {
    /// Render as a single human-readable line.
    pub fn message(&self) -> String {
        if self.details.is_empty() {
            self.error.clone()
        } else {
            format!("{}: {}", self.error, self.details)
        }
    }
}
