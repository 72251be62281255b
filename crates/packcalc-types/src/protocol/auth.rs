//! Credential exchange bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /auth/token`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthRequest {
    /// Pre-shared secret
    pub secret: String,
}

impl std::fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequest").field("secret", &"<redacted>").finish()
    }
}

/// Successful credential exchange.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Opaque bearer token
    pub token: String,
    /// Server-side expiry as a unix timestamp; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
