//! Single-slot bearer credential cache.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::{self, Transport};
use chrono::{DateTime, Utc};
use packcalc_types::protocol::{AuthRequest, AuthResponse};
use reqwest::{RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Source of "now" for token expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CachedToken {
    token: String,
    expiry: DateTime<Utc>,
}

/// Holds at most one bearer token and exchanges the shared secret for a new one
/// when the slot is empty or expired.
///
/// The slot mutex is held across the exchange, so concurrent callers on a cold
/// cache wait for the first exchange instead of issuing their own.
pub struct CredentialCache {
    transport: Transport,
    secret: String,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<CachedToken>>,
}

impl CredentialCache {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &ClientConfig, clock: Arc<dyn Clock>) -> Result<Self, ClientError> {
        Ok(Self::from_transport(Transport::new(config)?, config, clock))
    }

    pub(crate) fn from_transport(
        transport: Transport,
        config: &ClientConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            secret: config.auth_secret.clone(),
            ttl: config.token_ttl(),
            clock,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached token while `now < expiry`, otherwise exchange for a new one.
    pub async fn get_token(&self) -> Result<String, ClientError> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if self.clock.now() < cached.expiry {
                tracing::debug!("Using cached bearer token");
                return Ok(cached.token.clone());
            }
            tracing::debug!("Cached bearer token expired, exchanging for a new one");
        }

        let token = self.exchange().await?;
        // Lifetime starts when the response arrives, not when the request left.
        let expiry = self.clock.now() + self.ttl;
        *slot = Some(CachedToken { token: token.clone(), expiry });
        tracing::info!(expires_at = %expiry, "Acquired bearer token");
        Ok(token)
    }

    /// Drop the cached token; the next `get_token` performs a fresh exchange.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }

    /// Whether a token is cached, expired or not.
    pub async fn has_token(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// Expiry of the cached token, if any.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.slot.lock().await.as_ref().map(|c| c.expiry)
    }

    async fn exchange(&self) -> Result<String, ClientError> {
        let request = AuthRequest { secret: self.secret.clone() };
        let resp = self
            .transport
            .http()
            .post(self.transport.url("/auth/token"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Auth { status: None, message: e.to_string() })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Credential exchange rejected");
            return Err(ClientError::Auth {
                status: Some(status.as_u16()),
                message: transport::error_message(status, &body),
            });
        }

        let body: AuthResponse = resp.json().await.map_err(|e| ClientError::Auth {
            status: Some(status.as_u16()),
            message: format!("Invalid token response: {}", e),
        })?;
        Ok(body.token)
    }

    /// Send an authenticated request built by `build` and require a 2xx response.
    ///
    /// With `retry_on_unauthorized`, a 401 received while a token is cached evicts
    /// it and repeats the request once with a fresh token. A second 401 is final.
    pub(crate) async fn send_authorized<F>(
        &self,
        retry_on_unauthorized: bool,
        build: F,
    ) -> Result<Response, ClientError>
    where
        F: Fn(&str) -> RequestBuilder + Send + Sync,
    {
        let token = self.get_token().await?;
        let resp = build(&token).send().await?;

        if resp.status() != StatusCode::UNAUTHORIZED
            || !retry_on_unauthorized
            || !self.has_token().await
        {
            return transport::ensure_success(resp).await;
        }

        tracing::info!("Request unauthorized, evicting cached token and retrying once");
        self.invalidate().await;
        let token = self.get_token().await?;
        let retry = build(&token).send().await?;
        transport::ensure_success(retry).await
    }
}
