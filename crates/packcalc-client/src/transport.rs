use crate::config::ClientConfig;
use crate::error::ClientError;
use packcalc_types::protocol::ErrorResponse;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Shared HTTP client plus the base URL every path is resolved against.
#[derive(Clone)]
pub(crate) struct Transport {
    http: Client,
    base_url: String,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Pass 2xx responses through, turn everything else into `ClientError::Api`.
pub(crate) async fn ensure_success(resp: Response) -> Result<Response, ClientError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(api_error(resp).await)
    }
}

pub(crate) async fn api_error(resp: Response) -> ClientError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    ClientError::Api { status: status.as_u16(), message: error_message(status, &body) }
}

/// Prefer the service's `{error, details}` body, then the raw body, then the reason phrase.
pub(crate) fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        if !parsed.error.is_empty() {
            return parsed.message();
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status.canonical_reason().unwrap_or("Unknown status").to_string()
}

pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    resp.json().await.map_err(|e| ClientError::InvalidResponse(e.to_string()))
}
