use std::fmt;

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
pub(crate) const DEFAULT_AUTH_SECRET: &str = "your-auth-secret-change-in-production";
const DEFAULT_API_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
// Five minutes under the server's one-hour token lifetime.
const DEFAULT_TOKEN_TTL_SECS: u64 = 55 * 60;

#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub auth_secret: String,
    pub timeout_secs: u64,
    /// How long a freshly exchanged token is reused before the next exchange.
    pub token_ttl_secs: u64,
    /// Apply the calculation path's evict-and-retry-once policy to configuration CRUD calls.
    pub retry_configurations_on_unauthorized: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_secret: DEFAULT_AUTH_SECRET.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            retry_configurations_on_unauthorized: false,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("auth_secret", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field(
                "retry_configurations_on_unauthorized",
                &self.retry_configurations_on_unauthorized,
            )
            .finish()
    }
}

impl ClientConfig {
    /// Build a config from `PACKCALC_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: resolve_base_url(
                std::env::var("PACKCALC_API_URL").ok(),
                std::env::var("PACKCALC_API_HOST").ok(),
            ),
            auth_secret: std::env::var("PACKCALC_AUTH_SECRET")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.auth_secret),
            timeout_secs: env_parse("PACKCALC_TIMEOUT_SECS").unwrap_or(defaults.timeout_secs),
            token_ttl_secs: env_parse("PACKCALC_TOKEN_TTL_SECS")
                .unwrap_or(defaults.token_ttl_secs),
            retry_configurations_on_unauthorized: env_parse("PACKCALC_RETRY_CONFIGURATIONS")
                .unwrap_or(defaults.retry_configurations_on_unauthorized),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_auth_secret(mut self, secret: impl Into<String>) -> Self {
        self.auth_secret = secret.into();
        self
    }

    pub fn with_token_ttl_secs(mut self, secs: u64) -> Self {
        self.token_ttl_secs = secs;
        self
    }

    pub fn with_configuration_retry(mut self, enabled: bool) -> Self {
        self.retry_configurations_on_unauthorized = enabled;
        self
    }

    pub(crate) fn token_ttl(&self) -> chrono::Duration {
        let secs = i64::try_from(self.token_ttl_secs).unwrap_or(i64::MAX).min(i64::MAX / 1000);
        chrono::Duration::seconds(secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Explicit URL first, then a URL inferred from the host name, then the default.
fn resolve_base_url(explicit: Option<String>, host: Option<String>) -> String {
    if let Some(raw) = explicit {
        let url = raw.trim().trim_end_matches('/').to_string();
        if url.is_empty() {
            tracing::warn!("PACKCALC_API_URL is empty, using defaults");
        } else if url::Url::parse(&url).is_err() {
            tracing::warn!("PACKCALC_API_URL is not a valid URL, using defaults");
        } else {
            return url;
        }
    }
    if let Some(host) = host.map(|h| h.trim().to_string()).filter(|h| !h.is_empty()) {
        return format!("http://{}:{}/api/v1", host, DEFAULT_API_PORT);
    }
    DEFAULT_BASE_URL.to_string()
}
