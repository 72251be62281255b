use crate::calculation::CalculationClient;
use crate::config::ClientConfig;
use crate::configurations::ConfigurationClient;
use crate::credentials::{Clock, CredentialCache, SystemClock};
use crate::error::ClientError;
use crate::transport::{self, Transport};
use packcalc_types::protocol::HealthResponse;
use std::sync::Arc;

/// Calculation and configuration clients sharing one HTTP client and one
/// credential cache.
pub struct PackCalcClient {
    transport: Transport,
    credentials: Arc<CredentialCache>,
    calculations: Arc<CalculationClient>,
    configurations: Arc<ConfigurationClient>,
    config: ClientConfig,
}

impl PackCalcClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ClientConfig, clock: Arc<dyn Clock>) -> Result<Self, ClientError> {
        let transport = Transport::new(&config)?;
        let credentials =
            Arc::new(CredentialCache::from_transport(transport.clone(), &config, clock));
        let calculations =
            Arc::new(CalculationClient::from_parts(transport.clone(), credentials.clone()));
        let configurations = Arc::new(ConfigurationClient::from_parts(
            transport.clone(),
            credentials.clone(),
            config.retry_configurations_on_unauthorized,
        ));
        tracing::debug!(base_url = %transport.base_url(), "Pack calculator client ready");
        Ok(Self { transport, credentials, calculations, configurations, config })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env())
    }

    pub fn calculations(&self) -> Arc<CalculationClient> {
        self.calculations.clone()
    }

    pub fn configurations(&self) -> Arc<ConfigurationClient> {
        self.configurations.clone()
    }

    pub fn credentials(&self) -> &Arc<CredentialCache> {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Probe `GET /health`. Unauthenticated.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let resp = self.transport.http().get(self.transport.url("/health")).send().await?;
        let resp = transport::ensure_success(resp).await?;
        transport::decode(resp).await
    }
}
