use crate::config::ClientConfig;
use crate::credentials::CredentialCache;
use crate::error::ClientError;
use crate::transport::{self, Transport};
use async_trait::async_trait;
use packcalc_types::protocol::PackConfigurationList;
use packcalc_types::{
    ConfigurationId, CreatePackConfigurationRequest, PackConfiguration,
    UpdatePackConfigurationRequest,
};
use reqwest::RequestBuilder;
use std::sync::Arc;

/// CRUD over the server-persisted saved configurations.
#[async_trait]
pub trait ConfigurationApi: Send + Sync {
    /// All configurations in server order.
    async fn list(&self) -> Result<Vec<PackConfiguration>, ClientError>;

    /// A single configuration; `None` when the server answers 404.
    async fn get(&self, id: ConfigurationId) -> Result<Option<PackConfiguration>, ClientError>;

    /// The server-marked default; `None` when the server answers 404.
    async fn get_default(&self) -> Result<Option<PackConfiguration>, ClientError>;

    async fn create(
        &self,
        request: &CreatePackConfigurationRequest,
    ) -> Result<PackConfiguration, ClientError>;

    async fn update(
        &self,
        id: ConfigurationId,
        request: &UpdatePackConfigurationRequest,
    ) -> Result<PackConfiguration, ClientError>;

    async fn delete(&self, id: ConfigurationId) -> Result<(), ClientError>;

    /// Mark `id` as default and return the authoritative record.
    async fn set_default(&self, id: ConfigurationId) -> Result<PackConfiguration, ClientError>;
}

pub struct ConfigurationClient {
    transport: Transport,
    credentials: Arc<CredentialCache>,
    retry_on_unauthorized: bool,
}

impl ConfigurationClient {
    pub fn new(config: &ClientConfig, credentials: Arc<CredentialCache>) -> Result<Self, ClientError> {
        Ok(Self::from_parts(
            Transport::new(config)?,
            credentials,
            config.retry_configurations_on_unauthorized,
        ))
    }

    pub(crate) fn from_parts(
        transport: Transport,
        credentials: Arc<CredentialCache>,
        retry_on_unauthorized: bool,
    ) -> Self {
        Self { transport, credentials, retry_on_unauthorized }
    }

    async fn send<F>(&self, build: F) -> Result<reqwest::Response, ClientError>
    where
        F: Fn(&str) -> RequestBuilder + Send + Sync,
    {
        self.credentials.send_authorized(self.retry_on_unauthorized, build).await
    }

    /// Like `send`, but a 404 becomes `Ok(None)`.
    async fn send_optional<F>(&self, build: F) -> Result<Option<reqwest::Response>, ClientError>
    where
        F: Fn(&str) -> RequestBuilder + Send + Sync,
    {
        match self.send(build).await {
            Ok(resp) => Ok(Some(resp)),
            Err(ClientError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl ConfigurationApi for ConfigurationClient {
    async fn list(&self) -> Result<Vec<PackConfiguration>, ClientError> {
        let url = self.transport.url("/pack-configurations");
        let resp = self.send(|token| self.transport.http().get(&url).bearer_auth(token)).await?;
        let body: PackConfigurationList = transport::decode(resp).await?;
        tracing::debug!(count = body.configurations.len(), "Listed pack configurations");
        Ok(body.configurations)
    }

    async fn get(&self, id: ConfigurationId) -> Result<Option<PackConfiguration>, ClientError> {
        let url = self.transport.url(&format!("/pack-configurations/{}", id));
        match self.send_optional(|token| self.transport.http().get(&url).bearer_auth(token)).await? {
            Some(resp) => transport::decode(resp).await.map(Some),
            None => Ok(None),
        }
    }

    async fn get_default(&self) -> Result<Option<PackConfiguration>, ClientError> {
        let url = self.transport.url("/pack-configurations/default");
        match self.send_optional(|token| self.transport.http().get(&url).bearer_auth(token)).await? {
            Some(resp) => transport::decode(resp).await.map(Some),
            None => {
                tracing::debug!("No default pack configuration on server");
                Ok(None)
            },
        }
    }

    async fn create(
        &self,
        request: &CreatePackConfigurationRequest,
    ) -> Result<PackConfiguration, ClientError> {
        request.check()?;
        let url = self.transport.url("/pack-configurations");
        let resp = self
            .send(|token| self.transport.http().post(&url).bearer_auth(token).json(request))
            .await?;
        transport::decode(resp).await
    }

    async fn update(
        &self,
        id: ConfigurationId,
        request: &UpdatePackConfigurationRequest,
    ) -> Result<PackConfiguration, ClientError> {
        request.check()?;
        let url = self.transport.url(&format!("/pack-configurations/{}", id));
        let resp = self
            .send(|token| self.transport.http().put(&url).bearer_auth(token).json(request))
            .await?;
        transport::decode(resp).await
    }

    async fn delete(&self, id: ConfigurationId) -> Result<(), ClientError> {
        let url = self.transport.url(&format!("/pack-configurations/{}", id));
        self.send(|token| self.transport.http().delete(&url).bearer_auth(token)).await?;
        Ok(())
    }

    async fn set_default(&self, id: ConfigurationId) -> Result<PackConfiguration, ClientError> {
        let url = self.transport.url(&format!("/pack-configurations/{}/default", id));
        let resp = self.send(|token| self.transport.http().patch(&url).bearer_auth(token)).await?;
        transport::decode(resp).await
    }
}
