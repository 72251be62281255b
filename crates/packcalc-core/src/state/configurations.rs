//! Local cache of the server-side saved configurations.

use packcalc_client::ConfigurationApi;
use packcalc_types::{
    ConfigurationId, CreatePackConfigurationRequest, PackConfiguration,
    UpdatePackConfigurationRequest,
};
use parking_lot::RwLock;
use std::sync::Arc;

use super::loading::{LoadingGuard, TracksLoading};
use crate::error::{AppError, AppResult};

/// Snapshot of the configuration store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigurationState {
    /// In server order
    pub configurations: Vec<PackConfiguration>,
    pub selected: Option<PackConfiguration>,
    pub is_loading: bool,
    pub error: Option<String>,
    in_flight: usize,
}

impl ConfigurationState {
    pub fn find(&self, id: ConfigurationId) -> Option<&PackConfiguration> {
        self.configurations.iter().find(|c| c.id == id)
    }

    pub fn default_configuration(&self) -> Option<&PackConfiguration> {
        self.configurations.iter().find(|c| c.is_default)
    }
}

impl TracksLoading for ConfigurationState {
    fn in_flight(&mut self) -> &mut usize {
        &mut self.in_flight
    }

    fn set_is_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }
}

/// Orchestrates calls to a [`ConfigurationApi`] and reconciles the cache after
/// each one.
///
/// Reads never fail loudly: `load` and `load_default` keep the last known good
/// cache and only set `error`. Mutations do the same and also return the error.
pub struct ConfigurationStore {
    api: Arc<dyn ConfigurationApi>,
    state: RwLock<ConfigurationState>,
}

impl ConfigurationStore {
    pub fn new(api: Arc<dyn ConfigurationApi>) -> Self {
        Self { api, state: RwLock::new(ConfigurationState::default()) }
    }

    pub fn snapshot(&self) -> ConfigurationState {
        self.state.read().clone()
    }

    pub fn configurations(&self) -> Vec<PackConfiguration> {
        self.state.read().configurations.clone()
    }

    pub fn selected(&self) -> Option<PackConfiguration> {
        self.state.read().selected.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    /// Replace the cache with the server's current list.
    pub async fn load(&self) {
        self.set_error(None);
        let _loading = LoadingGuard::begin(&self.state);

        match self.api.list().await {
            Ok(configurations) => {
                tracing::info!(count = configurations.len(), "Loaded pack configurations");
                self.state.write().configurations = configurations;
            },
            Err(e) => {
                self.fail("load configurations", e);
            },
        }
    }

    /// Select the server-marked default, if there is one.
    pub async fn load_default(&self) {
        self.set_error(None);
        let _loading = LoadingGuard::begin(&self.state);

        match self.api.get_default().await {
            Ok(Some(config)) => {
                tracing::info!(id = config.id, "Selected default pack configuration");
                self.state.write().selected = Some(config);
            },
            Ok(None) => {},
            Err(e) => {
                self.fail("load default configuration", e);
            },
        }
    }

    pub fn select(&self, config: PackConfiguration) {
        let mut state = self.state.write();
        state.selected = Some(config);
        state.error = None;
    }

    pub fn clear_selection(&self) {
        self.state.write().selected = None;
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.write().error = error;
    }

    /// Create a configuration and append the server's record to the cache.
    pub async fn create(
        &self,
        request: CreatePackConfigurationRequest,
    ) -> AppResult<PackConfiguration> {
        self.set_error(None);
        if let Err(e) = request.check() {
            return Err(self.fail("create configuration", e));
        }
        let _loading = LoadingGuard::begin(&self.state);

        let created = self
            .api
            .create(&request)
            .await
            .map_err(|e| self.fail("create configuration", e))?;

        tracing::info!(id = created.id, "Created pack configuration");
        self.state.write().configurations.push(created.clone());
        Ok(created)
    }

    /// Update a configuration and replace its cached entry.
    pub async fn update(
        &self,
        id: ConfigurationId,
        request: UpdatePackConfigurationRequest,
    ) -> AppResult<PackConfiguration> {
        self.set_error(None);
        if let Err(e) = request.check() {
            return Err(self.fail("update configuration", e));
        }
        let _loading = LoadingGuard::begin(&self.state);

        let updated = self
            .api
            .update(id, &request)
            .await
            .map_err(|e| self.fail("update configuration", e))?;

        let mut state = self.state.write();
        if updated.is_default {
            for entry in state.configurations.iter_mut().filter(|c| c.id != updated.id) {
                entry.is_default = false;
            }
        }
        match state.configurations.iter_mut().find(|c| c.id == updated.id) {
            Some(entry) => *entry = updated.clone(),
            None => state.configurations.push(updated.clone()),
        }
        if state.selected.as_ref().is_some_and(|s| s.id == updated.id) {
            state.selected = Some(updated.clone());
        }
        drop(state);

        tracing::info!(id = updated.id, "Updated pack configuration");
        Ok(updated)
    }

    /// Delete a configuration; a deleted selection is cleared.
    pub async fn delete(&self, id: ConfigurationId) -> AppResult<()> {
        self.set_error(None);
        let _loading = LoadingGuard::begin(&self.state);

        self.api.delete(id).await.map_err(|e| self.fail("delete configuration", e))?;

        let mut state = self.state.write();
        state.configurations.retain(|c| c.id != id);
        if state.selected.as_ref().is_some_and(|s| s.id == id) {
            state.selected = None;
        }
        drop(state);

        tracing::info!(id, "Deleted pack configuration");
        Ok(())
    }

    /// Mark `id` as the default. Afterwards exactly the entry with `id` carries
    /// the flag, and the selection is the server's record.
    pub async fn set_default(&self, id: ConfigurationId) -> AppResult<PackConfiguration> {
        self.set_error(None);
        let _loading = LoadingGuard::begin(&self.state);

        let record =
            self.api.set_default(id).await.map_err(|e| self.fail("set default configuration", e))?;

        let mut state = self.state.write();
        for entry in state.configurations.iter_mut() {
            entry.is_default = entry.id == id;
        }
        state.selected = Some(record.clone());
        drop(state);

        tracing::info!(id, "Set default pack configuration");
        Ok(record)
    }

    fn fail(&self, action: &str, error: impl Into<AppError>) -> AppError {
        let error = error.into();
        tracing::warn!(status = ?error.status(), "Failed to {}: {}", action, error);
        self.state.write().error = Some(error.to_string());
        error
    }
}
