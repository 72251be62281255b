//! Client and stores wired together for a front end to hold.

use packcalc_client::{ClientConfig, PackCalcClient};
use packcalc_types::{CalculationResult, PackConfiguration};
use std::sync::Arc;

use crate::error::AppResult;
use crate::modules::storage::{JsonFileStore, KeyValueStore};
use crate::state::{CalculationOrchestrator, ConfigurationStore, PackSizeStore};

/// Global application state
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<PackCalcClient>,
    pub pack_sizes: Arc<PackSizeStore>,
    pub configurations: Arc<ConfigurationStore>,
    pub calculation: Arc<CalculationOrchestrator>,
}

impl AppState {
    pub fn new(config: ClientConfig, storage: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        Ok(Self::from_client(PackCalcClient::new(config)?, storage))
    }

    /// Client settings from the environment, working set under the default data dir.
    pub fn from_env() -> AppResult<Self> {
        let storage = JsonFileStore::open_default()?;
        tracing::info!(dir = %storage.dir().display(), "Using pack size storage");
        Self::new(ClientConfig::from_env(), Arc::new(storage))
    }

    pub fn from_client(client: PackCalcClient, storage: Arc<dyn KeyValueStore>) -> Self {
        let pack_sizes = Arc::new(PackSizeStore::new(storage));
        let configurations = Arc::new(ConfigurationStore::new(client.configurations()));
        let calculation = Arc::new(CalculationOrchestrator::new(client.calculations()));
        Self { client: Arc::new(client), pack_sizes, configurations, calculation }
    }

    /// Fetch the saved configurations and the server default side by side.
    pub async fn load_initial_data(&self) {
        tokio::join!(self.configurations.load(), self.configurations.load_default());

        let state = self.configurations.snapshot();
        tracing::info!(
            count = state.configurations.len(),
            default = ?state.selected.as_ref().map(|c| c.id),
            "Initial data loaded"
        );
    }

    /// Select a saved configuration and make its sizes the working set.
    pub fn select_configuration(&self, config: PackConfiguration) -> AppResult<()> {
        self.pack_sizes.replace_all(&config.pack_sizes)?;
        self.configurations.select(config);
        Ok(())
    }

    /// Calculate `order_quantity` against the current working set.
    pub async fn calculate(&self, order_quantity: i64) -> AppResult<CalculationResult> {
        let pack_sizes = self.pack_sizes.pack_sizes();
        self.calculation.calculate(order_quantity, &pack_sizes).await
    }
}
