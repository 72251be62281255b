//! Core domain models for the pack calculator.
//!
//! This module contains the data structures shared by the client and the stores.

mod calculation;
mod configuration;
mod pack_size;

// Re-export all models
pub use calculation::{
    validate_order_quantity, CalculationResult, PackAllocation, MAX_ORDER_QUANTITY,
};
pub use configuration::{
    ConfigurationId, CreatePackConfigurationRequest, PackConfiguration,
    UpdatePackConfigurationRequest, MAX_CONFIGURATION_NAME_LEN,
};
pub use pack_size::{
    normalize_pack_sizes, validate_pack_size, DEFAULT_PACK_SIZES, MAX_PACK_SIZE, MIN_PACK_SIZE,
};
