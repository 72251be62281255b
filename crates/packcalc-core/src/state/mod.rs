//! Process-wide stores.
//!
//! Each store exclusively owns its collection, exposes a mutation API, and hands
//! out cloned snapshots for rendering.

mod calculation;
mod configurations;
mod loading;
mod pack_sizes;

pub use calculation::{CalculationOrchestrator, CalculationState};
pub use configurations::{ConfigurationState, ConfigurationStore};
pub use pack_sizes::{PackSizeState, PackSizeStore, PACK_SIZES_STORAGE_KEY};

#[cfg(test)]
mod tests;
