//! # Pack Calculator Types
//!
//! Core types, wire models, and error definitions for the pack calculator client.
//!
//! - **`error`** - Typed validation errors raised before any network call
//! - **`models`** - Domain models (pack sizes, saved configurations, calculation results)
//! - **`protocol`** - Request/response bodies of the calculation service
//!
//! ## Architecture Role
//!
//! `packcalc-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!            packcalc-types (this crate)
//!                    │
//!                    ▼
//!             packcalc-client
//!                    │
//!                    ▼
//!              packcalc-core
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for the wire and for local persistence
//! - **Clone** for cheap snapshots out of the stores
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;
pub mod protocol;

// Re-export error types for convenience
pub use error::{Result, ValidationError};

// Re-export core model types
pub use models::{
    CalculationResult, ConfigurationId, CreatePackConfigurationRequest, PackAllocation,
    PackConfiguration, UpdatePackConfigurationRequest, DEFAULT_PACK_SIZES, MAX_ORDER_QUANTITY,
    MAX_PACK_SIZE, MIN_PACK_SIZE,
};
