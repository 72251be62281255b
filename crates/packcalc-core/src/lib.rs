//! # Pack Calculator Core
//!
//! Client-side state for the pack calculator.
//!
//! ## Architecture
//!
//! ```text
//! packcalc-core/src/
//! ├── app.rs            # AppState: client + stores wired together
//! ├── state/
//! │   ├── pack_sizes.rs     # working set, persisted through a KeyValueStore
//! │   ├── configurations.rs # cache of server-side saved configurations
//! │   └── calculation.rs    # latest-wins calculation orchestrator
//! └── modules/
//!     ├── storage.rs    # KeyValueStore port, JSON file and in-memory adapters
//!     └── logger.rs     # tracing subscriber bootstrap
//! ```
//!
//! Store state sits behind `parking_lot::RwLock` and is read through cloned
//! snapshots. No lock is held across an `.await`; the only suspension points are
//! the network calls made through `packcalc-client`.

// Test-only lints: allow panic!, println!, etc. in test code
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::print_stdout,
        clippy::float_cmp
    )
)]

pub mod app;
pub mod error;
pub mod modules;
pub mod state;

// Re-export commonly used types
pub use app::AppState;
pub use error::{AppError, AppResult};
pub use modules::logger::init_logger;
pub use modules::storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use state::{
    CalculationOrchestrator, CalculationState, ConfigurationState, ConfigurationStore,
    PackSizeState, PackSizeStore,
};
