//! The user's working set of pack sizes.

use packcalc_types::models::{normalize_pack_sizes, validate_pack_size};
use packcalc_types::{ValidationError, DEFAULT_PACK_SIZES};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::AppResult;
use crate::modules::storage::{KeyValueStore, StorageError};

/// Slot holding the persisted working set.
pub const PACK_SIZES_STORAGE_KEY: &str = "pack-sizes-storage";

const PERSIST_VERSION: u32 = 0;

/// Snapshot of the pack size store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackSizeState {
    /// Ascending, duplicate-free
    pub pack_sizes: Vec<u32>,
    /// Transient; never persisted
    pub is_loading: bool,
    /// Last user-visible error; transient
    pub error: Option<String>,
}

/// `{"state":{"packSizes":[...]},"version":0}`
#[derive(Serialize, Deserialize)]
struct PersistedEnvelope {
    state: PersistedPackSizes,
    #[serde(default)]
    version: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedPackSizes {
    pack_sizes: Vec<u32>,
}

/// Owns the working set and keeps the persisted slot identical to it.
///
/// Every mutation is written to storage before it becomes visible in memory; a
/// failed write leaves both untouched.
pub struct PackSizeStore {
    state: RwLock<PackSizeState>,
    storage: Arc<dyn KeyValueStore>,
}

impl PackSizeStore {
    /// Load the working set from `storage`, falling back to the defaults.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let pack_sizes = load_pack_sizes(storage.as_ref());
        Self {
            state: RwLock::new(PackSizeState { pack_sizes, ..Default::default() }),
            storage,
        }
    }

    pub fn snapshot(&self) -> PackSizeState {
        self.state.read().clone()
    }

    pub fn pack_sizes(&self) -> Vec<u32> {
        self.state.read().pack_sizes.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Insert `size`, keeping the set ascending.
    ///
    /// Out-of-range or duplicate sizes set `error` and leave the set unchanged.
    pub fn add(&self, size: u32) -> AppResult<()> {
        let mut state = self.state.write();

        let checked = validate_pack_size(size).and_then(|size| {
            if state.pack_sizes.contains(&size) {
                Err(ValidationError::DuplicatePackSize { size })
            } else {
                Ok(size)
            }
        });
        let size = match checked {
            Ok(size) => size,
            Err(e) => {
                state.error = Some(e.to_string());
                return Err(e.into());
            },
        };

        let mut next = state.pack_sizes.clone();
        next.push(size);
        next.sort_unstable();
        self.commit(&mut state, next)
    }

    /// Remove `size`; absent sizes are a no-op.
    pub fn remove(&self, size: u32) -> AppResult<()> {
        let mut state = self.state.write();
        if !state.pack_sizes.contains(&size) {
            state.error = None;
            return Ok(());
        }
        let next = state.pack_sizes.iter().copied().filter(|&s| s != size).collect();
        self.commit(&mut state, next)
    }

    pub fn reset_to_defaults(&self) -> AppResult<()> {
        let mut state = self.state.write();
        self.commit(&mut state, DEFAULT_PACK_SIZES.to_vec())
    }

    pub fn clear_all(&self) -> AppResult<()> {
        let mut state = self.state.write();
        self.commit(&mut state, Vec::new())
    }

    /// Replace the working set, e.g. with a saved configuration's sizes.
    ///
    /// Sizes are sorted and deduplicated; any out-of-range size rejects the whole set.
    pub fn replace_all(&self, sizes: &[u32]) -> AppResult<()> {
        let mut state = self.state.write();
        let next = match normalize_pack_sizes(sizes) {
            Ok(next) => next,
            Err(e) => {
                state.error = Some(e.to_string());
                return Err(e.into());
            },
        };
        self.commit(&mut state, next)
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.write().error = error;
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.write().is_loading = loading;
    }

    fn commit(&self, state: &mut PackSizeState, next: Vec<u32>) -> AppResult<()> {
        if let Err(e) = self.persist(&next) {
            tracing::warn!("Failed to save pack sizes: {}", e);
            state.error = Some(format!("Failed to save pack sizes: {}", e));
            return Err(e);
        }
        tracing::debug!(count = next.len(), "Pack sizes updated");
        state.pack_sizes = next;
        state.error = None;
        Ok(())
    }

    fn persist(&self, pack_sizes: &[u32]) -> AppResult<()> {
        let envelope = PersistedEnvelope {
            state: PersistedPackSizes { pack_sizes: pack_sizes.to_vec() },
            version: PERSIST_VERSION,
        };
        let raw = serde_json::to_string(&envelope)
            .map_err(|e| StorageError::Io(std::io::Error::from(e)))?;
        self.storage.set(PACK_SIZES_STORAGE_KEY, &raw)?;
        Ok(())
    }
}

/// Read the persisted slot. Anything unreadable falls back to the defaults.
fn load_pack_sizes(storage: &dyn KeyValueStore) -> Vec<u32> {
    let raw = match storage.get(PACK_SIZES_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return DEFAULT_PACK_SIZES.to_vec(),
        Err(e) => {
            tracing::warn!("Failed to read persisted pack sizes, using defaults: {}", e);
            return DEFAULT_PACK_SIZES.to_vec();
        },
    };

    match parse_persisted(&raw) {
        Ok(sizes) => sizes,
        Err(reason) => {
            tracing::warn!("Malformed persisted pack sizes ({}), using defaults", reason);
            DEFAULT_PACK_SIZES.to_vec()
        },
    }
}

fn parse_persisted(raw: &str) -> Result<Vec<u32>, String> {
    let envelope: PersistedEnvelope = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let stored = envelope.state.pack_sizes;
    let normalized = normalize_pack_sizes(&stored).map_err(|e| e.to_string())?;
    if normalized.len() != stored.len() {
        return Err("duplicate pack sizes".to_string());
    }
    Ok(normalized)
}
