//! Pack size bounds and working-set normalization.

use crate::error::ValidationError;

/// Smallest accepted pack size.
pub const MIN_PACK_SIZE: u32 = 1;

/// Largest accepted pack size.
pub const MAX_PACK_SIZE: u32 = 10_000_000;

/// Canonical working set used on first start and by "reset to defaults".
pub const DEFAULT_PACK_SIZES: [u32; 5] = [250, 500, 1000, 2000, 5000];

/// Check that a single pack size lies within `[MIN_PACK_SIZE, MAX_PACK_SIZE]`.
pub fn validate_pack_size(size: u32) -> Result<u32, ValidationError> {
    if (MIN_PACK_SIZE..=MAX_PACK_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(ValidationError::PackSizeOutOfRange { size })
    }
}

/// Validate every size and return the set as an ascending, duplicate-free vector.
///
/// Duplicates are collapsed rather than rejected: this is used for applying sets
/// that came from elsewhere (saved configurations), not for user input.
pub fn normalize_pack_sizes(sizes: &[u32]) -> Result<Vec<u32>, ValidationError> {
    let mut normalized = sizes
        .iter()
        .map(|&size| validate_pack_size(size))
        .collect::<Result<Vec<_>, _>>()?;
    normalized.sort_unstable();
    normalized.dedup();
    Ok(normalized)
}
