//! Calculation result model.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ValidationError;

/// Largest order quantity accepted before a request is issued.
pub const MAX_ORDER_QUANTITY: i64 = 1_000_000_000;

/// Number of packs of one size used to fulfil an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PackAllocation {
    /// Pack size
    pub pack_size: u32,
    /// How many packs of this size
    pub quantity: u64,
}

/// Outcome of one successful calculation.
///
/// Produced fresh on every call and superseded, never merged, by the next one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Allocation sorted by pack size, largest first
    pub pack_breakdown: Vec<PackAllocation>,
    /// Items shipped (order quantity plus surplus)
    pub total_items: u64,
    /// Items shipped beyond the order quantity
    pub surplus_items: u64,
    /// Number of packs shipped
    pub total_packs: u64,
    /// Wall time from request start to decoded response, token exchange included
    pub calculation_time: Duration,
}

impl CalculationResult {
    /// Quantity allocated for a given pack size (0 if unused).
    pub fn quantity_of(&self, pack_size: u32) -> u64 {
        self.pack_breakdown
            .iter()
            .find(|a| a.pack_size == pack_size)
            .map_or(0, |a| a.quantity)
    }
}

/// Check a raw order quantity and return it as an unsigned item count.
pub fn validate_order_quantity(quantity: i64) -> Result<u64, ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::OrderQuantityNotPositive { quantity });
    }
    if quantity > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OrderQuantityTooLarge { quantity, max: MAX_ORDER_QUANTITY });
    }
    u64::try_from(quantity).map_err(|_| ValidationError::OrderQuantityNotPositive { quantity })
}
