//! Order calculation bodies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /calculate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalculateRequest {
    /// Order quantity
    pub items: u64,
    /// Pack sizes the service may use
    pub pack_sizes: Vec<u32>,
}

/// Successful calculation as sent by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalculateResponse {
    /// Pack size (as a JSON object key, hence a string) to pack count
    pub allocation: HashMap<String, u64>,
    /// Number of packs shipped
    pub total_packs: u64,
    /// Items shipped
    pub total_items: u64,
    /// Items shipped beyond the order quantity
    pub surplus: u64,
}
