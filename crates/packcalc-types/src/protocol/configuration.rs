//! Saved configuration list body.

use serde::{Deserialize, Serialize};

use crate::models::PackConfiguration;

/// Body of `GET /pack-configurations`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackConfigurationList {
    /// Configurations in server order
    pub configurations: Vec<PackConfiguration>,
    /// Number of configurations, as reported by the server
    #[serde(default)]
    pub count: usize,
}
