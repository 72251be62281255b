#![doc = include_str!("../README.md")]

mod calculation;
mod client;
mod config;
mod configurations;
mod credentials;
mod error;
mod transport;

pub use calculation::{CalculationApi, CalculationClient};
pub use client::PackCalcClient;
pub use config::ClientConfig;
pub use configurations::{ConfigurationApi, ConfigurationClient};
pub use credentials::{Clock, CredentialCache, SystemClock};
pub use error::ClientError;
