use crate::config::ClientConfig;
use crate::credentials::CredentialCache;
use crate::error::ClientError;
use crate::transport::{self, Transport};
use async_trait::async_trait;
use packcalc_types::protocol::{CalculateRequest, CalculateResponse};
use packcalc_types::{CalculationResult, PackAllocation, ValidationError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Order calculation against the remote optimizer.
#[async_trait]
pub trait CalculationApi: Send + Sync {
    /// Ask for the minimal-waste combination of `pack_sizes` covering `items`.
    async fn calculate(
        &self,
        items: u64,
        pack_sizes: &[u32],
    ) -> Result<CalculationResult, ClientError>;
}

pub struct CalculationClient {
    transport: Transport,
    credentials: Arc<CredentialCache>,
}

impl CalculationClient {
    pub fn new(config: &ClientConfig, credentials: Arc<CredentialCache>) -> Result<Self, ClientError> {
        Ok(Self::from_parts(Transport::new(config)?, credentials))
    }

    pub(crate) fn from_parts(transport: Transport, credentials: Arc<CredentialCache>) -> Self {
        Self { transport, credentials }
    }

    pub fn credentials(&self) -> &Arc<CredentialCache> {
        &self.credentials
    }
}

#[async_trait]
impl CalculationApi for CalculationClient {
    async fn calculate(
        &self,
        items: u64,
        pack_sizes: &[u32],
    ) -> Result<CalculationResult, ClientError> {
        if items == 0 {
            return Err(ValidationError::OrderQuantityNotPositive { quantity: 0 }.into());
        }
        if pack_sizes.is_empty() {
            return Err(ValidationError::EmptyPackSizes.into());
        }

        let started = Instant::now();
        let request = CalculateRequest { items, pack_sizes: pack_sizes.to_vec() };
        let url = self.transport.url("/calculate");
        tracing::debug!(items, sizes = pack_sizes.len(), "Requesting calculation");

        let resp = self
            .credentials
            .send_authorized(true, |token| {
                self.transport.http().post(&url).bearer_auth(token).json(&request)
            })
            .await?;
        let body: CalculateResponse = transport::decode(resp).await?;

        into_result(body, started.elapsed())
    }
}

/// Map the wire allocation into a breakdown sorted by pack size, largest first.
pub(crate) fn into_result(
    body: CalculateResponse,
    elapsed: Duration,
) -> Result<CalculationResult, ClientError> {
    let mut pack_breakdown = body
        .allocation
        .into_iter()
        .map(|(size, quantity)| {
            size.trim()
                .parse::<u32>()
                .map(|pack_size| PackAllocation { pack_size, quantity })
                .map_err(|_| {
                    ClientError::InvalidResponse(format!("allocation key {:?} is not a pack size", size))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    // Keys are unique, so pack size alone gives a total order.
    pack_breakdown.sort_unstable_by(|a, b| b.pack_size.cmp(&a.pack_size));

    Ok(CalculationResult {
        pack_breakdown,
        total_items: body.total_items,
        surplus_items: body.surplus,
        total_packs: body.total_packs,
        calculation_time: elapsed,
    })
}
