//! Per-invocation coordination of order calculations.

use packcalc_client::CalculationApi;
use packcalc_types::models::validate_order_quantity;
use packcalc_types::{CalculationResult, ValidationError};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::loading::{LoadingGuard, TracksLoading};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalculationState {
    pub result: Option<CalculationResult>,
    pub is_loading: bool,
    pub error: Option<String>,
    in_flight: usize,
}

impl TracksLoading for CalculationState {
    fn in_flight(&mut self) -> &mut usize {
        &mut self.in_flight
    }

    fn set_is_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }
}

/// Validates input, delegates to a [`CalculationApi`], and publishes the outcome.
///
/// Every call takes a generation number when it starts. Only the newest
/// generation may publish, so a slow earlier call can never overwrite the
/// result of a later one. A superseded call still returns its own outcome.
pub struct CalculationOrchestrator {
    api: Arc<dyn CalculationApi>,
    state: RwLock<CalculationState>,
    generation: AtomicU64,
}

impl CalculationOrchestrator {
    pub fn new(api: Arc<dyn CalculationApi>) -> Self {
        Self { api, state: RwLock::new(CalculationState::default()), generation: AtomicU64::new(0) }
    }

    pub fn snapshot(&self) -> CalculationState {
        self.state.read().clone()
    }

    pub fn result(&self) -> Option<CalculationResult> {
        self.state.read().result.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    /// Generation of the most recently started call (0 before the first).
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Calculate the pack breakdown for `order_quantity` using `pack_sizes`.
    ///
    /// Invalid input fails without a network call.
    pub async fn calculate(
        &self,
        order_quantity: i64,
        pack_sizes: &[u32],
    ) -> AppResult<CalculationResult> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let items = match check_input(order_quantity, pack_sizes) {
            Ok(items) => items,
            Err(e) => {
                let e = AppError::from(e);
                self.publish(generation, Err(&e));
                return Err(e);
            },
        };

        self.state.write().error = None;
        let _loading = LoadingGuard::begin(&self.state);

        tracing::debug!(generation, items, sizes = pack_sizes.len(), "Starting calculation");
        let outcome = self.api.calculate(items, pack_sizes).await.map_err(AppError::from);

        match &outcome {
            Ok(result) => self.publish(generation, Ok(result)),
            Err(e) => {
                tracing::warn!(generation, status = ?e.status(), "Calculation failed: {}", e);
                self.publish(generation, Err(e));
            },
        }
        outcome
    }

    /// Drop the published result and error. Calls still in flight will not
    /// publish afterwards.
    pub fn clear_result(&self) {
        let mut state = self.state.write();
        self.generation.fetch_add(1, Ordering::SeqCst);
        state.result = None;
        state.error = None;
    }

    fn publish(&self, generation: u64, outcome: Result<&CalculationResult, &AppError>) {
        let mut state = self.state.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "Discarding superseded calculation outcome");
            return;
        }
        match outcome {
            Ok(result) => {
                tracing::info!(
                    generation,
                    total_packs = result.total_packs,
                    surplus = result.surplus_items,
                    "Calculation complete"
                );
                state.result = Some(result.clone());
                state.error = None;
            },
            Err(e) => {
                state.result = None;
                state.error = Some(e.to_string());
            },
        }
    }
}

fn check_input(order_quantity: i64, pack_sizes: &[u32]) -> Result<u64, ValidationError> {
    let items = validate_order_quantity(order_quantity)?;
    if pack_sizes.is_empty() {
        return Err(ValidationError::EmptyPackSizes);
    }
    Ok(items)
}
