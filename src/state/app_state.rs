//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::escrow::EscrowLedger;
use crate::registry::TitleRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TitleRegistry>,
    pub ledger: Arc<EscrowLedger>,
}

impl AppState {
    pub fn new(registry: Arc<TitleRegistry>, ledger: Arc<EscrowLedger>) -> Self {
        Self { registry, ledger }
    }
}

impl FromRef<AppState> for Arc<TitleRegistry> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

impl FromRef<AppState> for Arc<EscrowLedger> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.ledger.clone()
    }
}
