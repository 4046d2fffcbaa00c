//! Route definitions for the DeedVault API

mod escrow;
mod registry;

use axum::Router;

use crate::state::AppState;

pub use escrow::escrow_routes;
pub use registry::title_routes;

/// The full API router, shared by the binary and the integration tests
pub fn api_router() -> Router<AppState> {
    Router::new().merge(title_routes()).merge(escrow_routes())
}
