//! Escrow-ledger route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::*;
use crate::state::AppState;

pub fn escrow_routes() -> Router<AppState> {
    Router::new()
        .route("/api/listings", post(create_listing))
        .route("/api/listings/:id", get(get_listing))
        .route("/api/listings/:id/listed", get(get_listed))
        .route("/api/escrow", get(get_escrow_info))
}
