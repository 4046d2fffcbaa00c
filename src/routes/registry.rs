//! Title-registry route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::*;
use crate::state::AppState;

pub fn title_routes() -> Router<AppState> {
    Router::new()
        .route("/api/titles", post(mint_title))
        .route("/api/titles/:id", get(get_title))
        .route("/api/titles/:id/owner", get(get_title_owner))
        .route("/api/titles/:id/approve", post(approve_title))
}
