//! Escrow-ledger API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::ApiResult;
use crate::escrow::{EscrowInfo, EscrowLedger, ListTitleRequest, ListedResponse, Listing};
use crate::models::ApiResponse;

/// List a title for sale, taking it into escrow custody
pub async fn create_listing(
    State(ledger): State<Arc<EscrowLedger>>,
    Json(request): Json<ListTitleRequest>,
) -> ApiResult<Json<ApiResponse<Listing>>> {
    let listing = ledger.list(request).await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// Get the full listing record for a title
pub async fn get_listing(
    State(ledger): State<Arc<EscrowLedger>>,
    Path(token_id): Path<u64>,
) -> ApiResult<Json<ApiResponse<Listing>>> {
    let listing = ledger.listing(token_id).await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// Get the listed flag for a title. Unknown ids report `false` rather than
/// an error.
pub async fn get_listed(
    State(ledger): State<Arc<EscrowLedger>>,
    Path(token_id): Path<u64>,
) -> Json<ApiResponse<ListedResponse>> {
    let is_listed = ledger.is_listed(token_id).await;
    Json(ApiResponse::ok(ListedResponse {
        token_id,
        is_listed,
    }))
}

/// Get the ledger's deployment wiring
pub async fn get_escrow_info(
    State(ledger): State<Arc<EscrowLedger>>,
) -> Json<ApiResponse<EscrowInfo>> {
    Json(ApiResponse::ok(ledger.info()))
}
