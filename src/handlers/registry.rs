//! Title-registry API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::error::ApiResult;
use crate::models::ApiResponse;
use crate::registry::{ApproveTitleRequest, MintTitleRequest, OwnerResponse, Title, TitleRegistry};

/// Mint a new title
pub async fn mint_title(
    State(registry): State<Arc<TitleRegistry>>,
    Json(request): Json<MintTitleRequest>,
) -> ApiResult<Json<ApiResponse<Title>>> {
    request.validate()?;

    let title = registry.mint(request.caller, &request.metadata_uri).await?;
    Ok(Json(ApiResponse::ok(title)))
}

/// Get a title by token id
pub async fn get_title(
    State(registry): State<Arc<TitleRegistry>>,
    Path(token_id): Path<u64>,
) -> ApiResult<Json<ApiResponse<Title>>> {
    let title = registry.title(token_id).await?;
    Ok(Json(ApiResponse::ok(title)))
}

/// Get the current owner of a title
pub async fn get_title_owner(
    State(registry): State<Arc<TitleRegistry>>,
    Path(token_id): Path<u64>,
) -> ApiResult<Json<ApiResponse<OwnerResponse>>> {
    let owner = registry.owner_of(token_id).await?;
    Ok(Json(ApiResponse::ok(OwnerResponse { token_id, owner })))
}

/// Approve a transfer operator for a title
pub async fn approve_title(
    State(registry): State<Arc<TitleRegistry>>,
    Path(token_id): Path<u64>,
    Json(request): Json<ApproveTitleRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    registry
        .approve(request.caller, request.operator, token_id)
        .await?;
    Ok(Json(ApiResponse::ok(())))
}
