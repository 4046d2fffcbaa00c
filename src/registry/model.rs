//! Title models and request DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Address;

/// A tokenized property title held by the registry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Title {
    pub token_id: u64,
    pub owner: Address,
    pub metadata_uri: String,
    /// Account allowed to transfer this title on the owner's behalf.
    /// Cleared once a transfer consumes it.
    pub approved_operator: Option<Address>,
    pub minted_at: DateTime<Utc>,
}

/// Request DTO for minting a title
#[derive(Debug, Deserialize, Validate)]
pub struct MintTitleRequest {
    pub caller: Address,
    #[validate(length(min = 1, message = "metadata URI must not be empty"))]
    pub metadata_uri: String,
}

/// Request DTO for approving a transfer operator
#[derive(Debug, Deserialize)]
pub struct ApproveTitleRequest {
    pub caller: Address,
    pub operator: Address,
}

/// Response DTO for the owner accessor
#[derive(Debug, Serialize, Deserialize)]
pub struct OwnerResponse {
    pub token_id: u64,
    pub owner: Address,
}
