//! Escrow ledger models and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{amount_string, Address, Amount};

/// A listing pairing a title with its sale terms while the ledger holds the
/// title in custody
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Listing {
    pub token_id: u64,
    pub seller: Address,
    pub buyer: Address,
    #[serde(with = "amount_string")]
    pub purchase_price: Amount,
    /// Required earnest deposit, distinct from the full purchase price
    #[serde(with = "amount_string")]
    pub escrow_amount: Amount,
    pub is_listed: bool,
    pub listed_at: DateTime<Utc>,
}

/// The four parties fixed when the ledger is constructed
#[derive(Debug, Clone, Copy)]
pub struct EscrowRoles {
    pub seller: Address,
    pub inspector: Address,
    pub lender: Address,
}

/// Listing policy knobs left open by the tested surface
#[derive(Debug, Clone, Copy)]
pub struct ListingPolicy {
    /// Reject listings whose earnest deposit exceeds the purchase price
    pub enforce_deposit_cap: bool,
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self {
            enforce_deposit_cap: true,
        }
    }
}

/// Request DTO for listing a title
#[derive(Debug, Deserialize)]
pub struct ListTitleRequest {
    pub caller: Address,
    pub token_id: u64,
    pub buyer: Address,
    #[serde(with = "amount_string")]
    pub purchase_price: Amount,
    #[serde(with = "amount_string")]
    pub escrow_amount: Amount,
}

/// Response DTO for the listed-flag accessor
#[derive(Debug, Serialize, Deserialize)]
pub struct ListedResponse {
    pub token_id: u64,
    pub is_listed: bool,
}

/// Deployment wiring of the ledger: the registry it custodies titles from and
/// the fixed party addresses
#[derive(Debug, Serialize, Deserialize)]
pub struct EscrowInfo {
    pub nft_address: Address,
    pub seller: Address,
    pub inspector: Address,
    pub lender: Address,
    /// The ledger's own custody address
    pub address: Address,
}
