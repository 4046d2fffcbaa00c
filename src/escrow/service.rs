//! Escrow ledger service - listing creation and listing-state accessors

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::escrow::{EscrowInfo, EscrowRoles, ListTitleRequest, Listing, ListingPolicy};
use crate::models::{Address, Amount};
use crate::registry::{RegistryError, TitleRegistry};

/// Escrow ledger errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("caller {0} is not the configured seller")]
    Unauthorized(Address),

    #[error("no listing exists for title {0}")]
    NotFound(u64),

    #[error("title {0} is already listed")]
    AlreadyListed(u64),

    #[error("custody transfer failed: {0}")]
    TransferFailed(#[from] RegistryError),
}

/// Custodian of listed titles and their sale terms.
///
/// The registry handle and the four party addresses are fixed at construction
/// and immutable thereafter. Listings live in an in-memory table keyed by
/// token id; `list` is the only mutation.
pub struct EscrowLedger {
    registry: Arc<TitleRegistry>,
    address: Address,
    nft_address: Address,
    roles: EscrowRoles,
    policy: ListingPolicy,
    listings: RwLock<HashMap<u64, Listing>>,
}

impl EscrowLedger {
    pub fn new(registry: Arc<TitleRegistry>, roles: EscrowRoles, policy: ListingPolicy) -> Self {
        let nft_address = registry.address();
        Self {
            registry,
            address: Address::new(),
            nft_address,
            roles,
            policy,
            listings: RwLock::new(HashMap::new()),
        }
    }

    /// The ledger's own custody address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Address of the title registry this ledger custodies titles from
    pub fn nft_address(&self) -> Address {
        self.nft_address
    }

    pub fn seller(&self) -> Address {
        self.roles.seller
    }

    pub fn inspector(&self) -> Address {
        self.roles.inspector
    }

    pub fn lender(&self) -> Address {
        self.roles.lender
    }

    /// Deployment wiring as a single record
    pub fn info(&self) -> EscrowInfo {
        EscrowInfo {
            nft_address: self.nft_address,
            seller: self.roles.seller,
            inspector: self.roles.inspector,
            lender: self.roles.lender,
            address: self.address,
        }
    }

    /// List a title for sale: take custody of it via the registry and record
    /// the sale terms.
    ///
    /// The listings lock is held across the registry call, so the custody
    /// transfer and the listing record commit together or not at all.
    pub async fn list(&self, request: ListTitleRequest) -> Result<Listing, LedgerError> {
        if request.caller != self.roles.seller {
            return Err(LedgerError::Unauthorized(request.caller));
        }
        if request.purchase_price == 0 {
            return Err(LedgerError::InvalidInput(
                "purchase price must be positive".to_string(),
            ));
        }
        if self.policy.enforce_deposit_cap && request.escrow_amount > request.purchase_price {
            return Err(LedgerError::InvalidInput(format!(
                "escrow amount {} exceeds purchase price {}",
                request.escrow_amount, request.purchase_price
            )));
        }

        let mut listings = self.listings.write().await;
        if listings.contains_key(&request.token_id) {
            return Err(LedgerError::AlreadyListed(request.token_id));
        }

        // The seller must have approved this ledger as operator beforehand;
        // the registry enforces that transitively.
        self.registry
            .transfer_from(self.address, self.roles.seller, self.address, request.token_id)
            .await?;

        let listing = Listing {
            token_id: request.token_id,
            seller: self.roles.seller,
            buyer: request.buyer,
            purchase_price: request.purchase_price,
            escrow_amount: request.escrow_amount,
            is_listed: true,
            listed_at: Utc::now(),
        };
        listings.insert(request.token_id, listing.clone());

        tracing::info!(
            token_id = request.token_id,
            buyer = %request.buyer,
            purchase_price = %request.purchase_price,
            escrow_amount = %request.escrow_amount,
            "Title listed and taken into custody"
        );
        Ok(listing)
    }

    /// Whether `token_id` is currently listed. Unknown ids are simply not
    /// listed, never an error.
    pub async fn is_listed(&self, token_id: u64) -> bool {
        let listings = self.listings.read().await;
        listings
            .get(&token_id)
            .map(|listing| listing.is_listed)
            .unwrap_or(false)
    }

    /// Full listing record for `token_id`
    pub async fn listing(&self, token_id: u64) -> Result<Listing, LedgerError> {
        let listings = self.listings.read().await;
        listings
            .get(&token_id)
            .cloned()
            .ok_or(LedgerError::NotFound(token_id))
    }

    /// Assigned buyer for `token_id`
    pub async fn buyer(&self, token_id: u64) -> Result<Address, LedgerError> {
        Ok(self.listing(token_id).await?.buyer)
    }

    /// Agreed purchase price for `token_id`
    pub async fn purchase_price(&self, token_id: u64) -> Result<Amount, LedgerError> {
        Ok(self.listing(token_id).await?.purchase_price)
    }

    /// Required earnest deposit for `token_id`
    pub async fn escrow_amount(&self, token_id: u64) -> Result<Amount, LedgerError> {
        Ok(self.listing(token_id).await?.escrow_amount)
    }
}
