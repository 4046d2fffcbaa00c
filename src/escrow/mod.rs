//! Escrow ledger - listing records and custody of titles held in trust

mod model;
mod service;

pub use model::{
    EscrowInfo, EscrowRoles, ListTitleRequest, ListedResponse, Listing, ListingPolicy,
};
pub use service::{EscrowLedger, LedgerError};
