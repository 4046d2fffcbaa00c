//! API handlers for the DeedVault routes

mod escrow;
mod registry;

pub use escrow::*;
pub use registry::*;
