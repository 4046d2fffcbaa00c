//! DeedVault Backend Library
//!
//! This library exports the core modules for the DeedVault backend server:
//! a title registry for tokenized property deeds and an escrow ledger that
//! takes custody of listed titles.

pub mod config;
pub mod error;
pub mod escrow;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod registry;
pub mod routes;
pub mod state;
